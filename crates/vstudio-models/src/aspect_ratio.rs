//! Aspect ratios supported by the video model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output aspect ratio for a generated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum AspectRatio {
    /// Cinematic widescreen (16:9)
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// Vertical (9:16) for phones
    #[serde(rename = "9:16")]
    Portrait,
    /// Square (1:1)
    #[serde(rename = "1:1")]
    Square,
    /// Classic TV (4:3)
    #[serde(rename = "4:3")]
    Classic,
}

impl AspectRatio {
    pub const ALL: &'static [AspectRatio] = &[
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Square,
        AspectRatio::Classic,
    ];

    /// Returns the `W:H` form the model expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Square => "1:1",
            AspectRatio::Classic => "4:3",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsing is exact: no trimming, no alternate spellings.
impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|ratio| ratio.as_str() == s)
            .ok_or_else(|| AspectRatioParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unsupported aspect ratio: {0}")]
pub struct AspectRatioParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_parse() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape);
        assert_eq!("9:16".parse::<AspectRatio>().unwrap(), AspectRatio::Portrait);
        assert_eq!("1:1".parse::<AspectRatio>().unwrap(), AspectRatio::Square);
        assert_eq!("4:3".parse::<AspectRatio>().unwrap(), AspectRatio::Classic);
    }

    #[test]
    fn test_aspect_ratio_parse_is_exact() {
        assert!("16:10".parse::<AspectRatio>().is_err());
        assert!(" 16:9".parse::<AspectRatio>().is_err());
        assert!("16/9".parse::<AspectRatio>().is_err());
        assert!("".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for ratio in AspectRatio::ALL {
            assert_eq!(ratio.to_string().parse::<AspectRatio>().unwrap(), *ratio);
        }
    }

    #[test]
    fn test_serde_uses_ratio_string() {
        let json = serde_json::to_string(&AspectRatio::Portrait).unwrap();
        assert_eq!(json, "\"9:16\"");

        let parsed: AspectRatio = serde_json::from_str("\"4:3\"").unwrap();
        assert_eq!(parsed, AspectRatio::Classic);
    }

    #[test]
    fn test_default_is_landscape() {
        assert_eq!(AspectRatio::default().as_str(), "16:9");
    }
}
