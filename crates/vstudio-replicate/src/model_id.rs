//! Model identifiers (`owner/name` or `owner/name:version`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Model used when `REPLICATE_MODEL_ID` is not set.
pub const DEFAULT_MODEL_ID: &str = "luma-ai/dream-machine";

/// A Replicate model, optionally pinned to a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId {
    pub owner: String,
    pub name: String,
    pub version: Option<String>,
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

impl FromStr for ModelId {
    type Err = ModelIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelIdParseError(s.to_string());

        let (path, version) = match s.split_once(':') {
            Some((path, version)) if !version.is_empty() && !version.contains(':') => {
                (path, Some(version.to_string()))
            }
            Some(_) => return Err(invalid()),
            None => (s, None),
        };

        let (owner, name) = path.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(ModelId {
            owner: owner.to_string(),
            name: name.to_string(),
            version,
        })
    }
}

#[derive(Debug, Error)]
#[error("Invalid model identifier: {0:?}, expected 'owner/name' or 'owner/name:version'")]
pub struct ModelIdParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_and_name() {
        let id: ModelId = "luma-ai/dream-machine".parse().unwrap();
        assert_eq!(id.owner, "luma-ai");
        assert_eq!(id.name, "dream-machine");
        assert_eq!(id.version, None);
    }

    #[test]
    fn test_parse_with_version() {
        let id: ModelId = "minimax/video-01:5aa835260ff7f40f4069c41185f72036accf99e29957bb4a3b3a911f3b6c1912"
            .parse()
            .unwrap();
        assert_eq!(id.owner, "minimax");
        assert_eq!(id.name, "video-01");
        assert_eq!(
            id.version.as_deref(),
            Some("5aa835260ff7f40f4069c41185f72036accf99e29957bb4a3b3a911f3b6c1912")
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "dream-machine", "/x", "x/", "a/b/c", "a/b:", "a/b:c:d", ":v"] {
            assert!(bad.parse::<ModelId>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_display_round_trips() {
        for s in ["luma-ai/dream-machine", "owner/model:abc123"] {
            assert_eq!(s.parse::<ModelId>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_default_model_id_parses() {
        let id: ModelId = DEFAULT_MODEL_ID.parse().unwrap();
        assert_eq!(id.owner, "luma-ai");
        assert_eq!(id.name, "dream-machine");
        assert_eq!(id.version, None);
    }
}
