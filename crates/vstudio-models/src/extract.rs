//! Video URL extraction from provider output.
//!
//! Models return their output in whatever shape they like: a bare URL, a
//! list of URLs, an object with `video` or `url`, or a wrapper with a
//! nested `output`. This walks the value depth-first and returns the first
//! string that looks like an HTTP(S) URL.

use serde_json::Value;

/// Deepest nesting level searched. Anything below this is treated as not found.
pub const MAX_EXTRACTION_DEPTH: usize = 10;

/// Find the first video URL in a model output value.
///
/// Priority at each level:
/// - string: itself, if it is an HTTP(S) URL
/// - array: each element in order
/// - object: `video`, then `url`, then a recursive look into `output`
pub fn extract_video_url(output: &Value) -> Option<&str> {
    extract_at_depth(output, 0)
}

fn extract_at_depth(value: &Value, depth: usize) -> Option<&str> {
    if depth > MAX_EXTRACTION_DEPTH {
        return None;
    }

    match value {
        Value::Null => None,
        Value::String(s) => as_http_url(s),
        Value::Array(items) => items
            .iter()
            .find_map(|item| extract_at_depth(item, depth + 1)),
        Value::Object(fields) => fields
            .get("video")
            .and_then(Value::as_str)
            .and_then(as_http_url)
            .or_else(|| fields.get("url").and_then(Value::as_str).and_then(as_http_url))
            .or_else(|| {
                fields
                    .get("output")
                    .and_then(|nested| extract_at_depth(nested, depth + 1))
            }),
        Value::Bool(_) | Value::Number(_) => None,
    }
}

fn as_http_url(s: &str) -> Option<&str> {
    (s.starts_with("https://") || s.starts_with("http://")).then_some(s)
}
