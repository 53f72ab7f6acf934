//! Parse errors for quiz enums

use thiserror::Error;

/// Raised when an answer string does not name a known value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value:?}")]
pub struct ParseError {
    /// What was being parsed (e.g. "environment")
    pub kind: &'static str,
    /// The offending raw input
    pub value: String,
}

impl ParseError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lowercase, trim, and fold spaces/hyphens into underscores
///
/// "Mid-range" and "island hopping" both normalize to snake_case tokens.
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("  Mid-Range "), "mid_range");
        assert_eq!(normalize_token("Island Hopping"), "island_hopping");
        assert_eq!(normalize_token("beach"), "beach");
    }

    #[test]
    fn test_error_message() {
        let err = ParseError::new("season", "monsoon");
        assert_eq!(err.to_string(), "Unknown season: \"monsoon\"");
    }
}
