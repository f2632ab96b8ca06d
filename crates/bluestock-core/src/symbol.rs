//! Ticker symbol normalization

use serde::Serialize;
use std::fmt;

/// A normalized ticker identifier: trimmed, uppercased, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Normalize raw user input into a symbol.
    ///
    /// Returns `None` when the input is empty or whitespace only.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        let symbol = Symbol::parse("  infy ").unwrap();
        assert_eq!(symbol.as_str(), "INFY");
        assert_eq!(symbol.to_string(), "INFY");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(Symbol::parse("").is_none());
        assert!(Symbol::parse("   \t").is_none());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let symbol = Symbol::parse("tcs").unwrap();
        assert_eq!(serde_json::to_string(&symbol).unwrap(), r#""TCS""#);
    }
}
