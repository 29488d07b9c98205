// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `ElementId` enum, used to identify buses.

use std::fmt::Display;

use serde::Serialize;

/// Identifier of a bus.
///
/// Source data identifies buses by number in some formats and by name in
/// others.  Identifiers are parsed as integers when possible and kept as text
/// otherwise, so that `"12"`, `" 12 "` and `12` all refer to the same bus.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ElementId {
    Number(i64),
    Text(String),
}

impl ElementId {
    /// The identifier used for the absent third terminal of a two-terminal
    /// branch.
    pub const NONE: ElementId = ElementId::Number(0);

    /// Parses `raw` as an integer identifier, falling back to text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => ElementId::Number(n),
            Err(_) => ElementId::Text(raw.to_string()),
        }
    }

    /// Returns true for an empty text identifier, which can't be stored.
    pub fn is_missing(&self) -> bool {
        matches!(self, ElementId::Text(s) if s.trim().is_empty())
    }

    /// Returns true for the zero identifier that marks an absent terminal.
    pub fn is_none_marker(&self) -> bool {
        *self == Self::NONE
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementId::Number(n) => write!(f, "{n}"),
            ElementId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ElementId {
    fn from(raw: &str) -> Self {
        ElementId::parse(raw)
    }
}

impl From<String> for ElementId {
    fn from(raw: String) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => ElementId::Number(n),
            Err(_) => ElementId::Text(raw),
        }
    }
}

impl From<&String> for ElementId {
    fn from(raw: &String) -> Self {
        ElementId::parse(raw)
    }
}

impl From<i64> for ElementId {
    fn from(n: i64) -> Self {
        ElementId::Number(n)
    }
}

impl From<i32> for ElementId {
    fn from(n: i32) -> Self {
        ElementId::Number(n.into())
    }
}

impl From<&ElementId> for ElementId {
    fn from(id: &ElementId) -> Self {
        id.clone()
    }
}

/// Normalizes a secondary identifier (generator, load or branch id) to its
/// trimmed text form.
pub(crate) fn normalize_local_id(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ElementId::parse("12"), ElementId::Number(12));
        assert_eq!(ElementId::parse(" 12 "), ElementId::Number(12));
        assert_eq!(ElementId::parse("N1"), ElementId::Text("N1".into()));
        assert_eq!(ElementId::parse("1.5"), ElementId::Text("1.5".into()));
        assert_eq!(ElementId::from(7), ElementId::Number(7));
        assert_eq!(ElementId::from("7".to_string()), ElementId::Number(7));
    }

    #[test]
    fn test_markers() {
        assert!(ElementId::parse("").is_missing());
        assert!(ElementId::parse("  ").is_missing());
        assert!(!ElementId::parse("N1").is_missing());
        assert!(ElementId::parse("0").is_none_marker());
        assert!(!ElementId::parse("N0").is_none_marker());
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementId::Number(3).to_string(), "3");
        assert_eq!(ElementId::parse("ABC1").to_string(), "ABC1");
    }
}
