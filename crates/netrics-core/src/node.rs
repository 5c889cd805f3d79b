//! Node identifiers.
//!
//! Raw keys arrive as JSON object keys, i.e. always strings. A key that
//! parses as an integer becomes [`NodeId::Integer`], anything else stays
//! [`NodeId::Text`]. The decision is made per key, so `"7"` and `" 7 "` name
//! the same node while `"7a"` does not.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a graph node.
///
/// Ordering puts every integer before every text id; integers compare
/// numerically and text ids lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Integer(i64),
    Text(String),
}

impl NodeId {
    /// Normalize a raw key: integer when it parses as one, text otherwise.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(raw.to_string()), Self::Integer)
    }

    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

// Documents always carry string-cast keys, so ids serialize as strings even
// where they land in a value position.
impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
