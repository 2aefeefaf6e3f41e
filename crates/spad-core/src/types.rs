// ABOUTME: Identifier and direction types shared by every splitpad crate.
// ABOUTME: Pane ids name layout nodes; file ids are opaque keys into external storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a node (leaf or split) in the pane tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(String);

impl PaneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaneId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PaneId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for PaneId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PaneId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Lookup key for a file owned by the file collaborator.
///
/// The layout never reads file content; it only stores and forwards this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Split axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Children sit side by side, `first` on the left
    Horizontal,
    /// Children are stacked, `first` on top
    Vertical,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown split direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Direction::Horizontal),
            "vertical" | "v" => Ok(Direction::Vertical),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_long_and_short_forms() {
        assert_eq!("vertical".parse::<Direction>(), Ok(Direction::Vertical));
        assert_eq!("H".parse::<Direction>(), Ok(Direction::Horizontal));
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = PaneId::new("pane-initial");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"pane-initial\"");
        let file: FileId = serde_json::from_str("\"notes.md\"").unwrap();
        assert_eq!(file.as_str(), "notes.md");
    }

    #[test]
    fn pane_id_compares_with_str() {
        let id = PaneId::from("pane-1-abc123");
        assert!(id == "pane-1-abc123");
        assert_eq!(id.to_string(), "pane-1-abc123");
    }
}
