//! Client record and the loose identifier clients are addressed by.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A client registered with the UrBackup server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: i64,
    pub name: String,
    /// Everything else the backend reports, passed through verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A client reference as callers write it: a numeric id or a display name.
///
/// Numeric references resolve against ids only; a client whose *name* looks
/// numeric can never be reached through a number. That asymmetry is part of
/// the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClientRef {
    Id(i64),
    Name(String),
}

impl ClientRef {
    /// Parse a path segment: integer parse first, anything else is a name.
    pub fn from_segment(segment: &str) -> Self {
        match segment.parse::<i64>() {
            Ok(id) => ClientRef::Id(id),
            Err(_) => ClientRef::Name(segment.to_string()),
        }
    }

    /// Normalize a JSON string that happens to contain digits into an id
    /// reference, matching how path segments are read.
    pub fn normalized(self) -> Self {
        match self {
            ClientRef::Name(name) => ClientRef::from_segment(&name),
            id => id,
        }
    }
}

impl std::fmt::Display for ClientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientRef::Id(id) => write!(f, "{id}"),
            ClientRef::Name(name) => write!(f, "{name}"),
        }
    }
}
