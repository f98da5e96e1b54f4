use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Stable identifier of a wiki.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WikiId(Uuid);

impl WikiId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WikiId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WikiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named collection of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wiki {
    pub id: WikiId,
    pub name: String,
}
