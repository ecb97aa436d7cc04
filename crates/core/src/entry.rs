//! Phonebook entries.

use serde::{Deserialize, Serialize};

use crate::id::EntryId;

/// A stored phonebook entry.
///
/// This is the public serialized form: `{ "id", "name", "number" }`. Backend
/// bookkeeping (insert timestamps and the like) never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub number: String,
}

impl Entry {
    pub fn from_parts(id: EntryId, entry: NewEntry) -> Self {
        Self {
            id,
            name: entry.name,
            number: entry.number,
        }
    }
}

/// Client-submitted payload, not yet validated.
///
/// Both fields are optional so an absent field is reported as a validation
/// failure rather than a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

impl EntryCandidate {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }
}

/// A validated `{name, number}` pair, ready to be stored.
///
/// Only produced by [`crate::validation::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub(crate) name: String,
    pub(crate) number: String,
}

impl NewEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}
