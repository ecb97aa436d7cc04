//! Entry identifiers and per-backend identifier shapes.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PhonebookError;

/// Identifier of a stored entry.
///
/// The volatile backend hands out sequential integers; the durable backend
/// uses opaque UUIDs generated by the database. Serialized untagged, so the
/// public `id` field is either a JSON number or a string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Sequence(u64),
    Key(Uuid),
}

impl EntryId {
    pub fn as_sequence(&self) -> Option<u64> {
        match self {
            EntryId::Sequence(n) => Some(*n),
            EntryId::Key(_) => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            EntryId::Key(uuid) => Some(uuid),
            EntryId::Sequence(_) => None,
        }
    }
}

impl core::fmt::Display for EntryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntryId::Sequence(n) => core::fmt::Display::fmt(n, f),
            EntryId::Key(uuid) => core::fmt::Display::fmt(uuid, f),
        }
    }
}

impl From<u64> for EntryId {
    fn from(value: u64) -> Self {
        EntryId::Sequence(value)
    }
}

impl From<Uuid> for EntryId {
    fn from(value: Uuid) -> Self {
        EntryId::Key(value)
    }
}

/// Syntactic shape of identifiers accepted by a backend.
///
/// Whether an id is well-formed is independent of whether a matching entry
/// exists: `classify` never touches a store.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IdentifierShape {
    /// Unsigned integers (volatile backend).
    Sequential,
    /// UUID strings (durable backend).
    Uuid,
}

impl IdentifierShape {
    /// Parse a raw identifier, failing with `MalformedIdentifier` when the
    /// text does not fit this shape.
    pub fn classify(&self, raw: &str) -> Result<EntryId, PhonebookError> {
        match self {
            IdentifierShape::Sequential => u64::from_str(raw)
                .map(EntryId::Sequence)
                .map_err(|e| PhonebookError::malformed_id(format!("{raw:?}: {e}"))),
            IdentifierShape::Uuid => Uuid::from_str(raw)
                .map(EntryId::Key)
                .map_err(|e| PhonebookError::malformed_id(format!("{raw:?}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_shape_accepts_integers_only() {
        let shape = IdentifierShape::Sequential;
        assert_eq!(shape.classify("42").unwrap(), EntryId::Sequence(42));
        assert!(matches!(shape.classify("abc"), Err(PhonebookError::MalformedIdentifier(_))));
        assert!(matches!(shape.classify("-1"), Err(PhonebookError::MalformedIdentifier(_))));
        assert!(matches!(shape.classify(""), Err(PhonebookError::MalformedIdentifier(_))));
    }

    #[test]
    fn uuid_shape_rejects_short_hex() {
        let shape = IdentifierShape::Uuid;
        let uuid = Uuid::now_v7();
        assert_eq!(shape.classify(&uuid.to_string()).unwrap(), EntryId::Key(uuid));
        assert!(matches!(
            shape.classify("5f1c2a"),
            Err(PhonebookError::MalformedIdentifier(_))
        ));
        assert!(matches!(shape.classify("7"), Err(PhonebookError::MalformedIdentifier(_))));
    }

    #[test]
    fn ids_serialize_as_plain_json_values() {
        assert_eq!(serde_json::to_string(&EntryId::Sequence(7)).unwrap(), "7");
        let uuid = Uuid::nil();
        assert_eq!(
            serde_json::to_string(&EntryId::Key(uuid)).unwrap(),
            format!("\"{uuid}\"")
        );
    }
}
