use chrono::{DateTime, Utc};
use serde::Deserialize;

use phonebook_core::EntryCandidate;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/persons` and `PUT /api/persons/:id`.
///
/// Fields are optional here; absence is reported by validation, not by JSON parsing.
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub name: Option<String>,
    pub number: Option<String>,
}

impl From<EntryRequest> for EntryCandidate {
    fn from(value: EntryRequest) -> Self {
        EntryCandidate {
            name: value.name,
            number: value.number,
        }
    }
}

// -------------------------
// Response helpers
// -------------------------

/// HTML body of `GET /info`.
pub fn info_page(count: u64, now: DateTime<Utc>) -> String {
    format!(
        "<p>Phonebook has info for {count} people</p>\n<p>{}</p>",
        now.to_rfc2822()
    )
}
