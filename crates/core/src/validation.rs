//! Entry validation and the optional duplicate policy.

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::{Entry, EntryCandidate, NewEntry};
use crate::error::{Field, ValidationFailure};
use crate::id::EntryId;

/// Minimum accepted name length, in characters.
pub const MIN_NAME_LEN: usize = 3;

// Unanchored on purpose: "39-44-5323523" is accepted because it contains "44-5323523".
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}-[0-9]{6,10}").expect("number pattern compiles"));

/// Store-wide acceptance policy.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EntryPolicy {
    /// Reject entries whose name or number is already held by another entry.
    /// Off by default.
    pub reject_duplicates: bool,
}

impl EntryPolicy {
    pub fn rejecting_duplicates() -> Self {
        Self {
            reject_duplicates: true,
        }
    }
}

/// Validate a candidate payload.
///
/// Checks run in a fixed order: missing fields (name, then number), name
/// length, then number format. The first failure wins.
pub fn validate(candidate: &EntryCandidate) -> Result<NewEntry, ValidationFailure> {
    let name = required(candidate.name.as_deref(), Field::Name)?;
    let number = required(candidate.number.as_deref(), Field::Number)?;

    let len = name.chars().count();
    if len < MIN_NAME_LEN {
        return Err(ValidationFailure::TooShortName {
            len,
            min: MIN_NAME_LEN,
        });
    }

    if !is_valid_number(number) {
        return Err(ValidationFailure::InvalidNumberFormat(number.to_string()));
    }

    Ok(NewEntry {
        name: name.to_string(),
        number: number.to_string(),
    })
}

fn required(value: Option<&str>, field: Field) -> Result<&str, ValidationFailure> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationFailure::MissingField(field)),
    }
}

pub fn is_valid_number(number: &str) -> bool {
    NUMBER_PATTERN.is_match(number)
}

/// Find the first field of `candidate` already held by another entry.
///
/// `exclude` names the entry being replaced, which never conflicts with
/// itself. Name is checked before number.
pub fn find_duplicate<'a>(
    candidate: &NewEntry,
    existing: impl IntoIterator<Item = &'a Entry>,
    exclude: Option<&EntryId>,
) -> Option<Field> {
    let mut number_taken = false;
    for entry in existing {
        if exclude == Some(&entry.id) {
            continue;
        }
        if entry.name == candidate.name {
            return Some(Field::Name);
        }
        if entry.number == candidate.number {
            number_taken = true;
        }
    }
    number_taken.then_some(Field::Number)
}
