//! `phonebook-core` — phonebook domain building blocks.
//!
//! This crate contains **pure domain** types and rules (no storage or transport).

pub mod entry;
pub mod error;
pub mod id;
pub mod validation;

pub use entry::{Entry, EntryCandidate, NewEntry};
pub use error::{Field, PhonebookError, PhonebookResult, ValidationFailure};
pub use id::{EntryId, IdentifierShape};
pub use validation::{EntryPolicy, find_duplicate, validate};
