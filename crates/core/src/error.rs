//! Phonebook error model.

use thiserror::Error;

/// Result type used across the phonebook layers.
pub type PhonebookResult<T> = Result<T, PhonebookError>;

/// Entry field named in validation and duplicate failures.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Number,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Number => "number",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a candidate entry was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("{0} missing")]
    MissingField(Field),

    #[error("`{0}` is an invalid phone number")]
    InvalidNumberFormat(String),

    #[error("name must be at least {min} characters long (got {len})")]
    TooShortName { len: usize, min: usize },
}

/// Phonebook-level error.
///
/// Every failure leaving the store layer is one of these kinds; storage
/// driver errors are mapped into `StoreUnavailable` (or `DuplicateConflict`)
/// before they cross the crate boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhonebookError {
    /// The submitted entry failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    /// The identifier does not have the shape required by the backend.
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("not found")]
    NotFound,

    /// Another entry already holds this name or number (duplicate policy on).
    #[error("{0} must be unique")]
    DuplicateConflict(Field),

    /// The backing store could not complete the operation.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PhonebookError {
    pub fn malformed_id(msg: impl Into<String>) -> Self {
        Self::MalformedIdentifier(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            PhonebookError::Validation(ValidationFailure::MissingField(_)) => "missing_field",
            PhonebookError::Validation(ValidationFailure::InvalidNumberFormat(_)) => {
                "invalid_number_format"
            }
            PhonebookError::Validation(ValidationFailure::TooShortName { .. }) => "too_short_name",
            PhonebookError::MalformedIdentifier(_) => "malformed_id",
            PhonebookError::NotFound => "not_found",
            PhonebookError::DuplicateConflict(_) => "duplicate",
            PhonebookError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}
