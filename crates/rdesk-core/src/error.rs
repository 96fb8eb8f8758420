//! # Error Types
//!
//! Structured errors for submission validation and list view state,
//! built with `thiserror`. Each variant carries enough context for the
//! API layer to produce its public message without re-inspecting input.

use thiserror::Error;

/// Why a submitted payload could not become a [`crate::NewReviewRequest`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The body was not JSON, or was JSON `null`.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A required field was absent or empty. Only the first one, in
    /// required-field order, is reported.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field was present but its value has the wrong type or is not an
    /// accepted value.
    #[error("Invalid field: {field} ({reason})")]
    InvalidField {
        /// Wire name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl SubmissionError {
    /// Wire name of the field this error is about, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidPayload(_) => None,
            Self::MissingField(field) | Self::InvalidField { field, .. } => Some(field),
        }
    }
}

/// Rejected list view operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// No loaded row has this id.
    #[error("no review request with id {0}")]
    UnknownRow(String),

    /// A draft operation was attempted with no row in edit mode.
    #[error("no row is being edited")]
    NotEditing,
}
