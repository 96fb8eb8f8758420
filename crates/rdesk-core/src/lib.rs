//! # rdesk-core — Domain Types for Review Desk
//!
//! Everything about review requests that does not touch the network: the
//! record and its enumerations, the filter engine used by the listing
//! endpoint, validation of submitted payloads, sort comparators, and the
//! state behind a listing screen. No I/O happens in this crate.
//!
//! ## Modules
//!
//! - [`request`]: [`ReviewRequest`], [`NewReviewRequest`] and the
//!   [`DocumentType`], [`Priority`], [`Status`] enumerations.
//! - [`filter`]: [`ReviewFilter`], the AND-of-predicates filter engine.
//! - [`submission`]: body parsing and required-field validation.
//! - [`sort`]: [`SortState`] and per-field comparators.
//! - [`view`]: [`ListView`], fetch/query/sort/edit state for a listing.
//! - [`sample`]: the built-in sample dataset.
//!
//! Enabling the `openapi` feature derives `utoipa` schemas for the wire
//! types.

#![deny(missing_docs)]

pub mod error;
pub mod filter;
pub mod request;
pub mod sample;
pub mod sort;
pub mod submission;
pub mod view;

pub use error::{SubmissionError, ViewError};
pub use filter::{FilterField, ReviewFilter};
pub use request::{DocumentType, NewReviewRequest, Priority, ReviewRequest, Status, UnknownLabel};
pub use sort::{SortDirection, SortKey, SortState};
pub use submission::{parse_submission, validate_submission, REQUIRED_FIELDS};
pub use view::{ListView, LoadState, RowMode, StatusChange};
