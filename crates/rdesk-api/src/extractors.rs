//! # Request Extraction Helpers
//!
//! Turn raw query strings and bodies into domain values, mapping failures
//! to [`AppError`]. Submissions are taken as raw bytes so that clients which
//! send no `Content-Type` are still accepted.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use rdesk_core::{parse_submission, NewReviewRequest, ReviewFilter};

use crate::error::AppError;

/// Decode a raw query string into a filter. Absent query means no filter.
///
/// Handlers should use:
/// ```ignore
/// async fn handler(RawQuery(query): RawQuery) -> Result<..., AppError> {
///     let filter = extract_filter(query.as_deref());
/// }
/// ```
pub fn extract_filter(query: Option<&str>) -> ReviewFilter {
    match query {
        Some(q) => ReviewFilter::from_pairs(url::form_urlencoded::parse(q.as_bytes())),
        None => ReviewFilter::default(),
    }
}

/// Read and validate a submission body.
pub fn extract_submission(
    body: Result<Bytes, BytesRejection>,
) -> Result<NewReviewRequest, AppError> {
    let bytes = body.map_err(|err| AppError::InvalidPayload(err.body_text()))?;
    Ok(parse_submission(&bytes)?)
}
