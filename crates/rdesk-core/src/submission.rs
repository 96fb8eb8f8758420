//! # Submission Validation
//!
//! Turns a raw request body into a [`NewReviewRequest`].
//!
//! Validation runs in three passes and stops at the first failure:
//!
//! 1. The body must parse as JSON other than `null`. Any value that is not
//!    an object is treated as having no fields.
//! 2. Every field in [`REQUIRED_FIELDS`] must be present, checked in that
//!    order. Absent, `null`, `false`, `0` and blank strings all count as
//!    missing.
//! 3. Each field must have the right type and an accepted value, checked in
//!    the same order.
//!
//! Client-supplied `id`, `status` and `createdAt` are ignored. The store
//! assigns them.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::SubmissionError;
use crate::request::{fields, DocumentType, NewReviewRequest, Priority};

/// Fields a submission must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 5] = [
    fields::CLIENT_NAME,
    fields::DOCUMENT_TITLE,
    fields::DOCUMENT_TYPE,
    fields::PRIORITY,
    fields::DUE_DATE,
];

/// Wire format of `dueDate`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse and validate a submission body.
pub fn parse_submission(body: &[u8]) -> Result<NewReviewRequest, SubmissionError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| SubmissionError::InvalidPayload(e.to_string()))?;
    validate_submission(&value)
}

/// Validate an already-parsed JSON body.
pub fn validate_submission(value: &Value) -> Result<NewReviewRequest, SubmissionError> {
    let no_fields = Map::new();
    let object = match value {
        Value::Object(map) => map,
        Value::Null => {
            return Err(SubmissionError::InvalidPayload(
                "expected a JSON object, found null".into(),
            ))
        }
        // Arrays and scalars carry no fields.
        _ => &no_fields,
    };

    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|f| is_missing(object.get(*f)))
    {
        return Err(SubmissionError::MissingField(missing));
    }

    let client_name = text(object, fields::CLIENT_NAME)?;
    let document_title = text(object, fields::DOCUMENT_TITLE)?;
    let document_type = text(object, fields::DOCUMENT_TYPE)?
        .parse::<DocumentType>()
        .map_err(|e| invalid(fields::DOCUMENT_TYPE, e))?;
    let priority = text(object, fields::PRIORITY)?
        .parse::<Priority>()
        .map_err(|e| invalid(fields::PRIORITY, e))?;
    let due_date = NaiveDate::parse_from_str(text(object, fields::DUE_DATE)?.trim(), DATE_FORMAT)
        .map_err(|e| invalid(fields::DUE_DATE, format!("{e}; expected YYYY-MM-DD")))?;
    let notes = match object.get(fields::NOTES) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(invalid(
                fields::NOTES,
                format!("expected a string, found {}", kind(other)),
            ))
        }
    };

    Ok(NewReviewRequest {
        client_name: client_name.to_string(),
        document_title: document_title.to_string(),
        document_type,
        priority,
        due_date,
        notes,
    })
}

/// JavaScript-style falsiness, plus whitespace-only strings.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

fn text<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, SubmissionError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(invalid(
            field,
            format!("expected a string, found {}", kind(other)),
        )),
        None => Err(SubmissionError::MissingField(field)),
    }
}

fn invalid(field: &'static str, reason: impl ToString) -> SubmissionError {
    SubmissionError::InvalidField {
        field,
        reason: reason.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
