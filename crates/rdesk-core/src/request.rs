//! # Review Requests
//!
//! The single domain entity of Review Desk and its three closed
//! enumerations. Enumerations serialize with their human labels
//! (`"DDQ Response"`, `"In Review"`) so the JSON contract matches what
//! reviewers see on screen. Parsing through [`FromStr`] is case-insensitive
//! and tolerates surrounding whitespace; serde deserialization is exact.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON field names, in the casing used on the wire.
pub mod fields {
    /// `id`
    pub const ID: &str = "id";
    /// `clientName`
    pub const CLIENT_NAME: &str = "clientName";
    /// `documentTitle`
    pub const DOCUMENT_TITLE: &str = "documentTitle";
    /// `documentType`
    pub const DOCUMENT_TYPE: &str = "documentType";
    /// `priority`
    pub const PRIORITY: &str = "priority";
    /// `dueDate`
    pub const DUE_DATE: &str = "dueDate";
    /// `notes`
    pub const NOTES: &str = "notes";
    /// `status`
    pub const STATUS: &str = "status";
    /// `createdAt`
    pub const CREATED_AT: &str = "createdAt";
}

/// A label that does not name any variant of the target enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: \"{value}\" (expected one of: {expected})")]
pub struct UnknownLabel {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated list of accepted labels.
    pub expected: String,
}

impl UnknownLabel {
    fn new(kind: &'static str, value: &str, labels: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: labels.join(", "),
        }
    }
}

/// Kind of document submitted for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum DocumentType {
    /// Marketing material subject to financial promotion rules.
    #[serde(rename = "Financial Promotion")]
    FinancialPromotion,
    /// Due diligence questionnaire response.
    #[serde(rename = "DDQ Response")]
    DdqResponse,
    /// Risk assessment report.
    #[serde(rename = "Risk Assessment")]
    RiskAssessment,
}

impl DocumentType {
    /// Every document type, in display order.
    pub fn all() -> &'static [DocumentType] {
        &[
            Self::FinancialPromotion,
            Self::DdqResponse,
            Self::RiskAssessment,
        ]
    }

    /// Human label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::FinancialPromotion => "Financial Promotion",
            Self::DdqResponse => "DDQ Response",
            Self::RiskAssessment => "Risk Assessment",
        }
    }
}

/// Review urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Priority {
    /// No deadline pressure.
    Low,
    /// Normal queue order.
    Medium,
    /// Review ahead of everything else.
    High,
}

impl Priority {
    /// Every priority, lowest first.
    pub fn all() -> &'static [Priority] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// Human label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Ordinal used when sorting: High=3 > Medium=2 > Low=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Where a review request sits in the review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Status {
    /// Submitted, not yet picked up. Every new request starts here.
    #[default]
    Pending,
    /// A reviewer is working on it.
    #[serde(rename = "In Review")]
    InReview,
    /// Review finished.
    Completed,
}

impl Status {
    /// Every status, in workflow order.
    pub fn all() -> &'static [Status] {
        &[Self::Pending, Self::InReview, Self::Completed]
    }

    /// Human label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InReview => "In Review",
            Self::Completed => "Completed",
        }
    }

    /// Ordinal used when sorting: Completed=3 > In Review=2 > Pending=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::Pending => 1,
            Self::InReview => 2,
            Self::Completed => 3,
        }
    }
}

fn parse_label<T: Copy>(
    kind: &'static str,
    input: &str,
    variants: &[T],
    label: impl Fn(T) -> &'static str,
) -> Result<T, UnknownLabel> {
    let wanted = input.trim();
    variants
        .iter()
        .copied()
        .find(|v| label(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let labels: Vec<&str> = variants.iter().map(|v| label(*v)).collect();
            UnknownLabel::new(kind, input, &labels)
        })
}

impl FromStr for DocumentType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("document type", s, Self::all(), Self::label)
    }
}

impl FromStr for Priority {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("priority", s, Self::all(), Self::label)
    }
}

impl FromStr for Status {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("status", s, Self::all(), Self::label)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A document awaiting compliance or quality review.
///
/// `id`, `status` and `created_at` are assigned by the store at creation and
/// never come from the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Decimal string, `count + 1` at creation.
    pub id: String,
    /// Client the document belongs to.
    pub client_name: String,
    /// Free-text document title.
    pub document_title: String,
    /// Kind of document.
    pub document_type: DocumentType,
    /// Review urgency.
    pub priority: Priority,
    /// Calendar date, `YYYY-MM-DD`.
    pub due_date: NaiveDate,
    /// Optional reviewer notes; omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Workflow status.
    pub status: Status,
    /// Server date at creation, `YYYY-MM-DD`.
    pub created_at: NaiveDate,
}

/// A validated submission, before the store has assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewReviewRequest {
    /// Client the document belongs to.
    pub client_name: String,
    /// Free-text document title.
    pub document_title: String,
    /// Kind of document.
    pub document_type: DocumentType,
    /// Review urgency.
    pub priority: Priority,
    /// Calendar date, `YYYY-MM-DD`.
    pub due_date: NaiveDate,
    /// Optional notes for the reviewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewReviewRequest {
    /// Complete the submission into a stored record. Status is always
    /// [`Status::Pending`].
    pub fn into_record(self, id: String, created_at: NaiveDate) -> ReviewRequest {
        ReviewRequest {
            id,
            client_name: self.client_name,
            document_title: self.document_title,
            document_type: self.document_type,
            priority: self.priority,
            due_date: self.due_date,
            notes: self.notes,
            status: Status::Pending,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" in review ".parse::<Status>().unwrap(), Status::InReview);
        assert_eq!(
            "ddq response".parse::<DocumentType>().unwrap(),
            DocumentType::DdqResponse
        );
    }

    #[test]
    fn unknown_label_lists_expected_values() {
        let err = "Urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.value, "Urgent");
        assert!(err.to_string().contains("Low, Medium, High"), "got: {err}");
    }

    #[test]
    fn ranks_order_as_documented() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
        assert!(Status::Completed.rank() > Status::InReview.rank());
        assert!(Status::InReview.rank() > Status::Pending.rank());
    }

    #[test]
    fn record_serializes_with_camel_case_and_labels() {
        let record = NewReviewRequest {
            client_name: "Acme Financial".into(),
            document_title: "Q2 Fund Factsheet".into(),
            document_type: DocumentType::FinancialPromotion,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
            notes: None,
        }
        .into_record("6".into(), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["clientName"], "Acme Financial");
        assert_eq!(json["documentType"], "Financial Promotion");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["dueDate"], "2025-04-20");
        assert_eq!(json["createdAt"], "2025-04-01");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn in_review_round_trips_through_serde_label() {
        let json = serde_json::to_string(&Status::InReview).unwrap();
        assert_eq!(json, "\"In Review\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::InReview);
    }
}
