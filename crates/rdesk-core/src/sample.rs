//! Built-in sample dataset.
//!
//! Five review requests covering every document type, priority and status.
//! The API seeds its in-memory repository from these when no fixture file
//! is configured.

use chrono::NaiveDate;

use crate::request::{DocumentType, Priority, ReviewRequest, Status};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("sample dates are valid calendar dates")
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    client_name: &str,
    document_title: &str,
    document_type: DocumentType,
    priority: Priority,
    due_date: NaiveDate,
    notes: &str,
    status: Status,
    created_at: NaiveDate,
) -> ReviewRequest {
    ReviewRequest {
        id: id.to_string(),
        client_name: client_name.to_string(),
        document_title: document_title.to_string(),
        document_type,
        priority,
        due_date,
        notes: Some(notes.to_string()),
        status,
        created_at,
    }
}

/// The sample records, in store order.
pub fn records() -> Vec<ReviewRequest> {
    vec![
        record(
            "1",
            "Acme Financial",
            "Q2 Fund Factsheet",
            DocumentType::FinancialPromotion,
            Priority::High,
            date(2025, 4, 15),
            "Performance figures need sign-off before distribution.",
            Status::Pending,
            date(2025, 4, 1),
        ),
        record(
            "2",
            "Birch Investments",
            "Annual Due Diligence Questionnaire",
            DocumentType::DdqResponse,
            Priority::Medium,
            date(2025, 4, 30),
            "Responses to sections 4 and 7 updated since last year.",
            Status::InReview,
            date(2025, 3, 20),
        ),
        record(
            "3",
            "Coral Capital Management",
            "Operational Risk Review",
            DocumentType::RiskAssessment,
            Priority::Low,
            date(2025, 5, 12),
            "Routine yearly review.",
            Status::Completed,
            date(2025, 3, 5),
        ),
        record(
            "4",
            "Delta Wealth Partners",
            "Press Release: New Fund Launch",
            DocumentType::FinancialPromotion,
            Priority::High,
            date(2025, 4, 10),
            "Embargoed until launch date.",
            Status::InReview,
            date(2025, 4, 3),
        ),
        record(
            "5",
            "Elm Street Advisors",
            "Business Continuity Plan",
            DocumentType::RiskAssessment,
            Priority::Medium,
            date(2025, 6, 1),
            "Includes new third-party supplier section.",
            Status::Pending,
            date(2025, 3, 28),
        ),
    ]
}
