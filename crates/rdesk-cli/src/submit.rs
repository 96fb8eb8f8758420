//! `rdesk submit`: validate locally, then POST a new review request.

use std::io::Write;

use chrono::NaiveDate;
use clap::Args;
use rdesk_core::{DocumentType, NewReviewRequest, Priority};

use crate::client::{ClientError, ReviewClient};

pub const SUBMITTED: &str = "Review request submitted successfully.";
pub const RETRY_LATER: &str = "Failed to submit. Try again later.";

/// Arguments for `rdesk submit`.
#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(long)]
    pub client: String,

    #[arg(long)]
    pub title: String,

    /// `Financial Promotion`, `DDQ Response` or `Risk Assessment`.
    #[arg(long)]
    pub document_type: DocumentType,

    /// `Low`, `Medium` or `High`.
    #[arg(long)]
    pub priority: Priority,

    /// Due date, `YYYY-MM-DD`. Must not be in the past.
    #[arg(long)]
    pub due: NaiveDate,

    #[arg(long)]
    pub notes: Option<String>,
}

impl SubmitArgs {
    fn into_request(self) -> NewReviewRequest {
        NewReviewRequest {
            client_name: self.client,
            document_title: self.title,
            document_type: self.document_type,
            priority: self.priority,
            due_date: self.due,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Run `rdesk submit`. Exit code 0 on success, 1 otherwise.
pub async fn run_submit(
    args: SubmitArgs,
    client: &ReviewClient,
    today: NaiveDate,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    if args.due < today {
        writeln!(out, "Error: Due date {} is in the past.", args.due)?;
        return Ok(1);
    }

    match client.submit(&args.into_request()).await {
        Ok(record) => {
            writeln!(out, "{SUBMITTED}")?;
            writeln!(out, "ID: {}", record.id)?;
            Ok(0)
        }
        Err(ClientError::Api { message, status, .. }) => {
            tracing::debug!(status, %message, "submission rejected");
            writeln!(out, "Error: {message}")?;
            Ok(1)
        }
        Err(e) => {
            tracing::warn!(error = %e, "submission failed");
            writeln!(out, "{RETRY_LATER}")?;
            Ok(1)
        }
    }
}
