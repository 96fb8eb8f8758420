//! # Review Request Repository
//!
//! The storage seam behind the route handlers. Handlers see only the
//! [`ReviewRepository`] trait; [`InMemoryRepository`] is the single
//! implementation, seeded from the built-in sample data or a JSON fixture.
//!
//! A fixture that is not a JSON array of well-formed review requests does
//! not stop the service. The repository keeps the reason and every
//! operation reports [`RepositoryError::Malformed`], which the API turns
//! into its "failed to load" response.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rdesk_core::{NewReviewRequest, ReviewFilter, ReviewRequest};
use serde_json::Value;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing dataset is not a well-formed list of review requests.
    #[error("review request data is malformed: {0}")]
    Malformed(String),
}

/// Errors reading a fixture file at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read review request fixture {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Storage for review requests.
///
/// Implementations must be safe to share across request tasks and must
/// never block across an `.await`.
pub trait ReviewRepository: Send + Sync + fmt::Debug {
    /// Records matching `filter`, in store order.
    fn list(&self, filter: &ReviewFilter) -> Result<Vec<ReviewRequest>, RepositoryError>;

    /// Assign identity to a submission and append it. Id assignment and
    /// the append are a single atomic step.
    fn create(
        &self,
        request: NewReviewRequest,
        created_at: NaiveDate,
    ) -> Result<ReviewRequest, RepositoryError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, RepositoryError>;

    /// Whether reads can currently succeed.
    fn is_available(&self) -> bool {
        self.count().is_ok()
    }
}

#[derive(Debug)]
enum Dataset {
    Records(Vec<ReviewRequest>),
    Malformed(String),
}

/// Thread-safe, cloneable in-memory repository.
///
/// Uses `parking_lot::RwLock`; the lock is never held across `.await`.
/// Appends live for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    data: Arc<RwLock<Dataset>>,
}

impl InMemoryRepository {
    /// Repository holding exactly `records`.
    ///
    /// Duplicate ids make the dataset malformed.
    pub fn new(records: Vec<ReviewRequest>) -> Self {
        let dataset = match duplicate_id(&records) {
            Some(id) => Dataset::Malformed(format!("duplicate id {id}")),
            None => Dataset::Records(records),
        };
        Self::from_dataset(dataset)
    }

    /// Repository seeded with the built-in sample data.
    pub fn sample() -> Self {
        Self::new(rdesk_core::sample::records())
    }

    /// Repository seeded from a parsed fixture. Anything other than an
    /// array of review requests yields a malformed repository.
    pub fn from_json(value: Value) -> Self {
        let Value::Array(items) = value else {
            return Self::from_dataset(Dataset::Malformed(format!(
                "expected a JSON array, found {}",
                json_kind(&value)
            )));
        };
        let parsed: Result<Vec<ReviewRequest>, _> = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).map_err(|e| format!("record {i}: {e}"))
            })
            .collect();
        match parsed {
            Ok(records) => Self::new(records),
            Err(reason) => Self::from_dataset(Dataset::Malformed(reason)),
        }
    }

    /// Repository seeded from fixture text. Unparseable text yields a
    /// malformed repository.
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_json(value),
            Err(e) => Self::from_dataset(Dataset::Malformed(format!("invalid JSON: {e}"))),
        }
    }

    /// Repository seeded from a fixture file. Only a read failure is an
    /// error; bad content yields a malformed repository.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let repo = Self::from_json_str(&text);
        if let Dataset::Malformed(reason) = &*repo.data.read() {
            tracing::warn!(path = %path.display(), %reason, "review request fixture is malformed");
        }
        Ok(repo)
    }

    fn from_dataset(dataset: Dataset) -> Self {
        Self {
            data: Arc::new(RwLock::new(dataset)),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::sample()
    }
}

impl ReviewRepository for InMemoryRepository {
    fn list(&self, filter: &ReviewFilter) -> Result<Vec<ReviewRequest>, RepositoryError> {
        match &*self.data.read() {
            Dataset::Records(records) => Ok(filter.apply(records)),
            Dataset::Malformed(reason) => Err(RepositoryError::Malformed(reason.clone())),
        }
    }

    fn create(
        &self,
        request: NewReviewRequest,
        created_at: NaiveDate,
    ) -> Result<ReviewRequest, RepositoryError> {
        let mut guard = self.data.write();
        let records = match &mut *guard {
            Dataset::Records(records) => records,
            Dataset::Malformed(reason) => return Err(RepositoryError::Malformed(reason.clone())),
        };

        // count + 1, stepping past ids a fixture may already use.
        let mut next = records.len() + 1;
        while records.iter().any(|r| r.id == next.to_string()) {
            next += 1;
        }

        let record = request.into_record(next.to_string(), created_at);
        records.push(record.clone());
        Ok(record)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        match &*self.data.read() {
            Dataset::Records(records) => Ok(records.len()),
            Dataset::Malformed(reason) => Err(RepositoryError::Malformed(reason.clone())),
        }
    }
}

fn duplicate_id(records: &[ReviewRequest]) -> Option<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.id.as_str())
        .find(|id| !seen.insert(*id))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdesk_core::{DocumentType, Priority, Status};
    use std::io::Write;

    fn submission(client: &str) -> NewReviewRequest {
        NewReviewRequest {
            client_name: client.to_string(),
            document_title: "New Brochure".to_string(),
            document_type: DocumentType::FinancialPromotion,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()
    }

    #[test]
    fn sample_lists_five_records_in_order() {
        let repo = InMemoryRepository::sample();
        let records = repo.list(&ReviewFilter::default()).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn create_assigns_count_plus_one_and_pending() {
        let repo = InMemoryRepository::sample();
        let record = repo.create(submission("Coral"), today()).unwrap();
        assert_eq!(record.id, "6");
        assert_eq!(record.status, Status::Pending);
        assert_eq!(record.created_at, today());
        assert_eq!(repo.count().unwrap(), 6);

        let next = repo.create(submission("Birch"), today()).unwrap();
        assert_eq!(next.id, "7");
    }

    #[test]
    fn create_skips_ids_already_taken() {
        let mut records = rdesk_core::sample::records();
        records.truncate(2);
        records[1].id = "3".to_string();
        let repo = InMemoryRepository::new(records);
        let record = repo.create(submission("Coral"), today()).unwrap();
        assert_eq!(record.id, "4");
    }

    #[test]
    fn clones_share_the_same_data() {
        let repo = InMemoryRepository::sample();
        let other = repo.clone();
        repo.create(submission("Coral"), today()).unwrap();
        assert_eq!(other.count().unwrap(), 6);
    }

    #[test]
    fn non_array_json_is_malformed() {
        let repo = InMemoryRepository::from_json(serde_json::json!({ "records": [] }));
        assert!(matches!(
            repo.list(&ReviewFilter::default()),
            Err(RepositoryError::Malformed(_))
        ));
        assert!(!repo.is_available());
        assert!(repo.create(submission("Coral"), today()).is_err());
    }

    #[test]
    fn null_fixture_is_malformed() {
        let repo = InMemoryRepository::from_json(Value::Null);
        let err = repo.count().unwrap_err();
        assert!(err.to_string().contains("found null"), "got: {err}");
    }

    #[test]
    fn bad_record_is_malformed() {
        let repo = InMemoryRepository::from_json(serde_json::json!([{ "id": "1" }]));
        let err = repo.count().unwrap_err();
        assert!(err.to_string().contains("record 0"), "got: {err}");
    }

    #[test]
    fn duplicate_ids_are_malformed() {
        let mut records = rdesk_core::sample::records();
        records[1].id = "1".to_string();
        assert!(!InMemoryRepository::new(records).is_available());
    }

    #[test]
    fn fixture_round_trips_through_file() {
        let json = serde_json::to_string(&rdesk_core::sample::records()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let repo = InMemoryRepository::from_path(file.path()).unwrap();
        assert_eq!(repo.count().unwrap(), 5);
    }

    #[test]
    fn unreadable_fixture_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = InMemoryRepository::from_path(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn invalid_fixture_text_loads_as_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let repo = InMemoryRepository::from_path(file.path()).unwrap();
        assert!(!repo.is_available());
    }
}
