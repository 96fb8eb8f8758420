//! # List View State
//!
//! Client-held copy of fetched review requests plus the transient state of
//! a listing screen: filter selections, the search term, the active sort,
//! and the row being edited.
//!
//! Filtering is not done here. [`ListView::query`] hands the selections and
//! search term to the server, and any change to them marks the view as
//! [`LoadState::Loading`] until the caller feeds back a fresh result.
//!
//! Status edits follow `Viewing → Editing → Viewing`. A save writes the draft
//! into the local copy only and returns a [`StatusChange`]; nothing is sent
//! anywhere. Edits are lost when the view reloads.

use crate::error::ViewError;
use crate::filter::{FilterField, ReviewFilter};
use crate::request::{ReviewRequest, Status};
use crate::sort::{SortKey, SortState};

/// Message shown for any failed fetch, whatever the cause.
pub const FETCH_FAILED: &str = "Failed to fetch review requests";

/// Where the current result set stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// A fetch is needed or in flight.
    #[default]
    Loading,
    /// The records match the current query.
    Loaded,
    /// The last fetch failed; carries the user-facing message.
    Failed(String),
}

/// Display mode of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    /// Shows the stored status.
    Viewing,
    /// Carries the uncommitted draft status.
    Editing(Status),
}

/// A committed local status edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Id of the edited row.
    pub id: String,
    /// Status before the save.
    pub from: Status,
    /// Status after the save.
    pub to: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    id: String,
    status: Status,
}

/// State behind a review request listing.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    records: Vec<ReviewRequest>,
    load: LoadState,
    filter: ReviewFilter,
    sort: SortState,
    draft: Option<Draft>,
}

impl ListView {
    /// An empty view waiting for its first fetch.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Fetch lifecycle ------------------------------------------------------

    /// Current fetch state.
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// True when the query changed since the last fetch result.
    pub fn needs_fetch(&self) -> bool {
        self.load == LoadState::Loading
    }

    /// Filter to send to the server, including the search term.
    pub fn query(&self) -> &ReviewFilter {
        &self.filter
    }

    /// Replace the local copy with a fresh result. Any open draft is dropped.
    pub fn loaded(&mut self, records: Vec<ReviewRequest>) {
        self.records = records;
        self.load = LoadState::Loaded;
        self.draft = None;
    }

    /// Record a failed fetch. The cause is not shown; every failure reads
    /// [`FETCH_FAILED`].
    pub fn failed(&mut self) {
        self.records.clear();
        self.load = LoadState::Failed(FETCH_FAILED.to_string());
        self.draft = None;
    }

    /// Ask for another fetch after a failure. Returns whether one is now
    /// needed; a loaded or loading view is left alone.
    pub fn retry(&mut self) -> bool {
        if matches!(self.load, LoadState::Failed(_)) {
            self.load = LoadState::Loading;
        }
        self.needs_fetch()
    }

    // -- Query state ----------------------------------------------------------

    /// Current search term, empty when unset.
    pub fn search_term(&self) -> &str {
        self.filter.search.as_deref().unwrap_or("")
    }

    /// Change the search term. Blank clears it.
    pub fn set_search(&mut self, term: &str) {
        let value = Some(term.trim().to_string()).filter(|t| !t.is_empty());
        self.update_query(FilterField::Search, value);
    }

    /// Change one filter selection. `None`, blank and `all` clear it.
    pub fn set_filter(&mut self, field: FilterField, value: Option<&str>) {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(crate::filter::ALL))
            .map(str::to_string);
        self.update_query(field, value);
    }

    fn update_query(&mut self, field: FilterField, value: Option<String>) {
        if self.filter.get(field) != value.as_deref() {
            self.filter.set(field, value);
            self.load = LoadState::Loading;
        }
    }

    // -- Sorting --------------------------------------------------------------

    /// Active sort key and direction.
    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Column header click.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.select(key);
    }

    /// Set key and direction outright.
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Loaded records under the active sort. Not filtered.
    pub fn rows(&self) -> Vec<&ReviewRequest> {
        let mut rows: Vec<&ReviewRequest> = self.records.iter().collect();
        self.sort.sort(&mut rows);
        rows
    }

    /// Text shown in place of rows when the result is empty.
    pub fn empty_message(&self) -> String {
        format!(
            "Your search {} did not match any review requests.",
            self.search_term()
        )
    }

    // -- Row editing ----------------------------------------------------------

    /// Whether the row with `id` is being edited, and its draft.
    pub fn row_mode(&self, id: &str) -> RowMode {
        match &self.draft {
            Some(d) if d.id == id => RowMode::Editing(d.status),
            _ => RowMode::Viewing,
        }
    }

    /// Id of the row in edit mode, if any.
    pub fn editing(&self) -> Option<&str> {
        self.draft.as_ref().map(|d| d.id.as_str())
    }

    /// Put a row in edit mode with its current status as the draft.
    ///
    /// Only one row edits at a time; a draft open on another row is
    /// discarded.
    pub fn begin_edit(&mut self, id: &str) -> Result<Status, ViewError> {
        let current = self
            .record(id)
            .ok_or_else(|| ViewError::UnknownRow(id.to_string()))?
            .status;
        self.draft = Some(Draft {
            id: id.to_string(),
            status: current,
        });
        Ok(current)
    }

    /// Change the draft status of the row in edit mode.
    pub fn set_draft(&mut self, status: Status) -> Result<(), ViewError> {
        let draft = self.draft.as_mut().ok_or(ViewError::NotEditing)?;
        draft.status = status;
        Ok(())
    }

    /// Commit the draft to the local copy and leave edit mode.
    pub fn save_edit(&mut self) -> Result<StatusChange, ViewError> {
        let draft = self.draft.take().ok_or(ViewError::NotEditing)?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == draft.id)
            .ok_or_else(|| ViewError::UnknownRow(draft.id.clone()))?;
        let change = StatusChange {
            id: draft.id,
            from: record.status,
            to: draft.status,
        };
        record.status = draft.status;
        Ok(change)
    }

    /// Leave edit mode without touching the record.
    pub fn cancel_edit(&mut self) -> Result<(), ViewError> {
        self.draft.take().map(|_| ()).ok_or(ViewError::NotEditing)
    }

    fn record(&self, id: &str) -> Option<&ReviewRequest> {
        self.records.iter().find(|r| r.id == id)
    }
}
