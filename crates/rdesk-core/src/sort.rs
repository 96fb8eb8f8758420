//! # Sort Comparators
//!
//! One active sort key and direction at a time. Selecting the active key
//! again flips the direction; selecting another key switches to it in
//! ascending order.
//!
//! Dates compare as calendar dates, `priority` and `status` by their
//! workflow rank, everything else as case-insensitive text. When either side
//! lacks a value the pair compares equal, and since sorting is stable such
//! rows keep their relative order.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::request::{fields, ReviewRequest};

/// A sortable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// `id`, compared as text.
    Id,
    /// `clientName`
    ClientName,
    /// `documentTitle`
    DocumentTitle,
    /// `documentType`, by label.
    DocumentType,
    /// `priority`, by rank.
    Priority,
    /// `dueDate`
    DueDate,
    /// `notes`; a missing value compares equal to anything.
    Notes,
    /// `status`, by rank.
    Status,
    /// `createdAt`
    #[default]
    CreatedAt,
}

impl SortKey {
    /// Every key, in table column order.
    pub fn all() -> &'static [SortKey] {
        &[
            Self::Id,
            Self::ClientName,
            Self::DocumentTitle,
            Self::DocumentType,
            Self::Priority,
            Self::DueDate,
            Self::Notes,
            Self::Status,
            Self::CreatedAt,
        ]
    }

    /// Wire name of the field.
    pub fn field(self) -> &'static str {
        match self {
            Self::Id => fields::ID,
            Self::ClientName => fields::CLIENT_NAME,
            Self::DocumentTitle => fields::DOCUMENT_TITLE,
            Self::DocumentType => fields::DOCUMENT_TYPE,
            Self::Priority => fields::PRIORITY,
            Self::DueDate => fields::DUE_DATE,
            Self::Notes => fields::NOTES,
            Self::Status => fields::STATUS,
            Self::CreatedAt => fields::CREATED_AT,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts the wire name in any case, with or without `-`/`_`
    /// separators: `dueDate`, `due-date`, `DUE_DATE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s);
        Self::all()
            .iter()
            .copied()
            .find(|k| fold(k.field()) == folded)
            .ok_or_else(|| format!("unknown sort key: {s}"))
    }
}

fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Active sort key and direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    /// Field being sorted on.
    pub key: SortKey,
    /// Order applied to that field.
    pub direction: SortDirection,
}

impl SortState {
    /// A sort on `key` in the given direction.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header click: flip on the active key, otherwise switch key and
    /// reset to ascending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }

    /// Compare two records under this state.
    pub fn compare(&self, a: &ReviewRequest, b: &ReviewRequest) -> Ordering {
        let ordering = compare_by(self.key, a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable in-place sort of records or references to records.
    pub fn sort<R: Borrow<ReviewRequest>>(&self, rows: &mut [R]) {
        rows.sort_by(|a, b| self.compare(a.borrow(), b.borrow()));
    }
}

/// Ascending comparison of one field.
pub fn compare_by(key: SortKey, a: &ReviewRequest, b: &ReviewRequest) -> Ordering {
    match key {
        SortKey::Id => text(&a.id, &b.id),
        SortKey::ClientName => text(&a.client_name, &b.client_name),
        SortKey::DocumentTitle => text(&a.document_title, &b.document_title),
        SortKey::DocumentType => text(a.document_type.label(), b.document_type.label()),
        SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortKey::DueDate => a.due_date.cmp(&b.due_date),
        SortKey::Notes => match (&a.notes, &b.notes) {
            (Some(x), Some(y)) => text(x, y),
            _ => Ordering::Equal,
        },
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
