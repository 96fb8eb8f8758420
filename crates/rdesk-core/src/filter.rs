//! # Filter Engine
//!
//! Narrows a list of review requests by the predicates carried in a
//! [`ReviewFilter`]. Every supplied predicate must hold (logical AND);
//! absent predicates impose nothing. Matching is case-insensitive:
//!
//! | Parameter      | Match                                        |
//! |----------------|----------------------------------------------|
//! | `status`       | exact label                                  |
//! | `documentType` | exact label                                  |
//! | `clientName`   | exact                                        |
//! | `priority`     | exact label                                  |
//! | `documentTitle`| substring                                    |
//! | `search`       | substring of `clientName` OR `documentTitle` |
//!
//! Empty values never constrain. On the four exact-match parameters the
//! value `all` is the "no selection" sentinel sent by filter dropdowns.
//! Values naming nothing in the data simply match nothing; the engine never
//! rejects input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::request::{fields, ReviewRequest};

/// Sentinel meaning "do not filter on this field".
pub const ALL: &str = "all";

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    /// Exact status label, e.g. `pending` or `In Review`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Substring of the document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,
    /// Exact document type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// Exact client name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// Exact priority label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Substring of the client name or the document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// A single filterable field, as named in query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// `status`
    Status,
    /// `documentTitle`
    DocumentTitle,
    /// `documentType`
    DocumentType,
    /// `clientName`
    ClientName,
    /// `priority`
    Priority,
    /// `search`, over client name and title.
    Search,
}

impl FilterField {
    /// Every field, in query-string documentation order.
    pub fn all() -> &'static [FilterField] {
        &[
            Self::Status,
            Self::DocumentTitle,
            Self::DocumentType,
            Self::ClientName,
            Self::Priority,
            Self::Search,
        ]
    }

    /// Query parameter name.
    pub fn param(self) -> &'static str {
        match self {
            Self::Status => fields::STATUS,
            Self::DocumentTitle => fields::DOCUMENT_TITLE,
            Self::DocumentType => fields::DOCUMENT_TYPE,
            Self::ClientName => fields::CLIENT_NAME,
            Self::Priority => fields::PRIORITY,
            Self::Search => "search",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

impl FromStr for FilterField {
    type Err = String;

    /// Accepts the query parameter name (any case) or a short alias
    /// (`title`, `type`, `client`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let field = match lowered.as_str() {
            "title" => Self::DocumentTitle,
            "type" => Self::DocumentType,
            "client" => Self::ClientName,
            other => Self::all()
                .iter()
                .copied()
                .find(|f| f.param().to_lowercase() == other)
                .ok_or_else(|| format!("unknown filter field: {s}"))?,
        };
        Ok(field)
    }
}

impl ReviewFilter {
    /// Build a filter from decoded query pairs.
    ///
    /// Unknown keys are ignored. A repeated key keeps its first value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let Some(field) = FilterField::all()
                .iter()
                .copied()
                .find(|f| f.param() == key.as_ref())
            else {
                continue;
            };
            let slot = filter.slot_mut(field);
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        filter
    }

    /// Current value of one field.
    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Status => self.status.as_deref(),
            FilterField::DocumentTitle => self.document_title.as_deref(),
            FilterField::DocumentType => self.document_type.as_deref(),
            FilterField::ClientName => self.client_name.as_deref(),
            FilterField::Priority => self.priority.as_deref(),
            FilterField::Search => self.search.as_deref(),
        }
    }

    /// Replace one field. `None` clears it.
    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Status => &mut self.status,
            FilterField::DocumentTitle => &mut self.document_title,
            FilterField::DocumentType => &mut self.document_type,
            FilterField::ClientName => &mut self.client_name,
            FilterField::Priority => &mut self.priority,
            FilterField::Search => &mut self.search,
        }
    }

    /// True when no field constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        Predicate::compile(self).is_unconstrained()
    }

    /// Records satisfying every supplied predicate, in input order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<ReviewRequest>
    where
        I: IntoIterator<Item = &'a ReviewRequest>,
    {
        let predicate = Predicate::compile(self);
        records
            .into_iter()
            .filter(|r| predicate.matches(r))
            .cloned()
            .collect()
    }
}

/// Lower-cased needles, computed once per query.
struct Predicate {
    status: Option<String>,
    document_title: Option<String>,
    document_type: Option<String>,
    client_name: Option<String>,
    priority: Option<String>,
    search: Option<String>,
}

impl Predicate {
    fn compile(filter: &ReviewFilter) -> Self {
        Self {
            status: exact(&filter.status),
            document_title: substring(&filter.document_title),
            document_type: exact(&filter.document_type),
            client_name: exact(&filter.client_name),
            priority: exact(&filter.priority),
            search: substring(&filter.search),
        }
    }

    fn is_unconstrained(&self) -> bool {
        self.status.is_none()
            && self.document_title.is_none()
            && self.document_type.is_none()
            && self.client_name.is_none()
            && self.priority.is_none()
            && self.search.is_none()
    }

    fn matches(&self, r: &ReviewRequest) -> bool {
        equals(&self.status, r.status.label())
            && contains(&self.document_title, &r.document_title)
            && equals(&self.document_type, r.document_type.label())
            && equals(&self.client_name, &r.client_name)
            && equals(&self.priority, r.priority.label())
            && self.search.as_ref().map_or(true, |needle| {
                r.client_name.to_lowercase().contains(needle.as_str())
                    || r.document_title.to_lowercase().contains(needle.as_str())
            })
    }
}

fn exact(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
        .map(str::to_lowercase)
}

fn substring(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn equals(needle: &Option<String>, field: &str) -> bool {
    needle
        .as_ref()
        .map_or(true, |n| field.to_lowercase() == *n)
}

fn contains(needle: &Option<String>, field: &str) -> bool {
    needle
        .as_ref()
        .map_or(true, |n| field.to_lowercase().contains(n.as_str()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::request::{DocumentType, Priority, Status};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    const CLIENTS: &[&str] = &["Acme Financial", "Birch Investments", "Coral Capital"];
    const TITLES: &[&str] = &["Fund Factsheet", "Press Release", "Risk Review", "DDQ 2025"];

    fn record() -> impl Strategy<Value = ReviewRequest> {
        (
            prop::sample::select(CLIENTS),
            prop::sample::select(TITLES),
            prop::sample::select(DocumentType::all()),
            prop::sample::select(Priority::all()),
            prop::sample::select(Status::all()),
        )
            .prop_map(|(client, title, document_type, priority, status)| ReviewRequest {
                id: String::new(),
                client_name: client.to_string(),
                document_title: title.to_string(),
                document_type,
                priority,
                due_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                notes: None,
                status,
                created_at: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            })
    }

    /// A value drawn from the data vocabulary, re-cased at random, or one of
    /// the non-constraining sentinels.
    fn value(vocab: Vec<&'static str>) -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("ALL".to_string())),
            Just(Some("nothing-matches".to_string())),
            (prop::sample::select(vocab), any::<bool>()).prop_map(|(v, upper)| {
                Some(if upper { v.to_uppercase() } else { v.to_lowercase() })
            }),
        ]
    }

    fn filter() -> impl Strategy<Value = ReviewFilter> {
        let statuses: Vec<&str> = Status::all().iter().map(|s| s.label()).collect();
        let types: Vec<&str> = DocumentType::all().iter().map(|t| t.label()).collect();
        let priorities: Vec<&str> = Priority::all().iter().map(|p| p.label()).collect();
        (
            value(statuses),
            value(vec!["fund", "press", "review", "ddq"]),
            value(types),
            value(CLIENTS.to_vec()),
            value(priorities),
        )
            .prop_map(|(status, document_title, document_type, client_name, priority)| {
                ReviewFilter {
                    status,
                    document_title,
                    document_type,
                    client_name,
                    priority,
                    search: None,
                }
            })
    }

    fn active(v: &Option<String>, sentinel_all: bool) -> Option<String> {
        match v.as_deref() {
            None | Some("") => None,
            Some(s) if sentinel_all && s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(s.to_lowercase()),
        }
    }

    /// Independent statement of the AND-of-predicates contract.
    fn satisfies(f: &ReviewFilter, r: &ReviewRequest) -> bool {
        let eq = |v: &Option<String>, field: &str| {
            active(v, true).map_or(true, |n| field.to_lowercase() == n)
        };
        eq(&f.status, r.status.label())
            && eq(&f.document_type, r.document_type.label())
            && eq(&f.client_name, &r.client_name)
            && eq(&f.priority, r.priority.label())
            && active(&f.document_title, false)
                .map_or(true, |n| r.document_title.to_lowercase().contains(&n))
    }

    proptest! {
        /// Exactly the satisfying records come back, in their original order.
        #[test]
        fn result_is_the_ordered_satisfying_subset(
            records in prop::collection::vec(record(), 0..24),
            filter in filter(),
        ) {
            let expected: Vec<ReviewRequest> = records
                .iter()
                .filter(|r| satisfies(&filter, r))
                .cloned()
                .collect();
            prop_assert_eq!(filter.apply(&records), expected);
        }

        /// Adding a constraint never grows the result.
        #[test]
        fn adding_a_filter_only_narrows(
            records in prop::collection::vec(record(), 0..24),
            filter in filter(),
            status in prop::sample::select(Status::all()),
        ) {
            let mut wider = filter.clone();
            wider.status = None;
            let mut narrower = wider.clone();
            narrower.status = Some(status.label().to_string());
            let wide = wider.apply(&records);
            let narrow = narrower.apply(&records);
            prop_assert!(narrow.len() <= wide.len());
            prop_assert!(narrow.iter().all(|r| r.status == status));
        }
    }
}
