//! `rdesk list`: fetch with filters and print the table.

use std::io::Write;

use clap::Args;
use rdesk_core::{FilterField, ListView, SortDirection, SortKey, SortState};

use crate::client::ReviewClient;
use crate::table;

/// Arguments for `rdesk list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Status label, e.g. `Pending` or `In Review`.
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub document_type: Option<String>,

    /// Exact client name.
    #[arg(long)]
    pub client: Option<String>,

    /// Substring of the document title.
    #[arg(long)]
    pub title: Option<String>,

    /// Substring of client name or document title.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort column, e.g. `priority` or `due-date`. Defaults to `created-at`.
    #[arg(long)]
    pub sort: Option<SortKey>,

    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    #[arg(long)]
    pub desc: bool,
}

impl ListArgs {
    /// Sort requested on the command line. A named key without a direction
    /// sorts ascending, as a header click would.
    fn sort_state(&self) -> SortState {
        let key = self.sort.unwrap_or_default();
        let direction = if self.asc {
            SortDirection::Asc
        } else if self.desc || self.sort.is_none() {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortState::new(key, direction)
    }

    /// View with these selections applied, ready to fetch.
    pub fn view(&self) -> ListView {
        let mut view = ListView::new();
        let selections = [
            (FilterField::Status, &self.status),
            (FilterField::Priority, &self.priority),
            (FilterField::DocumentType, &self.document_type),
            (FilterField::ClientName, &self.client),
            (FilterField::DocumentTitle, &self.title),
        ];
        for (field, value) in selections {
            view.set_filter(field, value.as_deref());
        }
        if let Some(term) = &self.search {
            view.set_search(term);
        }
        view.set_sort(self.sort_state());
        view
    }
}

/// Run `rdesk list`. Exit code 1 when the fetch fails.
pub async fn run_list(
    args: &ListArgs,
    client: &ReviewClient,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let mut view = args.view();
    crate::browse::refresh(client, &mut view).await;
    writeln!(out, "{}", table::render(&view))?;
    Ok(match view.load_state() {
        rdesk_core::LoadState::Failed(_) => 1,
        _ => 0,
    })
}
