//! `rdesk browse`: an interactive session over a [`ListView`].
//!
//! Query commands (`search`, `filter`) trigger a re-fetch. Sorting and
//! status edits work on the local copy only and are lost on the next fetch.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use clap::Args;
use rdesk_core::{FilterField, ListView, SortKey, Status};

use crate::client::ReviewClient;
use crate::table;

const HELP: &str = "\
Commands:
  search <term>              search client name and title (blank clears)
  filter <field> <value|all> field: status, priority, type, client, title
  sort <column>              sort by a column; repeat to flip direction
  edit <id>                  start editing a row's status
  draft <status>             Pending, In Review or Completed
  save                       keep the draft status locally
  cancel                     discard the draft
  show                       print the table, re-fetching after a failure
  help                       print this text
  quit                       leave";

/// Arguments for `rdesk browse`.
#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Initial search term.
    #[arg(long)]
    pub search: Option<String>,
}

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Filter(FilterField, Option<String>),
    Sort(SortKey),
    Edit(String),
    Draft(Status),
    Save,
    Cancel,
    Show,
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (type `help` for commands)", self.0)
    }
}

impl FromStr for BrowseCommand {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let err = |msg: String| UnknownCommand(msg);

        match word.to_lowercase().as_str() {
            "search" => Ok(Self::Search(rest.to_string())),
            "filter" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((f, v)) => (f, v.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(err("usage: filter <field> <value|all>".into()));
                }
                let field = field.parse::<FilterField>().map_err(err)?;
                let value = Some(value.to_string()).filter(|v| !v.is_empty());
                Ok(Self::Filter(field, value))
            }
            "sort" => rest.parse::<SortKey>().map(Self::Sort).map_err(err),
            "edit" if !rest.is_empty() => Ok(Self::Edit(rest.to_string())),
            "edit" => Err(err("usage: edit <id>".into())),
            "draft" => rest
                .parse::<Status>()
                .map(Self::Draft)
                .map_err(|e| err(e.to_string())),
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "show" | "ls" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(err(format!("unknown command: {other}"))),
        }
    }
}

/// Fetch when the query changed since the last result. Every failure
/// reads the same to the user; the cause goes to the log.
pub async fn refresh(client: &ReviewClient, view: &mut ListView) {
    if !view.needs_fetch() {
        return;
    }
    match client.list(view.query()).await {
        Ok(records) => view.loaded(records),
        Err(e) => {
            tracing::warn!(error = %e, "fetch failed");
            view.failed();
        }
    }
}

/// Run a session reading commands from `input` until `quit` or end of
/// input.
pub async fn run_browse(
    args: &BrowseArgs,
    client: &ReviewClient,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let mut view = ListView::new();
    if let Some(term) = &args.search {
        view.set_search(term);
    }
    refresh(client, &mut view).await;
    writeln!(out, "{}", table::render(&view))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<BrowseCommand>() {
            Ok(c) => c,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        if command == BrowseCommand::Quit {
            break;
        }
        apply(client, &mut view, command, out).await?;
    }
    Ok(0)
}

async fn apply(
    client: &ReviewClient,
    view: &mut ListView,
    command: BrowseCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        BrowseCommand::Search(term) => {
            view.set_search(&term);
            refresh(client, view).await;
            writeln!(out, "{}", table::render(view))?;
        }
        BrowseCommand::Filter(field, value) => {
            view.set_filter(field, value.as_deref());
            refresh(client, view).await;
            writeln!(out, "{}", table::render(view))?;
        }
        BrowseCommand::Sort(key) => {
            view.sort_by(key);
            writeln!(out, "{}", table::render(view))?;
        }
        BrowseCommand::Edit(id) => match view.begin_edit(&id) {
            Ok(status) => writeln!(out, "Editing {id}: status {status}")?,
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        BrowseCommand::Draft(status) => match view.set_draft(status) {
            Ok(()) => writeln!(out, "Draft status: {status}")?,
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        BrowseCommand::Save => match view.save_edit() {
            Ok(change) => {
                tracing::info!(id = %change.id, from = %change.from, to = %change.to, "status edited locally");
                writeln!(
                    out,
                    "Status of {} changed from {} to {}.",
                    change.id, change.from, change.to
                )?;
                writeln!(out, "{}", table::render(view))?;
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        BrowseCommand::Cancel => match view.cancel_edit() {
            Ok(()) => writeln!(out, "Edit cancelled.")?,
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        BrowseCommand::Show => {
            view.retry();
            refresh(client, view).await;
            writeln!(out, "{}", table::render(view))?;
        }
        BrowseCommand::Help => writeln!(out, "{HELP}")?,
        BrowseCommand::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<BrowseCommand, UnknownCommand> {
        line.parse()
    }

    #[test]
    fn parses_query_commands() {
        assert_eq!(
            parse("search  acme fin "),
            Ok(BrowseCommand::Search("acme fin".into()))
        );
        assert_eq!(parse("search"), Ok(BrowseCommand::Search(String::new())));
        assert_eq!(
            parse("filter type Financial Promotion"),
            Ok(BrowseCommand::Filter(
                FilterField::DocumentType,
                Some("Financial Promotion".into())
            ))
        );
        assert_eq!(
            parse("filter status"),
            Ok(BrowseCommand::Filter(FilterField::Status, None))
        );
    }

    #[test]
    fn parses_sort_and_edit_commands() {
        assert_eq!(parse("sort due-date"), Ok(BrowseCommand::Sort(SortKey::DueDate)));
        assert_eq!(parse("EDIT 3"), Ok(BrowseCommand::Edit("3".into())));
        assert_eq!(
            parse("draft in review"),
            Ok(BrowseCommand::Draft(Status::InReview))
        );
        assert_eq!(parse("save"), Ok(BrowseCommand::Save));
        assert_eq!(parse("q"), Ok(BrowseCommand::Quit));
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse("frobnicate").is_err());
        assert!(parse("edit").is_err());
        assert!(parse("filter").is_err());
        assert!(parse("filter owner x").is_err());
        assert!(parse("sort owner").is_err());
        assert!(parse("draft Archived").is_err());
    }
}
