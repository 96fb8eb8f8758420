//! Plain-text rendering of a [`ListView`].

use rdesk_core::{ListView, LoadState, ReviewRequest, RowMode, SortDirection, SortKey};

/// Shown while a fetch is outstanding.
pub const LOADING: &str = "Loading review requests...";

const COLUMNS: [(&str, SortKey); 8] = [
    ("ID", SortKey::Id),
    ("Client", SortKey::ClientName),
    ("Title", SortKey::DocumentTitle),
    ("Type", SortKey::DocumentType),
    ("Priority", SortKey::Priority),
    ("Due Date", SortKey::DueDate),
    ("Status", SortKey::Status),
    ("Created at", SortKey::CreatedAt),
];

/// Render the view: a status line while loading or after a failure, the
/// empty message for an empty result, otherwise the sorted table.
pub fn render(view: &ListView) -> String {
    match view.load_state() {
        LoadState::Loading => LOADING.to_string(),
        LoadState::Failed(message) => format!("Error: {message}"),
        LoadState::Loaded => {
            let rows = view.rows();
            if rows.is_empty() {
                view.empty_message()
            } else {
                render_table(view, &rows)
            }
        }
    }
}

fn render_table(view: &ListView, rows: &[&ReviewRequest]) -> String {
    let sort = view.sort_state();
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(title, key)| {
            if *key == sort.key {
                let arrow = match sort.direction {
                    SortDirection::Asc => '↑',
                    SortDirection::Desc => '↓',
                };
                format!("{title} {arrow}")
            } else {
                (*title).to_string()
            }
        })
        .collect();

    let body: Vec<Vec<String>> = rows.iter().map(|r| cells(view, r)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    out.pop();
    out
}

fn cells(view: &ListView, r: &ReviewRequest) -> Vec<String> {
    let status = match view.row_mode(&r.id) {
        RowMode::Viewing => r.status.to_string(),
        RowMode::Editing(draft) => format!("[{draft}] (editing)"),
    };
    vec![
        r.id.clone(),
        r.client_name.clone(),
        r.document_title.clone(),
        r.document_type.to_string(),
        r.priority.to_string(),
        r.due_date.to_string(),
        status,
        r.created_at.to_string(),
    ]
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}", w = *w))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdesk_core::{sample, Status};

    fn loaded() -> ListView {
        let mut view = ListView::new();
        view.loaded(sample::records());
        view
    }

    #[test]
    fn loading_and_failure_lines() {
        let mut view = ListView::new();
        assert_eq!(render(&view), LOADING);
        view.failed();
        assert_eq!(render(&view), "Error: Failed to fetch review requests");
    }

    #[test]
    fn empty_result_shows_search_term() {
        let mut view = ListView::new();
        view.set_search("nothing");
        view.loaded(vec![]);
        assert_eq!(
            render(&view),
            "Your search nothing did not match any review requests."
        );
    }

    #[test]
    fn table_marks_sort_column_and_orders_rows() {
        let text = render(&loaded());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("Created at ↓"));
        assert!(lines[2].starts_with("4 "));
        assert!(lines[6].starts_with("3 "));
    }

    #[test]
    fn editing_row_shows_draft() {
        let mut view = loaded();
        view.begin_edit("2").unwrap();
        view.set_draft(Status::Completed).unwrap();
        let text = render(&view);
        assert!(text.contains("[Completed] (editing)"));
    }
}
