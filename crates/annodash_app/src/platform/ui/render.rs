use annodash_core::{
    AbstractEntry, AppViewModel, BannerKind, BannerPhase, BannerView, SearchPanel, TaskRowView,
};

use super::constants::*;

/// Renders the whole dashboard as text lines.
///
/// `refreshed_at` is the wall-clock label of the last applied task load.
pub fn render(view: &AppViewModel, refreshed_at: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(banner) = &view.banner {
        lines.push(banner_line(banner));
    }
    if view.loading {
        lines.push("[ loading... ]".to_string());
    }

    lines.push(section_title("Uploaded annotations"));
    lines.push(table_summary(view, refreshed_at));
    if let Some(error) = &view.tasks.error {
        lines.push(format!("! could not load tasks: {error}"));
    }
    if view.tasks.loaded {
        let rows: Vec<Vec<String>> = view.tasks.rows.iter().map(task_cells).collect();
        lines.extend(format_table(&TASK_COLUMNS, &rows));
        if view.tasks.rows.is_empty() {
            lines.push("No data available in table".to_string());
        }
    }
    if let Some(id) = &view.pending_delete {
        lines.push(format!(
            "Delete task {id}? Type `{CMD_CONFIRM}` to confirm or `{CMD_CANCEL}` to cancel."
        ));
    }

    lines.push(String::new());
    lines.push(section_title("Abstract search"));
    if !view.search.query.is_empty() {
        lines.push(format!("Query: {}", view.search.query));
    }
    match &view.search.panel {
        SearchPanel::Hidden => {}
        SearchPanel::Found(found) => {
            lines.push(format!("Row UID:     {}", found.row_uid));
            lines.push(format!("External ID: {}", found.external_id));
        }
        SearchPanel::NotFound => lines.push("No abstract found for this identifier.".to_string()),
    }
    if let Some(catalog) = &view.search.catalog {
        lines.push(format!("{} known abstracts", catalog.len()));
        let rows: Vec<Vec<String>> = catalog.iter().map(catalog_cells).collect();
        lines.extend(format_table(&["Row data", "UID", "External ID"], &rows));
    }

    lines
}

fn section_title(title: &str) -> String {
    format!("== {title} ==")
}

fn table_summary(view: &AppViewModel, refreshed_at: Option<&str>) -> String {
    let tasks = &view.tasks;
    if !tasks.loaded {
        return "Tasks not loaded yet.".to_string();
    }
    let mut summary = format!(
        "{} task(s), page {}/{}",
        tasks.total,
        tasks.page + 1,
        tasks.page_count
    );
    if let Some(at) = refreshed_at {
        summary.push_str(&format!(", refreshed {at}"));
    }
    summary
}

fn banner_line(banner: &BannerView) -> String {
    let tag = match banner.kind {
        BannerKind::Danger => "ERROR",
        BannerKind::Info => "INFO",
    };
    let suffix = match banner.phase {
        BannerPhase::Fading => " (closing)",
        BannerPhase::Visible | BannerPhase::Hidden => "",
    };
    format!("[{tag}] {}{suffix}   (`{CMD_DISMISS}` to close)", banner.message)
}

fn task_cells(row: &TaskRowView) -> Vec<String> {
    vec![
        row.position.to_string(),
        row.project.clone(),
        row.date.clone(),
        row.submitted_by.clone(),
        row.description.clone(),
        row.task_id.clone(),
        row.upload_name.clone(),
        row.status.clone(),
        row.action.label().to_string(),
    ]
}

fn catalog_cells(entry: &AbstractEntry) -> Vec<String> {
    vec![
        entry.row_data.clone(),
        entry.uid.clone(),
        entry.external_id.clone(),
    ]
}

fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count().min(MAX_CELL_WIDTH));
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_row(&cells, &widths));
    }
    lines
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(&truncate(cell), *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use annodash_core::{AbstractMatch, RowAction, SearchView, TaskTableView};

    fn row(position: usize, status: &str, action: RowAction) -> TaskRowView {
        TaskRowView {
            position,
            id: format!("id{position}"),
            project: "NER".to_string(),
            date: "2021-05-16 12:00:00".to_string(),
            submitted_by: "ana".to_string(),
            description: "a very long description that will not fit in a cell".to_string(),
            task_id: "---".to_string(),
            upload_name: "NER_ana".to_string(),
            status: status.to_string(),
            action,
        }
    }

    fn loaded_view(rows: Vec<TaskRowView>) -> AppViewModel {
        AppViewModel {
            tasks: TaskTableView {
                total: rows.len(),
                ids: rows.iter().map(|r| r.id.clone()).collect(),
                rows,
                page_count: 1,
                loaded: true,
                ..TaskTableView::default()
            },
            ..AppViewModel::default()
        }
    }

    #[test]
    fn actions_column_shows_update_or_placeholder() {
        let view = loaded_view(vec![
            row(
                0,
                "RUNNING",
                RowAction::Update {
                    id: "id0".to_string(),
                },
            ),
            row(1, "FINISHED", RowAction::Placeholder),
        ]);
        let lines = render(&view, Some("12:00:01"));

        assert!(lines.iter().any(|l| l.contains("2 task(s), page 1/1, refreshed 12:00:01")));
        let running = lines.iter().find(|l| l.contains("RUNNING")).unwrap();
        assert!(running.ends_with("update"));
        let finished = lines.iter().find(|l| l.contains("FINISHED")).unwrap();
        assert!(finished.ends_with("----"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let view = loaded_view(vec![row(0, "FINISHED", RowAction::Placeholder)]);
        let lines = render(&view, None);
        let data = lines.iter().find(|l| l.contains("FINISHED")).unwrap();
        assert!(data.contains('…'));
        assert!(!data.contains("fit in a cell"));
    }

    #[test]
    fn empty_table_and_loading_state() {
        let mut view = loaded_view(Vec::new());
        view.loading = true;
        let lines = render(&view, None);
        assert_eq!(lines[0], "[ loading... ]");
        assert!(lines.iter().any(|l| l == "No data available in table"));
    }

    #[test]
    fn search_panels_render_exact_values() {
        let mut view = AppViewModel::default();
        view.search = SearchView {
            query: "12345".to_string(),
            panel: SearchPanel::Found(AbstractMatch {
                row_uid: "1".to_string(),
                external_id: "2".to_string(),
            }),
            catalog: None,
        };
        let lines = render(&view, None);
        assert!(lines.iter().any(|l| l == "Row UID:     1"));
        assert!(lines.iter().any(|l| l == "External ID: 2"));
        assert!(!lines.iter().any(|l| l.starts_with("No abstract found")));

        view.search.panel = SearchPanel::NotFound;
        let lines = render(&view, None);
        assert!(lines.iter().any(|l| l.starts_with("No abstract found")));
        assert!(!lines.iter().any(|l| l.starts_with("Row UID")));
    }

    #[test]
    fn banner_styles_follow_kind() {
        let mut view = AppViewModel::default();
        view.banner = Some(BannerView {
            kind: BannerKind::Danger,
            message: "bad input".to_string(),
            phase: BannerPhase::Visible,
        });
        assert!(render(&view, None)[0].starts_with("[ERROR] bad input"));

        view.banner = Some(BannerView {
            kind: BannerKind::Info,
            message: "done".to_string(),
            phase: BannerPhase::Fading,
        });
        let first = &render(&view, None)[0];
        assert!(first.starts_with("[INFO] done (closing)"));
    }
}
