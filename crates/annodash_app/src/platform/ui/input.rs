use annodash_core::{AppViewModel, Msg, RowAction};

use super::constants::*;

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
    /// Not understood or not applicable; the text explains why.
    Rejected(String),
}

/// Parses one input line against the view the user is looking at.
///
/// Row numbers resolve through the rendered rows, so the resulting message
/// carries the row's own id. Blank lines yield `None`.
pub fn parse_command(line: &str, view: &AppViewModel) -> Option<InputCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return None;
    }
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        CMD_RELOAD => InputCommand::Dispatch(vec![Msg::ReloadClicked]),
        CMD_UPDATE => row_action(view, rest, CMD_UPDATE, |action| {
            matches!(action, RowAction::Update { .. })
        }),
        CMD_DELETE => row_action(view, rest, CMD_DELETE, |action| {
            matches!(action, RowAction::Delete { .. })
        }),
        CMD_CONFIRM => InputCommand::Dispatch(vec![Msg::DeleteConfirmed]),
        CMD_CANCEL => InputCommand::Dispatch(vec![Msg::DeleteCancelled]),
        CMD_NEXT => InputCommand::Dispatch(vec![Msg::NextPage]),
        CMD_PREV => InputCommand::Dispatch(vec![Msg::PreviousPage]),
        CMD_SEARCH => InputCommand::Dispatch(vec![
            Msg::SearchInputChanged(rest.to_string()),
            Msg::SearchSubmitted,
        ]),
        CMD_ABSTRACTS => InputCommand::Dispatch(vec![Msg::CatalogRequested]),
        CMD_DISMISS => InputCommand::Dispatch(vec![Msg::BannerDismissed]),
        CMD_HELP => InputCommand::Help,
        CMD_QUIT | "exit" => InputCommand::Quit,
        other => InputCommand::Rejected(format!("unknown command `{other}`; type `help`")),
    };
    Some(command)
}

fn row_action(
    view: &AppViewModel,
    arg: &str,
    name: &str,
    accepts: impl Fn(&RowAction) -> bool,
) -> InputCommand {
    let Ok(position) = arg.trim().parse::<usize>() else {
        return InputCommand::Rejected(format!("usage: {name} <row>"));
    };
    let Some(row) = view.tasks.row_at(position) else {
        return InputCommand::Rejected(format!("row {position} is not on this page"));
    };
    if !accepts(&row.action) {
        return InputCommand::Rejected(format!("row {position} has no {name} control"));
    }
    match row.action.activate() {
        Some(msg) => InputCommand::Dispatch(vec![msg]),
        None => InputCommand::Rejected(format!("row {position} has no {name} control")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annodash_core::{TaskRowView, TaskTableView};
    use pretty_assertions::assert_eq;

    fn row(position: usize, id: &str, action: RowAction) -> TaskRowView {
        TaskRowView {
            position,
            id: id.to_string(),
            project: "NER".to_string(),
            date: "2021-05-16".to_string(),
            submitted_by: "ana".to_string(),
            description: "d".to_string(),
            task_id: "---".to_string(),
            upload_name: "u".to_string(),
            status: "RUNNING".to_string(),
            action,
        }
    }

    fn view() -> AppViewModel {
        AppViewModel {
            tasks: TaskTableView {
                rows: vec![
                    row(0, "a", RowAction::Placeholder),
                    row(
                        1,
                        "b",
                        RowAction::Update {
                            id: "b".to_string(),
                        },
                    ),
                    row(
                        2,
                        "c",
                        RowAction::Delete {
                            id: "c".to_string(),
                        },
                    ),
                ],
                ids: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                total: 3,
                page_count: 1,
                loaded: true,
                ..TaskTableView::default()
            },
            ..AppViewModel::default()
        }
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("\n", &view()), None);
        assert_eq!(parse_command("   \r\n", &view()), None);
    }

    #[test]
    fn update_resolves_row_to_its_id() {
        assert_eq!(
            parse_command("update 1\n", &view()),
            Some(InputCommand::Dispatch(vec![Msg::UpdateClicked {
                id: "b".to_string()
            }]))
        );
    }

    #[test]
    fn update_on_placeholder_row_is_rejected() {
        assert!(matches!(
            parse_command("update 0", &view()),
            Some(InputCommand::Rejected(_))
        ));
        assert!(matches!(
            parse_command("update 9", &view()),
            Some(InputCommand::Rejected(_))
        ));
        assert!(matches!(
            parse_command("update x", &view()),
            Some(InputCommand::Rejected(_))
        ));
    }

    #[test]
    fn delete_only_on_rows_offering_it() {
        assert_eq!(
            parse_command("delete 2", &view()),
            Some(InputCommand::Dispatch(vec![Msg::DeleteClicked {
                id: "c".to_string()
            }]))
        );
        assert!(matches!(
            parse_command("delete 1", &view()),
            Some(InputCommand::Rejected(_))
        ));
    }

    #[test]
    fn search_keeps_query_as_typed() {
        assert_eq!(
            parse_command("search  abc \n", &view()),
            Some(InputCommand::Dispatch(vec![
                Msg::SearchInputChanged(" abc ".to_string()),
                Msg::SearchSubmitted,
            ]))
        );
        assert_eq!(
            parse_command("search", &view()),
            Some(InputCommand::Dispatch(vec![
                Msg::SearchInputChanged(String::new()),
                Msg::SearchSubmitted,
            ]))
        );
    }

    #[test]
    fn simple_commands() {
        assert_eq!(
            parse_command("RELOAD", &view()),
            Some(InputCommand::Dispatch(vec![Msg::ReloadClicked]))
        );
        assert_eq!(parse_command("quit", &view()), Some(InputCommand::Quit));
        assert_eq!(parse_command("help", &view()), Some(InputCommand::Help));
        assert!(matches!(
            parse_command("frobnicate", &view()),
            Some(InputCommand::Rejected(_))
        ));
    }
}
