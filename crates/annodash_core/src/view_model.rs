use crate::{AbstractEntry, BannerKind, BannerPhase, Generation, Msg, SearchPanel};

/// Text shown in the actions column when a row offers no control.
pub const ACTION_PLACEHOLDER: &str = "----";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub tasks: TaskTableView,
    /// Id awaiting delete confirmation.
    pub pending_delete: Option<String>,
    pub search: SearchView,
    /// Loading modal visibility.
    pub loading: bool,
    pub banner: Option<BannerView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskTableView {
    /// Rows on the current page.
    pub rows: Vec<TaskRowView>,
    /// Backend id of every loaded row, indexed by position.
    pub ids: Vec<String>,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
    pub generation: Generation,
    pub loaded: bool,
    pub error: Option<String>,
}

impl TaskTableView {
    /// Looks up a row by its position in the full list.
    pub fn row_at(&self, position: usize) -> Option<&TaskRowView> {
        self.rows.iter().find(|row| row.position == position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub position: usize,
    pub id: String,
    pub project: String,
    pub date: String,
    pub submitted_by: String,
    pub description: String,
    pub task_id: String,
    pub upload_name: String,
    pub status: String,
    pub action: RowAction,
}

/// Control rendered in the actions column. Controls carry the id they act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Update { id: String },
    Delete { id: String },
    Placeholder,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Update { .. } => "update",
            RowAction::Delete { .. } => "delete",
            RowAction::Placeholder => ACTION_PLACEHOLDER,
        }
    }

    /// Message emitted when the control is activated.
    pub fn activate(&self) -> Option<Msg> {
        match self {
            RowAction::Update { id } => Some(Msg::UpdateClicked { id: id.clone() }),
            RowAction::Delete { id } => Some(Msg::DeleteClicked { id: id.clone() }),
            RowAction::Placeholder => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub query: String,
    pub panel: SearchPanel,
    pub catalog: Option<Vec<AbstractEntry>>,
}

impl SearchView {
    pub fn found_visible(&self) -> bool {
        matches!(self.panel, SearchPanel::Found(_))
    }

    pub fn not_found_visible(&self) -> bool {
        matches!(self.panel, SearchPanel::NotFound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub kind: BannerKind,
    pub message: String,
    pub phase: BannerPhase,
}
