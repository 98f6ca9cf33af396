use annodash_logging::dash_debug;

/// Monotonic counter identifying one request cycle (load or lookup).
pub type Generation = u64;

/// Lifecycle state of an upload task as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Finished,
    Failed,
    Deleted,
    /// Any label the dashboard has no special handling for.
    Other(String),
}

impl TaskStatus {
    pub fn from_label(label: &str) -> Self {
        match label {
            "RUNNING" => TaskStatus::Running,
            "FINISHED" => TaskStatus::Finished,
            "FAILED" => TaskStatus::Failed,
            "DELETED" => TaskStatus::Deleted,
            other => TaskStatus::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TaskStatus::Running => "RUNNING",
            TaskStatus::Finished => "FINISHED",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Deleted => "DELETED",
            TaskStatus::Other(label) => label,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TaskStatus::Running)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    /// Backend record id; the key for update and delete calls.
    pub id: String,
    pub project: String,
    pub date: String,
    pub submitted_by: String,
    pub description: String,
    /// Backend job identifier (`---` until the import request is known).
    pub task_id: String,
    pub upload_name: String,
    pub status: TaskStatus,
}

/// Rows of the most recently applied load cycle.
///
/// The row set is only ever replaced wholesale, and only by the load cycle
/// whose generation is current.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct TaskTable {
    rows: Vec<UploadTask>,
    generation: Generation,
    loaded: bool,
    last_error: Option<String>,
}

impl TaskTable {
    /// Starts a new load cycle, invalidating any in-flight one.
    pub(crate) fn begin_load(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation
    }

    /// Returns false when the result belongs to a superseded cycle.
    pub(crate) fn apply_rows(&mut self, generation: Generation, rows: Vec<UploadTask>) -> bool {
        if !self.is_current(generation) {
            dash_debug!(
                "Discarding stale task list: generation {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.rows = rows;
        self.loaded = true;
        self.last_error = None;
        true
    }

    pub(crate) fn apply_failure(&mut self, generation: Generation, message: String) -> bool {
        if !self.is_current(generation) {
            dash_debug!("Discarding stale load failure for generation {}", generation);
            return false;
        }
        self.last_error = Some(message);
        true
    }

    pub(crate) fn find(&self, id: &str) -> Option<&UploadTask> {
        self.rows.iter().find(|task| task.id == id)
    }

    pub(crate) fn rows(&self) -> &[UploadTask] {
        &self.rows
    }

    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }

    pub(crate) fn loaded(&self) -> bool {
        self.loaded
    }

    pub(crate) fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
