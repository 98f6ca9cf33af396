use std::time::Duration;

use annodash_logging::dash_debug;

use crate::banner::{Feedback, FeedbackBanner};
use crate::search::{AbstractEntry, LookupOutcome, SearchState};
use crate::tasks::{Generation, TaskTable, UploadTask};
use crate::view_model::{AppViewModel, BannerView, RowAction, SearchView, TaskRowView, TaskTableView};
use crate::RequestIndicator;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Exposes the delete control on non-running rows. Off unless configured.
    pub delete_enabled: bool,
    pub page_length: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            delete_enabled: false,
            page_length: DEFAULT_PAGE_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: DashboardSettings,
    tasks: TaskTable,
    page: usize,
    pending_delete: Option<String>,
    search: SearchState,
    indicator: RequestIndicator,
    banner: Option<FeedbackBanner>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: DashboardSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> DashboardSettings {
        self.settings
    }

    pub fn indicator(&self) -> RequestIndicator {
        self.indicator
    }

    pub fn banner(&self) -> Option<&FeedbackBanner> {
        self.banner.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let page_length = self.page_length();
        let rows = self.tasks.rows();
        let page_count = rows.len().div_ceil(page_length).max(1);
        let start = self.page * page_length;
        let page_rows = rows
            .iter()
            .enumerate()
            .skip(start)
            .take(page_length)
            .map(|(position, task)| self.row_view(position, task))
            .collect();

        AppViewModel {
            tasks: TaskTableView {
                rows: page_rows,
                ids: rows.iter().map(|task| task.id.clone()).collect(),
                total: rows.len(),
                page: self.page,
                page_count,
                generation: self.tasks.generation(),
                loaded: self.tasks.loaded(),
                error: self.tasks.last_error().map(ToOwned::to_owned),
            },
            pending_delete: self.pending_delete.clone(),
            search: SearchView {
                query: self.search.query().to_string(),
                panel: self.search.panel().clone(),
                catalog: self.search.catalog().map(<[AbstractEntry]>::to_vec),
            },
            loading: self.indicator.is_visible(),
            banner: self.banner.as_ref().map(|banner| BannerView {
                kind: banner.kind(),
                message: banner.message().to_string(),
                phase: banner.phase(),
            }),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn page_length(&self) -> usize {
        self.settings.page_length.max(1)
    }

    fn row_view(&self, position: usize, task: &UploadTask) -> TaskRowView {
        let action = if task.status.is_running() {
            RowAction::Update {
                id: task.id.clone(),
            }
        } else if self.settings.delete_enabled {
            RowAction::Delete {
                id: task.id.clone(),
            }
        } else {
            RowAction::Placeholder
        };
        TaskRowView {
            position,
            id: task.id.clone(),
            project: task.project.clone(),
            date: task.date.clone(),
            submitted_by: task.submitted_by.clone(),
            description: task.description.clone(),
            task_id: task.task_id.clone(),
            upload_name: task.upload_name.clone(),
            status: task.status.label().to_string(),
            action,
        }
    }

    // Request lifecycle

    pub(crate) fn request_started(&mut self) {
        let was_visible = self.indicator.is_visible();
        self.indicator.on_request_started();
        if !was_visible {
            self.mark_dirty();
        }
    }

    pub(crate) fn request_finished(&mut self) {
        self.indicator.on_request_finished();
        if !self.indicator.is_visible() {
            self.mark_dirty();
        }
    }

    // Task list

    pub(crate) fn begin_load(&mut self) -> Generation {
        self.tasks.begin_load()
    }

    pub(crate) fn apply_tasks(&mut self, generation: Generation, rows: Vec<UploadTask>) {
        if self.tasks.apply_rows(generation, rows) {
            self.clamp_page();
            if let Some(id) = &self.pending_delete {
                if !self.is_deletable_task(id) {
                    dash_debug!("Pending delete of {} cleared by reload", id);
                    self.pending_delete = None;
                }
            }
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_load_failure(&mut self, generation: Generation, message: String) {
        if self.tasks.apply_failure(generation, message) {
            self.mark_dirty();
        }
    }

    pub(crate) fn is_running_task(&self, id: &str) -> bool {
        self.tasks
            .find(id)
            .is_some_and(|task| task.status.is_running())
    }

    pub(crate) fn is_deletable_task(&self, id: &str) -> bool {
        self.settings.delete_enabled
            && self
                .tasks
                .find(id)
                .is_some_and(|task| !task.status.is_running())
    }

    pub(crate) fn set_pending_delete(&mut self, id: Option<String>) {
        if self.pending_delete != id {
            self.pending_delete = id;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_pending_delete(&mut self) -> Option<String> {
        let pending = self.pending_delete.take();
        if pending.is_some() {
            self.mark_dirty();
        }
        pending
    }

    pub(crate) fn next_page(&mut self) {
        let last = self.last_page();
        if self.page < last {
            self.page += 1;
            self.mark_dirty();
        }
    }

    pub(crate) fn previous_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.mark_dirty();
        }
    }

    fn last_page(&self) -> usize {
        self.tasks
            .rows()
            .len()
            .div_ceil(self.page_length())
            .saturating_sub(1)
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.last_page());
    }

    // Search

    pub(crate) fn set_query(&mut self, query: String) {
        if self.search.query() != query {
            self.search.set_query(query);
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_lookup(&mut self) -> Option<(Generation, String)> {
        self.search.begin_lookup()
    }

    pub(crate) fn is_current_lookup(&self, generation: Generation) -> bool {
        self.search.is_current(generation)
    }

    pub(crate) fn apply_lookup(&mut self, generation: Generation, outcome: LookupOutcome) {
        if self.search.apply_outcome(generation, outcome) {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_catalog(&mut self, entries: Vec<AbstractEntry>) {
        self.search.set_catalog(entries);
        self.mark_dirty();
    }

    // Banner

    pub(crate) fn show_feedback(&mut self, feedback: Feedback) {
        self.banner = Some(FeedbackBanner::from_feedback(feedback));
        self.mark_dirty();
    }

    pub(crate) fn dismiss_banner(&mut self) {
        if self.banner.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn advance_clock(&mut self, elapsed: Duration) {
        let Some(banner) = self.banner.as_mut() else {
            return;
        };
        if banner.advance(elapsed) {
            if banner.phase() == crate::BannerPhase::Hidden {
                self.banner = None;
            }
            self.mark_dirty();
        }
    }
}
