//! Annodash core: pure state machine and view-model helpers for the
//! annotation-upload dashboard.
mod banner;
mod effect;
mod indicator;
mod msg;
mod search;
mod state;
mod tasks;
mod update;
mod view_model;

pub use banner::{BannerKind, BannerPhase, Feedback, FeedbackBanner, BANNER_FADE, BANNER_VISIBLE};
pub use effect::Effect;
pub use indicator::RequestIndicator;
pub use msg::{Msg, RequestFailure};
pub use search::{AbstractEntry, AbstractMatch, LookupOutcome, SearchPanel};
pub use state::{AppState, DashboardSettings, DEFAULT_PAGE_LENGTH};
pub use tasks::{Generation, TaskStatus, UploadTask};
pub use update::update;
pub use view_model::{
    AppViewModel, BannerView, RowAction, SearchView, TaskRowView, TaskTableView,
    ACTION_PLACEHOLDER,
};
