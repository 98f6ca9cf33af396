use std::fmt;
use std::time::Duration;

use crate::{AbstractEntry, Feedback, Generation, LookupOutcome, UploadTask};

/// Why a request produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page is ready; performs the initial task list load.
    Started,
    /// User asked for a fresh task list.
    ReloadClicked,
    /// Engine completion for a task list load.
    TasksLoaded {
        generation: Generation,
        result: Result<Vec<UploadTask>, RequestFailure>,
    },
    /// User clicked the update control of a running task.
    UpdateClicked { id: String },
    /// Engine completion for a status update.
    StatusUpdated {
        id: String,
        result: Result<Option<Feedback>, RequestFailure>,
    },
    /// User clicked the delete control; asks for confirmation.
    DeleteClicked { id: String },
    DeleteConfirmed,
    DeleteCancelled,
    /// Engine completion for a delete.
    TaskDeleted {
        id: String,
        result: Result<Option<Feedback>, RequestFailure>,
    },
    NextPage,
    PreviousPage,
    /// User edited the abstract identifier input.
    SearchInputChanged(String),
    /// User clicked the search button.
    SearchSubmitted,
    /// Engine completion for an abstract lookup.
    AbstractLookedUp {
        generation: Generation,
        result: Result<LookupOutcome, RequestFailure>,
    },
    /// User asked for the list of known abstracts.
    CatalogRequested,
    /// Engine completion for the abstract catalog.
    CatalogLoaded {
        result: Result<Vec<AbstractEntry>, RequestFailure>,
    },
    /// Show a status/error banner.
    FeedbackReceived(Feedback),
    /// User closed the banner.
    BannerDismissed,
    /// Clock tick; drives banner timing.
    Tick { elapsed: Duration },
}
