use std::time::Duration;

/// How long a banner stays fully visible.
pub const BANNER_VISIBLE: Duration = Duration::from_millis(2000);
/// Length of the fade-out that follows the visible period.
pub const BANNER_FADE: Duration = Duration::from_millis(500);

/// Generic `{status, message}` payload shown as a banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub status: String,
    pub message: String,
}

impl Feedback {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Danger,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    Visible,
    Fading,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackBanner {
    kind: BannerKind,
    message: String,
    age: Duration,
}

impl FeedbackBanner {
    pub fn from_feedback(feedback: Feedback) -> Self {
        let kind = if feedback.status == "error" {
            BannerKind::Danger
        } else {
            BannerKind::Info
        };
        Self {
            kind,
            message: feedback.message,
            age: Duration::ZERO,
        }
    }

    pub fn kind(&self) -> BannerKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> BannerPhase {
        if self.age < BANNER_VISIBLE {
            BannerPhase::Visible
        } else if self.age < BANNER_VISIBLE + BANNER_FADE {
            BannerPhase::Fading
        } else {
            BannerPhase::Hidden
        }
    }

    /// Ages the banner; returns true when its phase changed.
    pub(crate) fn advance(&mut self, elapsed: Duration) -> bool {
        let before = self.phase();
        self.age = self.age.saturating_add(elapsed);
        before != self.phase()
    }
}
