//! Short user-facing notifications.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    /// How long a toast of this kind stays on screen.
    pub fn display_duration(self) -> Duration {
        match self {
            NoticeKind::Info | NoticeKind::Success => Duration::from_secs(3),
            NoticeKind::Error => Duration::from_secs(8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn image_uploaded() -> Self {
        Self::new(
            NoticeKind::Info,
            "Image uploaded",
            "Ready to analyze the banana leaf",
        )
    }

    pub fn analysis_complete() -> Self {
        Self::new(
            NoticeKind::Success,
            "Analysis complete",
            "Disease detection results are ready",
        )
    }

    pub fn analysis_failed(reason: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, "Analysis failed", reason)
    }
}

/// Fire-and-forget display of a notice.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}
