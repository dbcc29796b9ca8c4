//! Analysis lifecycle: selection, preview, prediction, result.
//!
//! ```text
//! Idle ──select──▶ ImageSelected ──begin──▶ Analyzing ──ok──▶ Resulted
//!                       ▲                       │                │
//!                       └──────── error ────────┘                │
//!                       └──────────────── select ────────────────┘
//! ```
//!
//! Every selection bumps a [`Ticket`]. Previews and predictions carry the
//! ticket of the file they were issued for; results for an older ticket are
//! discarded. The busy guard follows the outstanding call rather than the
//! state: a selection made mid-analysis shows `ImageSelected`, but analyze
//! stays disabled until the earlier call lands.

use crate::error::PredictError;
use crate::image_file::{ImageFile, ImagePreview};
use crate::notice::{Notice, Notifier};
use crate::predict::Prediction;
use crate::verdict::{ConfidenceScore, Verdict};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisState {
    #[default]
    Idle,
    ImageSelected,
    Analyzing,
    Resulted,
}

/// Generation of the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Work order for the prediction backend.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub ticket: Ticket,
    pub file: ImageFile,
}

#[derive(Debug, Default)]
pub struct AnalysisController {
    state: AnalysisState,
    ticket: Ticket,
    file: Option<ImageFile>,
    preview: Option<ImagePreview>,
    prediction: Option<Prediction>,
    outstanding: Option<Ticket>,
}

impl AnalysisController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn file(&self) -> Option<&ImageFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&ImagePreview> {
        self.preview.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.prediction.as_ref().map(|p| p.label.as_str())
    }

    pub fn confidence(&self) -> Option<ConfidenceScore> {
        self.prediction.as_ref().and_then(|p| p.confidence)
    }

    /// Whether a prediction call is still running, for this image or a
    /// replaced one.
    pub fn is_busy(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Whether the analyze control should be enabled.
    pub fn can_analyze(&self) -> bool {
        self.file.is_some() && !self.is_busy()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        Verdict::from_prediction(self.label(), self.confidence())
    }

    /// Replaces the current image and restarts the cycle. Returns the ticket
    /// the preview should be decoded under.
    pub fn select_image(&mut self, file: ImageFile, notifier: &mut impl Notifier) -> Ticket {
        self.ticket = Ticket(self.ticket.0 + 1);
        if self.state == AnalysisState::Analyzing {
            tracing::info!(ticket = self.ticket.0, "new image selected while analyzing; pending result will be discarded");
        }
        tracing::info!(name = %file.name(), mime = %file.mime(), ticket = self.ticket.0, "image selected");
        self.file = Some(file);
        self.preview = None;
        self.prediction = None;
        self.state = AnalysisState::ImageSelected;
        notifier.notify(Notice::image_uploaded());
        self.ticket
    }

    /// Stores a decoded preview if it still belongs to the current image.
    pub fn attach_preview(&mut self, ticket: Ticket, preview: ImagePreview) -> bool {
        if ticket != self.ticket {
            tracing::debug!(ticket = ticket.0, current = self.ticket.0, "dropping stale preview");
            return false;
        }
        self.preview = Some(preview);
        true
    }

    /// Enters `Analyzing` and hands out the request, or `None` when there is
    /// no image or a prediction is already pending.
    pub fn begin_analysis(&mut self) -> Option<AnalysisRequest> {
        if !self.can_analyze() {
            return None;
        }
        let file = self.file.clone()?;
        self.prediction = None;
        self.state = AnalysisState::Analyzing;
        self.outstanding = Some(self.ticket);
        tracing::info!(name = %file.name(), ticket = self.ticket.0, "analysis started");
        Some(AnalysisRequest {
            ticket: self.ticket,
            file,
        })
    }

    /// Applies a finished prediction. Returns `false` when the result was for
    /// an image that has since been replaced.
    pub fn finish_analysis(
        &mut self,
        ticket: Ticket,
        outcome: Result<Prediction, PredictError>,
        notifier: &mut impl Notifier,
    ) -> bool {
        if self.outstanding == Some(ticket) {
            self.outstanding = None;
        }
        if ticket != self.ticket || self.state != AnalysisState::Analyzing {
            tracing::debug!(ticket = ticket.0, current = self.ticket.0, "dropping stale prediction");
            return false;
        }
        match outcome {
            Ok(prediction) => {
                tracing::info!(label = %prediction.label, confidence = ?prediction.confidence, "analysis finished");
                self.prediction = Some(prediction);
                self.state = AnalysisState::Resulted;
                notifier.notify(Notice::analysis_complete());
            }
            Err(err) => {
                tracing::warn!("analysis failed: {err}");
                self.state = AnalysisState::ImageSelected;
                notifier.notify(Notice::analysis_failed(err.to_string()));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_file::ImagePayload;
    use crate::notice::NoticeKind;
    use std::sync::Arc;

    fn leaf(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", ImagePayload::Bytes(Arc::from(&b"px"[..])))
    }

    fn preview() -> ImagePreview {
        ImagePreview {
            width: 1,
            height: 1,
            rgba: vec![0, 255, 0, 255],
        }
    }

    #[test]
    fn starts_idle_without_analyze() {
        let mut ctl = AnalysisController::new();
        assert_eq!(ctl.state(), AnalysisState::Idle);
        assert!(!ctl.can_analyze());
        assert!(ctl.begin_analysis().is_none());
        assert!(ctl.verdict().is_none());
    }

    #[test]
    fn selection_notifies_and_enables_analyze() {
        let mut ctl = AnalysisController::new();
        let mut notices: Vec<Notice> = Vec::new();
        let ticket = ctl.select_image(leaf("a.png"), &mut notices);

        assert_eq!(ctl.state(), AnalysisState::ImageSelected);
        assert!(ctl.can_analyze());
        assert_eq!(notices, vec![Notice::image_uploaded()]);
        assert!(ctl.preview().is_none());
        assert!(ctl.attach_preview(ticket, preview()));
        assert!(ctl.preview().is_some());
    }

    #[test]
    fn sigatoka_result_is_displayed() {
        let mut ctl = AnalysisController::new();
        let mut notices: Vec<Notice> = Vec::new();
        ctl.select_image(leaf("a.png"), &mut notices);
        let req = ctl.begin_analysis().unwrap();
        assert!(ctl.is_busy());
        assert!(ctl.label().is_none());

        let outcome = Ok(Prediction::new("Sigatoka", Some(ConfidenceScore::new(92))));
        assert!(ctl.finish_analysis(req.ticket, outcome, &mut notices));

        assert_eq!(ctl.state(), AnalysisState::Resulted);
        assert!(!ctl.is_busy());
        let verdict = ctl.verdict().unwrap();
        assert_eq!(verdict.title, "Sigatoka");
        assert_eq!(verdict.confidence_text(), "92% confidence");
        assert_eq!(verdict.action, "Moderate - Apply fungicide treatment");
        assert_eq!(notices.last(), Some(&Notice::analysis_complete()));
    }

    #[test]
    fn second_analyze_while_pending_is_refused() {
        let mut ctl = AnalysisController::new();
        ctl.select_image(leaf("a.png"), &mut Vec::<Notice>::new());
        assert!(ctl.begin_analysis().is_some());
        assert!(!ctl.can_analyze());
        assert!(ctl.begin_analysis().is_none());
    }

    #[test]
    fn new_selection_clears_previous_result() {
        let mut ctl = AnalysisController::new();
        let mut notices: Vec<Notice> = Vec::new();
        ctl.select_image(leaf("a.png"), &mut notices);
        let req = ctl.begin_analysis().unwrap();
        ctl.finish_analysis(req.ticket, Ok(Prediction::new("Healthy", None)), &mut notices);
        assert_eq!(ctl.state(), AnalysisState::Resulted);

        ctl.select_image(leaf("b.png"), &mut notices);
        assert_eq!(ctl.state(), AnalysisState::ImageSelected);
        assert!(ctl.label().is_none());
        assert!(ctl.verdict().is_none());
        assert_eq!(ctl.file().map(ImageFile::name), Some("b.png"));
    }

    #[test]
    fn failure_returns_to_image_selected() {
        let mut ctl = AnalysisController::new();
        let mut notices: Vec<Notice> = Vec::new();
        ctl.select_image(leaf("a.png"), &mut notices);
        let req = ctl.begin_analysis().unwrap();

        let applied = ctl.finish_analysis(
            req.ticket,
            Err(PredictError::Response("bad json".into())),
            &mut notices,
        );

        assert!(applied);
        assert_eq!(ctl.state(), AnalysisState::ImageSelected);
        assert!(!ctl.is_busy());
        assert!(ctl.can_analyze());
        assert!(ctl.label().is_none());
        let last = notices.last().unwrap();
        assert_eq!(last.kind, NoticeKind::Error);
        assert_eq!(last.title, "Analysis failed");
        assert!(last.description.contains("bad json"));
    }

    #[test]
    fn stale_prediction_is_discarded() {
        let mut ctl = AnalysisController::new();
        let mut notices: Vec<Notice> = Vec::new();
        ctl.select_image(leaf("a.png"), &mut notices);
        let old = ctl.begin_analysis().unwrap();

        ctl.select_image(leaf("b.png"), &mut notices);
        assert_eq!(ctl.state(), AnalysisState::ImageSelected);
        assert!(ctl.is_busy());
        assert!(!ctl.can_analyze());
        assert!(ctl.begin_analysis().is_none());

        let applied = ctl.finish_analysis(old.ticket, Ok(Prediction::new("Sigatoka", None)), &mut notices);

        assert!(!applied);
        assert_eq!(ctl.state(), AnalysisState::ImageSelected);
        assert!(ctl.label().is_none());
        assert!(!ctl.is_busy());
        assert!(ctl.can_analyze());
        assert_eq!(notices.len(), 2);
    }

    #[test]
    fn stale_failure_also_releases_busy_guard() {
        let mut ctl = AnalysisController::new();
        let mut notices: Vec<Notice> = Vec::new();
        ctl.select_image(leaf("a.png"), &mut notices);
        let old = ctl.begin_analysis().unwrap();
        ctl.select_image(leaf("b.png"), &mut notices);

        let applied = ctl.finish_analysis(old.ticket, Err(PredictError::WorkerLost), &mut notices);

        assert!(!applied);
        assert!(ctl.can_analyze());
        assert_eq!(notices.len(), 2);
        let req = ctl.begin_analysis().unwrap();
        assert_eq!(req.ticket, ctl.ticket());
        assert_eq!(req.file.name(), "b.png");
    }

    #[test]
    fn stale_preview_is_discarded() {
        let mut ctl = AnalysisController::new();
        let first = ctl.select_image(leaf("a.png"), &mut Vec::<Notice>::new());
        ctl.select_image(leaf("b.png"), &mut Vec::<Notice>::new());
        assert!(!ctl.attach_preview(first, preview()));
        assert!(ctl.preview().is_none());
    }

    #[test]
    fn unknown_label_falls_back_to_healthy_card() {
        let mut ctl = AnalysisController::new();
        ctl.select_image(leaf("a.png"), &mut Vec::<Notice>::new());
        let req = ctl.begin_analysis().unwrap();
        ctl.finish_analysis(req.ticket, Ok(Prediction::new("Leaf Rust", None)), &mut Vec::<Notice>::new());

        assert_eq!(ctl.label(), Some("Leaf Rust"));
        assert_eq!(
            ctl.verdict(),
            Verdict::from_prediction(Some("Healthy"), None)
        );
    }
}
