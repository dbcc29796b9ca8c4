//! Core of the banana leaf disease detector: image intake, the analysis
//! lifecycle, prediction backends and the disease reference table.
//!
//! Nothing in here depends on a GUI toolkit; the `app_gui` crate renders it.

pub mod config;
pub mod controller;
pub mod disease;
pub mod error;
pub mod image_file;
pub mod intake;
pub mod jobs;
pub mod notice;
pub mod paste;
pub mod predict;
pub mod verdict;

#[cfg(test)]
pub(crate) mod test_utils;

pub use controller::{AnalysisController, AnalysisRequest, AnalysisState, Ticket};
pub use disease::{DiseaseInfo, DiseaseLabel, Icon, SeverityTier};
pub use error::{IntakeError, PredictError};
pub use image_file::{ImageFile, ImagePayload, ImagePreview};
pub use intake::{ClipboardItem, DroppedItem, ImageSource};
pub use jobs::{JobEvent, Jobs};
pub use notice::{Notice, NoticeKind, Notifier};
pub use paste::{PasteListeners, PasteSubscription};
pub use predict::{HttpPredictor, MockPredictor, Prediction, Predictor};
pub use verdict::{ConfidenceScore, Verdict};
