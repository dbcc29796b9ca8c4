//! Render model for a finished prediction.

use crate::disease::{DiseaseLabel, Icon, SeverityTier};
use std::fmt;

/// Caption shown under every verdict.
pub const PROVENANCE: &str = "Analysis based on KNN model trained on banana leaf dataset";

/// Confidence percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfidenceScore(u8);

impl ConfidenceScore {
    pub const DEFAULT_PERCENT: u8 = 85;

    #[must_use]
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    /// Builds a score from a backend value, rounding and clamping to 0..=100.
    /// Non-finite values fall back to the default.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if !percent.is_finite() {
            return Self::default();
        }
        Self(percent.round().clamp(0.0, 100.0) as u8)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ConfidenceScore {
    fn default() -> Self {
        Self(Self::DEFAULT_PERCENT)
    }
}

impl fmt::Display for ConfidenceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Everything the results card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub label: DiseaseLabel,
    pub icon: Icon,
    pub severity: SeverityTier,
    pub title: &'static str,
    pub confidence: ConfidenceScore,
    pub description: &'static str,
    pub action: &'static str,
    pub caption: &'static str,
}

impl Verdict {
    /// Returns `None` when there is no label to show. Labels outside the known
    /// set render exactly like "Healthy".
    pub fn from_prediction(label: Option<&str>, confidence: Option<ConfidenceScore>) -> Option<Self> {
        let label = DiseaseLabel::resolve(label?);
        let info = label.info();
        Some(Self {
            label,
            icon: info.icon,
            severity: info.severity,
            title: label.name(),
            confidence: confidence.unwrap_or_default(),
            description: info.description,
            action: info.action,
            caption: PROVENANCE,
        })
    }

    pub fn confidence_text(&self) -> String {
        format!("{} confidence", self.confidence)
    }
}
