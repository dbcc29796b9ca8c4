//! `leafscan.toml`: which prediction backend to use and how to reach it.
//!
//! ```toml
//! [predictor]
//! kind = "http"
//! endpoint = "http://localhost:5000/predict"
//! timeout_secs = 30
//! ```

use crate::predict::{HttpPredictor, MOCK_DELAY, MockPredictor, Predictor};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const CONFIG_FILE: &str = "leafscan.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub predictor: PredictorConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorKind {
    #[default]
    Mock,
    Http,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub kind: PredictorKind,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub mock_delay_ms: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            kind: PredictorKind::Mock,
            endpoint: None,
            timeout_secs: 30,
            mock_delay_ms: MOCK_DELAY.as_millis() as u64,
        }
    }
}

impl PredictorConfig {
    pub fn build(&self) -> Result<Arc<dyn Predictor>> {
        match self.kind {
            PredictorKind::Mock => Ok(Arc::new(MockPredictor::new(Duration::from_millis(
                self.mock_delay_ms,
            )))),
            PredictorKind::Http => {
                let endpoint = self
                    .endpoint
                    .as_deref()
                    .filter(|e| !e.trim().is_empty())
                    .context("predictor.endpoint is required when kind = \"http\"")?;
                let predictor =
                    HttpPredictor::new(endpoint, Duration::from_secs(self.timeout_secs))
                        .context("cannot build HTTP client")?;
                Ok(Arc::new(predictor))
            }
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// Missing file means defaults; an unreadable or invalid file is logged and
/// also yields defaults.
pub fn load_or_default(path: Option<&Path>) -> Config {
    match path {
        Some(path) if path.exists() => match load_from_path(path) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{e:#}; using defaults");
                Config::default()
            }
        },
        _ => Config::default(),
    }
}
