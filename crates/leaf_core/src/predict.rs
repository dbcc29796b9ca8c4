//! Prediction backends.

use crate::disease::DiseaseLabel;
use crate::error::PredictError;
use crate::image_file::ImageFile;
use crate::verdict::ConfidenceScore;
use rand::seq::SliceRandom;
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use std::thread;
use std::time::Duration;

/// Delay used by the mock backend before answering.
pub const MOCK_DELAY: Duration = Duration::from_millis(2000);

/// Label and optional confidence returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Raw label as reported; may fall outside the known set.
    pub label: String,
    pub confidence: Option<ConfidenceScore>,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: Option<ConfidenceScore>) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Maps one image to a disease label. Calls block; run them off the UI thread.
pub trait Predictor: Send + Sync {
    fn predict(&self, file: &ImageFile) -> Result<Prediction, PredictError>;

    /// True when labels are made up rather than inferred from the image.
    fn is_simulated(&self) -> bool {
        false
    }
}

/// Stand-in backend: waits, then picks a label uniformly at random.
#[derive(Debug, Clone)]
pub struct MockPredictor {
    delay: Duration,
}

impl MockPredictor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self::new(MOCK_DELAY)
    }
}

impl Predictor for MockPredictor {
    fn predict(&self, file: &ImageFile) -> Result<Prediction, PredictError> {
        tracing::debug!(name = %file.name(), delay = ?self.delay, "mock prediction started");
        thread::sleep(self.delay);
        let label = DiseaseLabel::ALL
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(DiseaseLabel::Healthy);
        Ok(Prediction::new(label.name(), None))
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: String,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Posts the image as multipart field `image` and reads
/// `{"prediction": "...", "confidence": 92}` back.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PredictError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, file: &ImageFile) -> Result<Prediction, PredictError> {
        let bytes = file.read_bytes()?.into_owned();
        let part = multipart::Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;
        let form = multipart::Form::new().part("image", part);

        tracing::info!(endpoint = %self.endpoint, name = %file.name(), "sending image for prediction");
        let res = self.client.post(&self.endpoint).multipart(form).send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(PredictError::Status(status));
        }
        let body = res.text()?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<Prediction, PredictError> {
    let parsed: PredictResponse =
        serde_json::from_str(body).map_err(|e| PredictError::Response(e.to_string()))?;
    if parsed.prediction.trim().is_empty() {
        return Err(PredictError::Response("empty prediction".to_string()));
    }
    Ok(Prediction::new(
        parsed.prediction,
        parsed.confidence.map(ConfidenceScore::from_percent),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_file::ImagePayload;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn leaf() -> ImageFile {
        ImageFile::new(
            "leaf.png",
            "image/png",
            ImagePayload::Bytes(Arc::from(&b"png"[..])),
        )
    }

    #[test]
    fn mock_answers_with_known_labels_only() -> Result<(), PredictError> {
        let mock = MockPredictor::new(Duration::ZERO);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let prediction = mock.predict(&leaf())?;
            assert!(DiseaseLabel::from_name(&prediction.label).is_some());
            assert_eq!(prediction.confidence, None);
            seen.insert(prediction.label);
        }
        assert!(seen.len() > 1, "mock should not always pick the same label");
        Ok(())
    }

    #[test]
    fn mock_default_waits_two_seconds() {
        assert_eq!(MockPredictor::default().delay, Duration::from_millis(2000));
    }

    #[test]
    fn only_the_mock_is_simulated() -> Result<(), PredictError> {
        assert!(MockPredictor::default().is_simulated());
        let http = HttpPredictor::new("http://127.0.0.1:9/predict", Duration::from_secs(1))?;
        assert!(!http.is_simulated());
        Ok(())
    }

    #[test]
    fn response_with_confidence() -> Result<(), PredictError> {
        let prediction = parse_response(r#"{"prediction":"Sigatoka","confidence":92}"#)?;
        assert_eq!(
            prediction,
            Prediction::new("Sigatoka", Some(ConfidenceScore::new(92)))
        );
        Ok(())
    }

    #[test]
    fn response_without_confidence() -> Result<(), PredictError> {
        let prediction = parse_response(r#"{"prediction":"Panama Disease"}"#)?;
        assert_eq!(prediction.confidence, None);
        assert_eq!(prediction.label, "Panama Disease");
        Ok(())
    }

    #[test]
    fn malformed_responses_are_errors() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(PredictError::Response(_))
        ));
        assert!(matches!(
            parse_response(r#"{"prediction":"  "}"#),
            Err(PredictError::Response(_))
        ));
    }

    #[test]
    fn unreadable_image_fails_before_sending() -> Result<(), PredictError> {
        let predictor = HttpPredictor::new("http://127.0.0.1:9/predict", Duration::from_secs(1))?;
        let missing = ImageFile::from_path("/nowhere/leaf.png");
        assert!(matches!(
            predictor.predict(&missing),
            Err(PredictError::Image(_))
        ));
        Ok(())
    }
}
