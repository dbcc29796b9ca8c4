use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or decoding a selected image.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("preview worker stopped before finishing")]
    WorkerLost,
}

/// Failures reported by a prediction backend.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("image unavailable: {0}")]
    Image(#[from] IntakeError),
    #[error("prediction service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected prediction response: {0}")]
    Response(String),
    #[error("prediction worker stopped before answering")]
    WorkerLost,
}
