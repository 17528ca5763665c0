use serde::{Deserialize, Serialize};
use thiserror::Error;

use coast_core::CoastError;

/// Everything that can go wrong while serving one request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    #[error(transparent)]
    Core(#[from] CoastError),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("raster buffer does not match {width}x{height}")]
    RasterShape { width: u32, height: u32 },

    #[error("invalid image data URI: {0}")]
    DataUri(String),

    #[error("response serialisation failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Uniform failure body returned by every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl From<&ApiError> for ErrorPayload {
    fn from(err: &ApiError) -> Self {
        Self { error: err.to_string() }
    }
}

impl From<ApiError> for ErrorPayload {
    fn from(err: ApiError) -> Self {
        Self::from(&err)
    }
}
