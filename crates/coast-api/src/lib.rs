//! Service boundary for the coastal simulator: typed request/response
//! payloads, PNG data-URI encoding and uniform error reporting.

pub mod config;
pub mod encode;
pub mod error;
pub mod payload;
pub mod service;

pub use config::ServiceConfig;
pub use error::{ApiError, ErrorPayload};
pub use payload::{AnalyzeRequest, AnalyzeResponse, PredictResponse, ReportResponse};
pub use service::{CoastService, Operation};
