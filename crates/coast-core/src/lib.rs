//! Synthetic coastal zone simulator.
//!
//! A sloped, noise-perturbed terrain field is split into five zones (deep
//! water, shallow water, wave break, sand, vegetation) under a linear erosion
//! shift, then rendered to an RGBA raster and reduced to coverage/risk
//! metrics. All randomness comes from a caller-supplied [`rand::Rng`].

pub mod error;
pub mod field;
pub mod generator;
pub mod metrics;
pub mod predictor;
pub mod render;
pub mod report;
pub mod transect;
pub mod zones;

pub use error::{CoastError, Result};
pub use field::ScalarField;
pub use generator::{CoastGenerator, CoastParams, CoastScene};
pub use metrics::{Metrics, Status};
pub use predictor::{MonitoringPoint, Potential, Prediction};
pub use render::{Palette, Raster, Rgba};
pub use report::{Recommendation, Report, ReportEntry};
pub use zones::{Thresholds, Zone, ZoneMask, ZoneMasks};
