//! Scalar coverage and risk metrics for one year offset.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::generate_field;
use crate::zones::{vegetation_mask, Thresholds};

/// Risk added per simulated year on top of the bare-land share.
pub const RISK_PER_YEAR: f64 = 1.5;
/// Fraction of bare land considered recoverable.
pub const RESTORATION_FACTOR: f64 = 0.7;

pub const CRITICAL_RISK: f64 = 70.0;
pub const WARNING_RISK: f64 = 50.0;

/// Round to two decimals, exact ties to even.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// Health label derived from the erosion risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Stable,
    Warning,
    Critical,
}

impl Status {
    /// CRITICAL is checked first, so it wins over WARNING.
    pub fn from_risk(erosion_risk: f64) -> Self {
        if erosion_risk > CRITICAL_RISK {
            Status::Critical
        } else if erosion_risk > WARNING_RISK {
            Status::Warning
        } else {
            Status::Stable
        }
    }
}

/// Metrics for one simulated year, each rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub vegetation_percent: f64,
    pub erosion_risk: f64,
    pub restoration_potential: f64,
}

impl Metrics {
    /// Derive all three values from an unrounded vegetation percentage.
    pub fn from_vegetation(veg_percent: f64, future_year: u32) -> Self {
        let bare = 100.0 - veg_percent;
        Self {
            vegetation_percent: round2(veg_percent),
            erosion_risk: round2(bare + future_year as f64 * RISK_PER_YEAR),
            restoration_potential: round2(bare * RESTORATION_FACTOR),
        }
    }

    pub fn status(&self) -> Status {
        Status::from_risk(self.erosion_risk)
    }
}

/// Draw a fresh field and reduce its vegetation mask to [`Metrics`].
///
/// The field is independent of any image rendered for the same year.
pub fn simulate_metrics<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    future_year: u32,
    rng: &mut R,
) -> Result<Metrics> {
    let field = generate_field(width, height, rng)?;
    let veg = vegetation_mask(&field, &Thresholds::for_year(future_year));
    let metrics = Metrics::from_vegetation(veg.coverage_percent(), future_year);
    tracing::debug!(future_year, ?metrics, "reduced metrics");
    Ok(metrics)
}
