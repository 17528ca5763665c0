//! Multi-year erosion report.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::{simulate_metrics, Status};

/// Year offsets covered by every report, in order.
pub const TIMELINE: [u32; 5] = [0, 5, 10, 20, 30];

/// Vegetation loss (percentage points) below which the zone counts as stable.
pub const MODERATE_LOSS: f64 = 5.0;
/// Loss at or above which immediate works are recommended.
pub const CRITICAL_LOSS: f64 = 15.0;

/// One row of the report timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Display label, e.g. `"+10 Years"`.
    #[serde(rename = "year")]
    pub label: String,
    #[serde(skip)]
    pub year_offset: u32,
    pub vegetation: f64,
    pub erosion_risk: f64,
    pub restoration_potential: f64,
    pub status: Status,
}

pub fn year_label(year: u32) -> String {
    format!("+{year} Years")
}

/// Action tier picked from first-to-last vegetation loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Maintain,
    Replant,
    Fortify,
}

impl Recommendation {
    pub fn from_loss(loss: f64) -> Self {
        if loss < MODERATE_LOSS {
            Recommendation::Maintain
        } else if loss < CRITICAL_LOSS {
            Recommendation::Replant
        } else {
            Recommendation::Fortify
        }
    }

    pub fn from_change(start_veg: f64, final_veg: f64) -> Self {
        Self::from_loss(start_veg - final_veg)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::Maintain => "Zone is stable. Maintain current monitoring protocols.",
            Recommendation::Replant => {
                "Moderate erosion detected. Initiate mangrove planting in Sector 4."
            }
            Recommendation::Fortify => {
                "CRITICAL ALERT: Significant land loss projected. \
                 Immediate construction of sea walls and breakwaters required."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    pub recommendation: Recommendation,
}

/// Run the metrics reducer once per [`TIMELINE`] year, each on its own field.
pub fn build_report<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Report> {
    let mut entries = Vec::with_capacity(TIMELINE.len());
    for year in TIMELINE {
        let m = simulate_metrics(width, height, year, rng)?;
        entries.push(ReportEntry {
            label: year_label(year),
            year_offset: year,
            vegetation: m.vegetation_percent,
            erosion_risk: m.erosion_risk,
            restoration_potential: m.restoration_potential,
            status: m.status(),
        });
    }

    let start_veg = entries[0].vegetation;
    let final_veg = entries[entries.len() - 1].vegetation;
    let recommendation = Recommendation::from_change(start_veg, final_veg);
    tracing::debug!(start_veg, final_veg, ?recommendation, "report built");

    Ok(Report { entries, recommendation })
}
