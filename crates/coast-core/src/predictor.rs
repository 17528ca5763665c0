//! Optimistic restoration forecast: synthetic monitoring sites plus a
//! projected-recovery raster.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generator::{CoastGenerator, CoastParams};
use crate::metrics::round2;
use crate::render::Raster;

pub const POINT_COUNT: usize = 10;

/// Survey centre the sites are scattered around.
pub const CENTER_LAT: f64 = 19.8;
pub const CENTER_LON: f64 = 85.8;
/// Half-width of the uniform scatter, in degrees.
pub const SCATTER_DEG: f64 = 0.1;

pub const MIN_INCREASE: f64 = 10.0;
pub const MAX_INCREASE: f64 = 30.0;
/// Increase (%) above which a site is rated high potential.
pub const HIGH_POTENTIAL_CUTOFF: f64 = 20.0;

/// Year offset used for the projected-recovery raster.
pub const FORECAST_YEAR: u32 = 10;

pub const SUMMARY_CLASSIFICATION: &str =
    "High Potential Areas Identified for Vegetation Restoration";
pub const SUMMARY_DESCRIPTION: &str =
    "Optimistic prediction shows potential for vegetation recovery in selected areas.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Potential {
    #[serde(rename = "High Potential")]
    High,
    #[serde(rename = "Medium Potential")]
    Medium,
}

impl Potential {
    pub fn from_increase(increase: f64) -> Self {
        if increase > HIGH_POTENTIAL_CUTOFF {
            Potential::High
        } else {
            Potential::Medium
        }
    }
}

/// A synthetic monitoring site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringPoint {
    /// 1-based.
    pub id: u32,
    pub lat: f64,
    pub lon: f64,
    pub predicted_veg_increase: f64,
    pub classification: Potential,
    /// Graph value; same as `predicted_veg_increase`.
    pub numerical_value: f64,
}

/// Draw [`POINT_COUNT`] sites. Each site takes three draws: lat, lon, increase.
pub fn sample_points<R: Rng + ?Sized>(rng: &mut R) -> Vec<MonitoringPoint> {
    (1..=POINT_COUNT as u32)
        .map(|id| {
            let lat = CENTER_LAT + rng.gen_range(-SCATTER_DEG..SCATTER_DEG);
            let lon = CENTER_LON + rng.gen_range(-SCATTER_DEG..SCATTER_DEG);
            let increase = round2(rng.gen_range(MIN_INCREASE..MAX_INCREASE));
            MonitoringPoint {
                id,
                lat,
                lon,
                predicted_veg_increase: increase,
                classification: Potential::from_increase(increase),
                numerical_value: increase,
            }
        })
        .collect()
}

pub struct Prediction {
    pub points: Vec<MonitoringPoint>,
    /// Per-point increases, parallel to `points`.
    pub graph_data: Vec<f64>,
    pub raster: Raster,
}

/// Sample the sites, then render the optimistic year-10 coastline.
pub fn predict<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Prediction> {
    let points = sample_points(rng);
    let graph_data = points.iter().map(|p| p.numerical_value).collect();

    let params = CoastParams {
        width,
        height,
        future_year: FORECAST_YEAR,
        show_transects: false,
    };
    let scene = CoastGenerator::optimistic().generate(&params, rng)?;

    Ok(Prediction {
        points,
        graph_data,
        raster: scene.raster,
    })
}
