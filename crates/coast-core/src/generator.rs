//! Pipeline orchestrator: field → zones → raster → optional transects.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::{generate_field, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::render::{composite, Palette, Raster};
use crate::transect::analyze_transects;
use crate::zones::{classify, Thresholds, ZoneMask, ZoneMasks};

// ── Public structs ────────────────────────────────────────────────────────────

/// Per-scene parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoastParams {
    pub width: usize,
    pub height: usize,
    /// Years of simulated erosion applied to the seaward bounds.
    pub future_year: u32,
    /// Overlay transects and count risk points.
    pub show_transects: bool,
}

impl Default for CoastParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            future_year: 0,
            show_transects: false,
        }
    }
}

/// Everything one pipeline pass produces.
pub struct CoastScene {
    pub thresholds: Thresholds,
    pub masks: ZoneMasks,
    /// Raw `[shallow, wave)` band the transect pass scans. Differs from
    /// `masks.wave` only once the bounds have crossed the sand bound.
    pub transect_wave: ZoneMask,
    pub raster: Raster,
    /// Transect centres on the landward half; 0 when transects are off.
    pub risk_points: u32,
}

impl CoastScene {
    /// Vegetation share of this scene's own masks, unrounded.
    pub fn vegetation_percent(&self) -> f64 {
        self.masks.vegetation.coverage_percent()
    }
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

/// Runs the synthesis pipeline with a fixed palette.
#[derive(Debug, Clone, Copy)]
pub struct CoastGenerator {
    palette: Palette,
}

impl CoastGenerator {
    pub fn new() -> Self {
        Self { palette: Palette::STANDARD }
    }

    /// Generator using the brighter projected-recovery vegetation colour.
    pub fn optimistic() -> Self {
        Self { palette: Palette::OPTIMISTIC }
    }

    /// Pipeline order:
    ///   1. Terrain field (fresh draw from `rng`)
    ///   2. Zone classification for `future_year`
    ///   3. Compositing
    ///   4. Transect overlay on the raw wave band, if requested
    pub fn generate<R: Rng + ?Sized>(&self, params: &CoastParams, rng: &mut R) -> Result<CoastScene> {
        let field = generate_field(params.width, params.height, rng)?;

        let thresholds = Thresholds::for_year(params.future_year);
        let masks = classify(&field, &thresholds);
        let transect_wave = thresholds.wave_interval_mask(&field);
        if !thresholds.is_ordered() {
            tracing::debug!(
                future_year = params.future_year,
                classified_wave = masks.wave.count(),
                raw_wave = transect_wave.count(),
                "erosion bounds crossed the sand bound"
            );
        }

        let mut raster = composite(&masks, &self.palette)?;

        let risk_points = if params.show_transects {
            analyze_transects(&mut raster, &transect_wave)?
        } else {
            0
        };

        Ok(CoastScene { thresholds, masks, transect_wave, raster, risk_points })
    }
}

impl Default for CoastGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
