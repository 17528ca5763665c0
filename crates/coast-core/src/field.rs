//! Terrain field synthesis.
//!
//! The field is a planar beach slope rising towards the land corner
//! (bottom-right), perturbed by i.i.d. Gaussian noise per cell:
//!
//!   z(row, col) = 0.6 · col/(w−1) + 0.4 · row/(h−1) + N(0, 0.04²)

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::{check_dimensions, Result};

pub const DEFAULT_WIDTH: usize = 256;
pub const DEFAULT_HEIGHT: usize = 256;

/// Weight of the cross-shore (column) slope.
pub const GRADIENT_X_WEIGHT: f64 = 0.6;
/// Weight of the along-shore (row) slope.
pub const GRADIENT_Y_WEIGHT: f64 = 0.4;
/// Standard deviation of the per-cell perturbation.
pub const NOISE_SIGMA: f64 = 0.04;

/// A 2D scalar terrain field, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    pub data: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

impl ScalarField {
    /// Build a field by evaluating `f(row, col)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for r in 0..height {
            for c in 0..width {
                data.push(f(r, c));
            }
        }
        Self { data, width, height }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn min_value(&self) -> f64 {
        self.data.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max_value(&self) -> f64 {
        self.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Position of sample `i` on a `[0, 1]` axis of `n` evenly spaced samples.
/// A single-sample axis sits at 0.
#[inline]
pub fn axis_fraction(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// Noise-free slope value at `(row, col)`.
#[inline]
pub fn base_gradient(row: usize, col: usize, width: usize, height: usize) -> f64 {
    GRADIENT_X_WEIGHT * axis_fraction(col, width) + GRADIENT_Y_WEIGHT * axis_fraction(row, height)
}

/// Generate a fresh terrain field.
///
/// Every cell takes one standard-normal draw from `rng`, in row-major order,
/// so a seeded generator reproduces the same field.
pub fn generate_field<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<ScalarField> {
    check_dimensions(width, height)?;

    let mut data = Vec::with_capacity(width * height);
    for r in 0..height {
        for c in 0..width {
            let z: f64 = rng.sample(StandardNormal);
            data.push(base_gradient(r, c, width, height) + z * NOISE_SIGMA);
        }
    }

    let field = ScalarField { data, width, height };
    tracing::trace!(width, height, min = field.min_value(), max = field.max_value(), "generated field");
    Ok(field)
}
