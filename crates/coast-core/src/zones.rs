//! Zone classification under the erosion model.
//!
//! Four boundaries split the field into five bands. Deep, shallow and wave
//! bounds rise by 0.006 per simulated year; the sand/vegetation bound stays
//! fixed at 0.65, so only the seaward bands migrate inland.

use serde::{Deserialize, Serialize};

use crate::field::ScalarField;

/// Boundary rise per simulated year.
pub const EROSION_SHIFT_PER_YEAR: f64 = 0.006;

pub const DEEP_WATER_BASE: f64 = 0.35;
pub const SHALLOW_WATER_BASE: f64 = 0.45;
pub const WAVE_BASE: f64 = 0.50;
/// Unshifted sand/vegetation boundary.
pub const SAND_BOUND: f64 = 0.65;

/// Physical zone of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    DeepWater,
    ShallowWater,
    Wave,
    Sand,
    Vegetation,
}

impl Zone {
    /// All zones, seaward to landward. Also the compositing order.
    pub const ALL: [Zone; 5] = [
        Zone::DeepWater,
        Zone::ShallowWater,
        Zone::Wave,
        Zone::Sand,
        Zone::Vegetation,
    ];
}

/// Classification boundaries for one year offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub deep: f64,
    pub shallow: f64,
    pub wave: f64,
    pub sand: f64,
}

impl Thresholds {
    pub fn erosion_shift(future_year: u32) -> f64 {
        future_year as f64 * EROSION_SHIFT_PER_YEAR
    }

    pub fn for_year(future_year: u32) -> Self {
        let shift = Self::erosion_shift(future_year);
        Self {
            deep: DEEP_WATER_BASE + shift,
            shallow: SHALLOW_WATER_BASE + shift,
            wave: WAVE_BASE + shift,
            sand: SAND_BOUND,
        }
    }

    /// True while `deep < shallow < wave < sand`. Past year 25 the shifted
    /// bounds overtake the fixed sand bound and some bands go empty.
    pub fn is_ordered(&self) -> bool {
        self.deep < self.shallow && self.shallow < self.wave && self.wave < self.sand
    }

    /// Zone for a single field value.
    ///
    /// For ordered bounds this is plain half-open interval membership. Once
    /// the bounds cross, vegetation (`>= sand`) takes precedence and the
    /// remaining cells fall into the first band whose upper bound they are
    /// below, so every value still maps to exactly one zone.
    pub fn zone_of(&self, value: f64) -> Zone {
        if value >= self.sand {
            Zone::Vegetation
        } else if value < self.deep {
            Zone::DeepWater
        } else if value < self.shallow {
            Zone::ShallowWater
        } else if value < self.wave {
            Zone::Wave
        } else {
            Zone::Sand
        }
    }

    /// Raw `[shallow, wave)` membership with no tie-break applied.
    ///
    /// Equal to the classified wave mask while the bounds are ordered. Once
    /// they cross the sand bound this keeps the cells vegetation claimed in
    /// [`classify`], which is the band the transect pass follows.
    pub fn wave_interval_mask(&self, field: &ScalarField) -> ZoneMask {
        ZoneMask {
            data: field.data.iter().map(|&v| v >= self.shallow && v < self.wave).collect(),
            width: field.width,
            height: field.height,
        }
    }
}

/// Boolean membership grid for one zone, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMask {
    pub data: Vec<bool>,
    pub width: usize,
    pub height: usize,
}

impl ZoneMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![false; width * height],
            width,
            height,
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for r in 0..height {
            for c in 0..width {
                data.push(f(r, c));
            }
        }
        Self { data, width, height }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&on| on).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&on| on)
    }

    /// Percentage of cells set, in `[0, 100]`. Unrounded.
    pub fn coverage_percent(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count() as f64 / self.data.len() as f64 * 100.0
    }
}

/// The five masks produced by one classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMasks {
    pub deep_water: ZoneMask,
    pub shallow_water: ZoneMask,
    pub wave: ZoneMask,
    pub sand: ZoneMask,
    pub vegetation: ZoneMask,
}

impl ZoneMasks {
    pub fn get(&self, zone: Zone) -> &ZoneMask {
        match zone {
            Zone::DeepWater    => &self.deep_water,
            Zone::ShallowWater => &self.shallow_water,
            Zone::Wave         => &self.wave,
            Zone::Sand         => &self.sand,
            Zone::Vegetation   => &self.vegetation,
        }
    }

    /// Masks paired with their zone, in compositing order.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &ZoneMask)> {
        Zone::ALL.into_iter().map(move |z| (z, self.get(z)))
    }

    pub fn shape(&self) -> (usize, usize) {
        self.deep_water.shape()
    }
}

/// Classify every cell of `field` into exactly one zone.
pub fn classify(field: &ScalarField, thresholds: &Thresholds) -> ZoneMasks {
    let (w, h) = field.shape();
    let mut masks = ZoneMasks {
        deep_water: ZoneMask::new(w, h),
        shallow_water: ZoneMask::new(w, h),
        wave: ZoneMask::new(w, h),
        sand: ZoneMask::new(w, h),
        vegetation: ZoneMask::new(w, h),
    };

    for (idx, &v) in field.data.iter().enumerate() {
        let mask = match thresholds.zone_of(v) {
            Zone::DeepWater    => &mut masks.deep_water,
            Zone::ShallowWater => &mut masks.shallow_water,
            Zone::Wave         => &mut masks.wave,
            Zone::Sand         => &mut masks.sand,
            Zone::Vegetation   => &mut masks.vegetation,
        };
        mask.data[idx] = true;
    }

    tracing::debug!(
        width = w,
        height = h,
        deep = thresholds.deep,
        shallow = thresholds.shallow,
        wave = thresholds.wave,
        sand = thresholds.sand,
        "classified terrain field"
    );

    masks
}

/// Vegetation-only classification (`value >= sand`), for metric passes that
/// need nothing else.
pub fn vegetation_mask(field: &ScalarField, thresholds: &Thresholds) -> ZoneMask {
    ZoneMask {
        data: field.data.iter().map(|&v| v >= thresholds.sand).collect(),
        width: field.width,
        height: field.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::generate_field;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_partition(masks: &ZoneMasks) {
        let (w, h) = masks.shape();
        for r in 0..h {
            for c in 0..w {
                let n = masks.iter().filter(|(_, m)| m.get(r, c)).count();
                assert_eq!(n, 1, "cell ({r}, {c}) claimed by {n} masks");
            }
        }
    }

    #[test]
    fn bounds_for_reference_years() {
        let t0 = Thresholds::for_year(0);
        assert_relative_eq!(t0.deep, 0.35);
        assert_relative_eq!(t0.shallow, 0.45);
        assert_relative_eq!(t0.wave, 0.50);
        assert_relative_eq!(t0.sand, 0.65);

        let t10 = Thresholds::for_year(10);
        assert_relative_eq!(t10.deep, 0.41, epsilon = 1e-12);
        assert_relative_eq!(t10.shallow, 0.51, epsilon = 1e-12);
        assert_relative_eq!(t10.wave, 0.56, epsilon = 1e-12);
        assert_relative_eq!(t10.sand, 0.65);

        let t50 = Thresholds::for_year(50);
        assert_relative_eq!(t50.deep, 0.65, epsilon = 1e-12);
        assert_relative_eq!(t50.shallow, 0.75, epsilon = 1e-12);
        assert_relative_eq!(t50.wave, 0.80, epsilon = 1e-12);
        assert_eq!(t50.sand, SAND_BOUND);
    }

    #[test]
    fn shifted_bounds_rise_monotonically_sand_fixed() {
        let mut prev = Thresholds::for_year(0);
        for year in 1..=60 {
            let t = Thresholds::for_year(year);
            assert!(t.deep > prev.deep && t.shallow > prev.shallow && t.wave > prev.wave);
            assert_eq!(t.sand, SAND_BOUND);
            prev = t;
        }
    }

    #[test]
    fn interval_edges_are_half_open() {
        let t = Thresholds::for_year(0);
        assert_eq!(t.zone_of(0.3499), Zone::DeepWater);
        assert_eq!(t.zone_of(0.35), Zone::ShallowWater);
        assert_eq!(t.zone_of(0.45), Zone::Wave);
        assert_eq!(t.zone_of(0.50), Zone::Sand);
        assert_eq!(t.zone_of(0.6499), Zone::Sand);
        assert_eq!(t.zone_of(0.65), Zone::Vegetation);
    }

    #[test]
    fn masks_partition_cells_for_many_years() {
        let mut rng = StdRng::seed_from_u64(42);
        for year in [0u32, 5, 10, 20, 25, 30, 40, 50, 100] {
            let field = generate_field(48, 32, &mut rng).unwrap();
            let masks = classify(&field, &Thresholds::for_year(year));
            assert_partition(&masks);
        }
    }

    /// Year 50 pushes deep up to the sand bound: shallow/wave/sand go empty.
    #[test]
    fn degenerate_year_empties_middle_bands() {
        let t = Thresholds::for_year(50);
        assert!(!t.is_ordered());

        let field = ScalarField::from_fn(64, 1, |_, c| c as f64 / 63.0);
        let masks = classify(&field, &t);
        assert_partition(&masks);
        assert!(masks.shallow_water.is_empty());
        assert!(masks.wave.is_empty());
        assert!(masks.sand.is_empty());
        assert_eq!(masks.deep_water.count() + masks.vegetation.count(), 64);
    }

    /// Between the crossing points vegetation wins over the shifted bands.
    #[test]
    fn vegetation_takes_precedence_when_bounds_cross() {
        let t = Thresholds::for_year(40); // deep 0.59, shallow 0.69, wave 0.74
        assert_eq!(t.zone_of(0.62), Zone::ShallowWater);
        assert_eq!(t.zone_of(0.67), Zone::Vegetation);
        assert_eq!(t.zone_of(0.70), Zone::Vegetation);
        assert_eq!(t.zone_of(0.50), Zone::DeepWater);
    }

    #[test]
    fn vegetation_mask_matches_full_classification() {
        let mut rng = StdRng::seed_from_u64(5);
        let field = generate_field(40, 40, &mut rng).unwrap();
        for year in [0u32, 30, 80] {
            let t = Thresholds::for_year(year);
            assert_eq!(vegetation_mask(&field, &t), classify(&field, &t).vegetation);
        }
    }

    #[test]
    fn coverage_percent_within_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let field = generate_field(64, 64, &mut rng).unwrap();
        let pct = vegetation_mask(&field, &Thresholds::for_year(0)).coverage_percent();
        assert!((0.0..=100.0).contains(&pct));

        let all = ZoneMask::from_fn(4, 4, |_, _| true);
        assert_eq!(all.coverage_percent(), 100.0);
        assert_eq!(ZoneMask::new(4, 4).coverage_percent(), 0.0);
    }

    #[test]
    fn wave_interval_matches_classified_wave_while_ordered() {
        let mut rng = StdRng::seed_from_u64(13);
        let field = generate_field(64, 64, &mut rng).unwrap();
        for year in [0u32, 10, 24] {
            let t = Thresholds::for_year(year);
            assert!(t.is_ordered());
            assert_eq!(t.wave_interval_mask(&field), classify(&field, &t).wave);
        }
    }

    /// Year 40: shallow 0.69, wave 0.74. Those cells are vegetation in the
    /// partition but still sit in the raw wave interval.
    #[test]
    fn wave_interval_ignores_vegetation_precedence() {
        let t = Thresholds::for_year(40);
        let field = ScalarField::from_fn(4, 1, |_, c| [0.60, 0.70, 0.72, 0.76][c]);
        let raw = t.wave_interval_mask(&field);
        assert_eq!(raw.data, [false, true, true, false]);
        assert!(classify(&field, &t).wave.is_empty());
    }
}
