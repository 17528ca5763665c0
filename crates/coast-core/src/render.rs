//! Zone masks → RGBA raster.

use serde::{Deserialize, Serialize};

use crate::error::{check_same_shape, Result};
use crate::zones::{Zone, ZoneMasks};

pub type Rgba = [u8; 4];

/// Per-zone fill colours (straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub deep_water: Rgba,
    pub shallow_water: Rgba,
    pub wave: Rgba,
    pub sand: Rgba,
    pub vegetation: Rgba,
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        deep_water:    [10, 20, 60, 200],   // deep navy
        shallow_water: [0, 100, 200, 180],  // cyan blue
        wave:          [220, 255, 255, 220], // foam
        sand:          [194, 178, 128, 150],
        vegetation:    [0, 180, 100, 160],
    };

    /// Brighter vegetation for projected-recovery renders.
    pub const OPTIMISTIC: Palette = Palette {
        vegetation: [0, 255, 100, 200],
        ..Palette::STANDARD
    };

    pub fn color(&self, zone: Zone) -> Rgba {
        match zone {
            Zone::DeepWater    => self.deep_water,
            Zone::ShallowWater => self.shallow_water,
            Zone::Wave         => self.wave,
            Zone::Sand         => self.sand,
            Zone::Vegetation   => self.vegetation,
        }
    }

    pub fn entries(&self) -> [Rgba; 5] {
        Zone::ALL.map(|z| self.color(z))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// An RGBA8 image, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, 4)
    }

    pub fn pixel(&self, row: usize, col: usize) -> Rgba {
        let i = (row * self.width + col) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn put_pixel(&mut self, row: usize, col: usize, color: Rgba) {
        let i = (row * self.width + col) * 4;
        self.data[i..i + 4].copy_from_slice(&color);
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Paint every mask onto a fresh raster, deep water first, vegetation last.
pub fn composite(masks: &ZoneMasks, palette: &Palette) -> Result<Raster> {
    let (w, h) = masks.shape();
    for (_, mask) in masks.iter() {
        check_same_shape((w, h), mask.shape())?;
    }

    let mut raster = Raster::new(w, h);
    for (zone, mask) in masks.iter() {
        let color = palette.color(zone);
        for (px, _) in raster
            .data
            .chunks_exact_mut(4)
            .zip(&mask.data)
            .filter(|(_, on)| **on)
        {
            px.copy_from_slice(&color);
        }
    }

    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{generate_field, ScalarField};
    use crate::zones::{classify, Thresholds, ZoneMask};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn raster_shape_is_height_width_4() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = generate_field(30, 20, &mut rng).unwrap();
        let raster = composite(&classify(&field, &Thresholds::for_year(0)), &Palette::STANDARD).unwrap();
        assert_eq!(raster.shape(), (20, 30, 4));
        assert_eq!(raster.as_bytes().len(), 20 * 30 * 4);
    }

    #[test]
    fn every_pixel_is_a_palette_entry() {
        let mut rng = StdRng::seed_from_u64(2);
        for palette in [Palette::STANDARD, Palette::OPTIMISTIC] {
            for year in [0u32, 10, 45] {
                let field = generate_field(64, 64, &mut rng).unwrap();
                let raster = composite(&classify(&field, &Thresholds::for_year(year)), &palette).unwrap();
                let entries = palette.entries();
                assert!(raster.pixels().all(|p| entries.contains(&p)));
            }
        }
    }

    #[test]
    fn pixel_colour_follows_zone() {
        let field = ScalarField::from_fn(5, 1, |_, c| [0.1, 0.4, 0.47, 0.6, 0.9][c]);
        let raster = composite(&classify(&field, &Thresholds::for_year(0)), &Palette::STANDARD).unwrap();
        assert_eq!(raster.pixel(0, 0), [10, 20, 60, 200]);
        assert_eq!(raster.pixel(0, 1), [0, 100, 200, 180]);
        assert_eq!(raster.pixel(0, 2), [220, 255, 255, 220]);
        assert_eq!(raster.pixel(0, 3), [194, 178, 128, 150]);
        assert_eq!(raster.pixel(0, 4), [0, 180, 100, 160]);
    }

    #[test]
    fn optimistic_palette_only_changes_vegetation() {
        let standard = Palette::STANDARD.entries();
        let opt = Palette::OPTIMISTIC.entries();
        assert_eq!(standard[..4], opt[..4]);
        assert_eq!(opt[4], [0, 255, 100, 200]);
    }

    #[test]
    fn later_masks_overwrite_earlier() {
        let all = ZoneMask::from_fn(2, 2, |_, _| true);
        let none = ZoneMask::new(2, 2);
        let masks = ZoneMasks {
            deep_water: all.clone(),
            shallow_water: none.clone(),
            wave: none.clone(),
            sand: none,
            vegetation: all,
        };
        let raster = composite(&masks, &Palette::STANDARD).unwrap();
        assert!(raster.pixels().all(|p| p == Palette::STANDARD.vegetation));
    }

    #[test]
    fn mismatched_masks_rejected() {
        let masks = ZoneMasks {
            deep_water: ZoneMask::new(4, 4),
            shallow_water: ZoneMask::new(4, 4),
            wave: ZoneMask::new(3, 4),
            sand: ZoneMask::new(4, 4),
            vegetation: ZoneMask::new(4, 4),
        };
        assert!(composite(&masks, &Palette::STANDARD).is_err());
    }
}
