//! Cross-shore transect overlay.
//!
//! Every 40 rows (starting at row 20) the wave band's horizontal centre is
//! located and marked on the raster. Centres east of the midline sit on the
//! landward, erosion-prone half and are counted as risk points.

use crate::error::{check_same_shape, Result};
use crate::render::{Raster, Rgba};
use crate::zones::ZoneMask;

pub const FIRST_ROW: usize = 20;
pub const ROW_SPACING: usize = 40;

/// Transect line extent around the centre, in pixels.
pub const LINE_REACH_LEFT: i64 = 30;
pub const LINE_REACH_RIGHT: i64 = 50;
pub const MARKER_RADIUS: i64 = 2;

pub const LINE_COLOR: Rgba = [255, 255, 0, 180];
/// `#00ffcc`
pub const SEAWARD_MARKER: Rgba = [0x00, 0xff, 0xcc, 0xff];
/// `#ff0055`
pub const LANDWARD_MARKER: Rgba = [0xff, 0x00, 0x55, 0xff];

/// A surface the transect pass can draw on. Coordinates may fall outside the
/// surface; implementations clip.
pub trait Canvas {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Horizontal line on row `y` from `x0` to `x1`, both inclusive.
    fn hline(&mut self, y: i64, x0: i64, x1: i64, color: Rgba);
    /// Filled disc centred on `(cx, cy)`.
    fn disc(&mut self, cx: i64, cy: i64, radius: i64, color: Rgba);
}

impl Canvas for Raster {
    fn width(&self) -> usize {
        Raster::width(self)
    }

    fn height(&self) -> usize {
        Raster::height(self)
    }

    fn hline(&mut self, y: i64, x0: i64, x1: i64, color: Rgba) {
        if y < 0 || y >= Raster::height(self) as i64 {
            return;
        }
        let lo = x0.max(0);
        let hi = x1.min(Raster::width(self) as i64 - 1);
        for x in lo..=hi {
            self.put_pixel(y as usize, x as usize, color);
        }
    }

    fn disc(&mut self, cx: i64, cy: i64, radius: i64, color: Rgba) {
        let (w, h) = (Raster::width(self) as i64, Raster::height(self) as i64);
        // r² + 1 keeps the (r, ±1) cells so small markers read as round.
        let limit = radius * radius + 1;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let (x, y) = (cx + dx, cy + dy);
                if dx * dx + dy * dy <= limit && (0..w).contains(&x) && (0..h).contains(&y) {
                    self.put_pixel(y as usize, x as usize, color);
                }
            }
        }
    }
}

/// Which half of the field a transect centre falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Seaward,
    Landward,
}

/// One scanned row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transect {
    pub row: usize,
    pub x_center: usize,
    pub side: Side,
    pub at_risk: bool,
}

impl Transect {
    /// Classify a centre against the integer midline `width / 2`. A centre
    /// exactly on the midline is drawn landward but not counted as a risk.
    pub fn new(row: usize, x_center: usize, width: usize) -> Self {
        let midline = width / 2;
        Self {
            row,
            x_center,
            side: if x_center < midline { Side::Seaward } else { Side::Landward },
            at_risk: x_center > midline,
        }
    }

    pub fn marker_color(&self) -> Rgba {
        match self.side {
            Side::Seaward  => SEAWARD_MARKER,
            Side::Landward => LANDWARD_MARKER,
        }
    }
}

/// Truncated mean column of the set cells in `row`, or `None` if the row
/// has no wave cells.
pub fn wave_center(mask: &ZoneMask, row: usize) -> Option<usize> {
    let (sum, n) = mask
        .row(row)
        .iter()
        .enumerate()
        .filter(|(_, on)| **on)
        .fold((0usize, 0usize), |(sum, n), (c, _)| (sum + c, n + 1));
    (n > 0).then(|| sum / n)
}

/// Scanned rows that contain wave cells, top to bottom.
pub fn scan(wave: &ZoneMask) -> Vec<Transect> {
    (FIRST_ROW..wave.height)
        .step_by(ROW_SPACING)
        .filter_map(|y| wave_center(wave, y).map(|x| Transect::new(y, x, wave.width)))
        .collect()
}

/// Draw each transect onto `canvas` and return the number of risk points.
pub fn analyze_transects<C: Canvas + ?Sized>(canvas: &mut C, wave: &ZoneMask) -> Result<u32> {
    check_same_shape(wave.shape(), (canvas.width(), canvas.height()))?;

    let mut risk_points = 0u32;
    for t in scan(wave) {
        let (x, y) = (t.x_center as i64, t.row as i64);
        canvas.hline(y, x - LINE_REACH_LEFT, x + LINE_REACH_RIGHT, LINE_COLOR);
        canvas.disc(x, y, MARKER_RADIUS, t.marker_color());
        if t.at_risk {
            risk_points += 1;
        }
    }

    tracing::debug!(risk_points, "transect pass complete");
    Ok(risk_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls instead of rasterising them.
    struct RecordingCanvas {
        width: usize,
        height: usize,
        lines: Vec<(i64, i64, i64)>,
        discs: Vec<(i64, i64, Rgba)>,
    }

    impl RecordingCanvas {
        fn new(width: usize, height: usize) -> Self {
            Self { width, height, lines: Vec::new(), discs: Vec::new() }
        }
    }

    impl Canvas for RecordingCanvas {
        fn width(&self) -> usize { self.width }
        fn height(&self) -> usize { self.height }
        fn hline(&mut self, y: i64, x0: i64, x1: i64, _color: Rgba) {
            self.lines.push((y, x0, x1));
        }
        fn disc(&mut self, cx: i64, cy: i64, _radius: i64, color: Rgba) {
            self.discs.push((cx, cy, color));
        }
    }

    /// Wave band occupying columns `lo..=hi` on every row.
    fn band(width: usize, height: usize, lo: usize, hi: usize) -> ZoneMask {
        ZoneMask::from_fn(width, height, |_, c| (lo..=hi).contains(&c))
    }

    #[test]
    fn empty_wave_mask_draws_nothing() {
        let wave = ZoneMask::new(256, 256);
        let mut canvas = RecordingCanvas::new(256, 256);
        assert_eq!(analyze_transects(&mut canvas, &wave).unwrap(), 0);
        assert!(canvas.lines.is_empty());
        assert!(canvas.discs.is_empty());
    }

    #[test]
    fn scans_rows_20_60_100_and_so_on() {
        let wave = band(256, 256, 10, 20);
        let rows: Vec<usize> = scan(&wave).iter().map(|t| t.row).collect();
        assert_eq!(rows, vec![20, 60, 100, 140, 180, 220]);
    }

    #[test]
    fn center_is_truncated_mean() {
        let wave = ZoneMask::from_fn(10, 1, |_, c| c == 2 || c == 5);
        assert_eq!(wave_center(&wave, 0), Some(3)); // mean 3.5
        assert_eq!(wave_center(&ZoneMask::new(10, 1), 0), None);
    }

    #[test]
    fn right_half_centres_count_as_risk() {
        let wave = band(256, 256, 180, 200);
        let mut canvas = RecordingCanvas::new(256, 256);
        let risk = analyze_transects(&mut canvas, &wave).unwrap();
        assert_eq!(risk, 6);
        assert_eq!(canvas.lines[0], (20, 190 - 30, 190 + 50));
        assert!(canvas.discs.iter().all(|&(_, _, c)| c == LANDWARD_MARKER));
    }

    #[test]
    fn left_half_centres_are_safe() {
        let wave = band(256, 256, 40, 60);
        let mut canvas = RecordingCanvas::new(256, 256);
        assert_eq!(analyze_transects(&mut canvas, &wave).unwrap(), 0);
        assert_eq!(canvas.discs.len(), 6);
        assert!(canvas.discs.iter().all(|&(x, _, c)| x == 50 && c == SEAWARD_MARKER));
    }

    #[test]
    fn midline_centre_is_landward_but_not_risk() {
        let t = Transect::new(20, 128, 256);
        assert_eq!(t.side, Side::Landward);
        assert!(!t.at_risk);
        assert!(Transect::new(20, 129, 256).at_risk);
        assert_eq!(Transect::new(20, 127, 256).side, Side::Seaward);
    }

    #[test]
    fn only_rows_with_waves_are_drawn() {
        let wave = ZoneMask::from_fn(64, 128, |r, c| r == 60 && c == 40);
        let mut canvas = RecordingCanvas::new(64, 128);
        assert_eq!(analyze_transects(&mut canvas, &wave).unwrap(), 1);
        assert_eq!(canvas.lines, vec![(60, 10, 90)]);
    }

    #[test]
    fn raster_drawing_is_clipped() {
        let wave = ZoneMask::from_fn(40, 30, |_, c| c == 38);
        let mut raster = Raster::new(40, 30);
        assert_eq!(analyze_transects(&mut raster, &wave).unwrap(), 1);

        // Line covers 8..=39 on row 20, marker overwrites around x = 38.
        assert_eq!(raster.pixel(20, 8), LINE_COLOR);
        assert_eq!(raster.pixel(20, 7), [0, 0, 0, 0]);
        assert_eq!(raster.pixel(20, 38), LANDWARD_MARKER);
        assert_eq!(raster.pixel(18, 38), LANDWARD_MARKER);
        assert_eq!(raster.pixel(18, 36), [0, 0, 0, 0]); // disc corner
        assert_eq!(raster.pixel(21, 39), LANDWARD_MARKER);
        assert_eq!(raster.pixel(19, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn canvas_shape_must_match_mask() {
        let wave = ZoneMask::new(10, 10);
        let mut canvas = RecordingCanvas::new(12, 10);
        assert!(analyze_transects(&mut canvas, &wave).is_err());
    }
}
