use thiserror::Error;

/// Largest accepted grid edge, in cells.
pub const MAX_DIMENSION: usize = 4096;

/// Errors raised by the synthesis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoastError {
    #[error("invalid grid dimensions {width}x{height}: both sides must be in 1..={max}")]
    InvalidDimensions { width: usize, height: usize, max: usize },

    #[error(
        "grid shape mismatch: expected {expected_width}x{expected_height}, \
         found {found_width}x{found_height}"
    )]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        found_width: usize,
        found_height: usize,
    },
}

pub type Result<T> = std::result::Result<T, CoastError>;

/// Reject empty or oversized grids before any allocation happens.
pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(CoastError::InvalidDimensions { width, height, max: MAX_DIMENSION });
    }
    Ok(())
}

/// Fail with `DimensionMismatch` unless `found` has the `expected` shape.
pub(crate) fn check_same_shape(expected: (usize, usize), found: (usize, usize)) -> Result<()> {
    if expected != found {
        return Err(CoastError::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            found_width: found.0,
            found_height: found.1,
        });
    }
    Ok(())
}
