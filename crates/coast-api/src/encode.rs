//! Raster ↔ `data:image/png;base64,…` conversion.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};

use coast_core::Raster;

use crate::error::ApiError;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ApiError> {
    let (w, h) = (raster.width() as u32, raster.height() as u32);
    let img = RgbaImage::from_raw(w, h, raster.as_bytes().to_vec())
        .ok_or(ApiError::RasterShape { width: w, height: h })?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Encode a raster as a PNG data URI.
pub fn png_data_uri(raster: &Raster) -> Result<String, ApiError> {
    let png = encode_png(raster)?;
    Ok(format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(png)))
}

/// Extract the PNG bytes from a data URI produced by [`png_data_uri`].
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ApiError> {
    let b64 = uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or_else(|| ApiError::DataUri("missing `data:image/png;base64,` prefix".into()))?;
    STANDARD.decode(b64).map_err(|e| ApiError::DataUri(e.to_string()))
}
