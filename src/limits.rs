use alloc::format;

use crate::error::PnmError;
use crate::pixel::PixelLayout;

/// Resource limits applied to a header before any raster is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded grid.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits that bound only the decoded grid size.
    pub fn with_max_memory(bytes: u64) -> Self {
        Self {
            max_memory_bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Check that a `width` x `height` grid in `layout` fits.
    pub(crate) fn check_grid(
        &self,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<(), PnmError> {
        let (width, height) = (u64::from(width), u64::from(height));
        exceeds("width", width, self.max_width)?;
        exceeds("height", height, self.max_height)?;
        let pixels = width * height;
        exceeds("pixel count", pixels, self.max_pixels)?;
        let bytes = pixels.saturating_mul(layout.bytes_per_pixel() as u64);
        exceeds("decoded size in bytes", bytes, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), PnmError> {
    match limit {
        Some(max) if value > max => Err(PnmError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
