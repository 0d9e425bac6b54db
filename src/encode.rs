use alloc::vec::Vec;
use enough::Stop;

use crate::error::PnmError;
use crate::grid::PixelGrid;
use crate::pnm::Magic;

/// Encode a [`PixelGrid`] as PNM.
///
/// Without an explicit magic, gray grids become P5 and color grids P6.
/// The header maxval is always the grid's native depth (255 or 65535).
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    magic: Option<Magic>,
}

impl EncodeRequest {
    /// Pick P5 or P6 from the grid's layout.
    pub fn auto() -> Self {
        Self { magic: None }
    }

    /// Write exactly this variant.
    pub fn pnm(magic: Magic) -> Self {
        Self { magic: Some(magic) }
    }

    /// Encode to a new byte buffer.
    pub fn encode(&self, grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
        crate::pnm::encode(grid, self.magic, &stop)
    }

    /// Encode into `writer`, buffered and flushed before returning.
    #[cfg(feature = "std")]
    pub fn encode_to<W: std::io::Write>(
        &self,
        grid: &PixelGrid,
        writer: W,
        stop: impl Stop,
    ) -> Result<(), PnmError> {
        use std::io::Write as _;

        let bytes = self.encode(grid, stop)?;
        let mut writer = std::io::BufWriter::new(writer);
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }
}
