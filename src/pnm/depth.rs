//! Sample depth handling: maxval → canonical 16-bit, and the gray/bit
//! reductions used when writing a grid into a narrower family.

use alloc::format;

use crate::error::PnmError;

/// Rescales raw samples in `0..=maxval` to `0..=65535`, rounding half up.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rescale {
    maxval: u32,
}

impl Rescale {
    pub(crate) fn new(maxval: u16) -> Self {
        debug_assert!(maxval > 0);
        Self {
            maxval: u32::from(maxval),
        }
    }

    /// Fails when `raw` exceeds maxval.
    #[inline]
    pub(crate) fn apply(&self, raw: u32) -> Result<u16, PnmError> {
        if raw > self.maxval {
            return Err(PnmError::InvalidSampleData(format!(
                "sample {raw} exceeds maxval {}",
                self.maxval
            )));
        }
        // 65535 * 65535 + 32767 still fits in u32.
        Ok(((raw * 65535 + self.maxval / 2) / self.maxval) as u16)
    }
}

/// Integer Rec.601 luma of an RGB triple; any common depth.
#[inline]
pub(crate) fn luma(r: u16, g: u16, b: u16) -> u16 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u16
}

/// Bitmap bit for a gray value: 1 (black) below half of `native_max`.
#[inline]
pub(crate) fn is_black(gray: u16, native_max: u16) -> bool {
    u32::from(gray) * 2 <= u32::from(native_max)
}
