use alloc::vec::Vec;

use crate::error::PnmError;
use crate::pixel::PixelLayout;

/// An owned width x height raster tagged with its [`PixelLayout`].
///
/// Decoding always produces one of three canonical layouts:
/// bitmaps become `Gray8` (0 or 255), graymaps `Gray16` and pixmaps `Rgba16`
/// with alpha forced to 65535.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl PixelGrid {
    /// Wrap a raw buffer. 16-bit layouts expect native-endian samples.
    ///
    /// Extra trailing bytes are dropped; a short buffer is an error.
    pub fn new(
        mut pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, PnmError> {
        let needed = buffer_len(width, height, layout)?;
        if pixels.len() < needed {
            return Err(PnmError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        pixels.truncate(needed);
        Ok(Self {
            pixels,
            width,
            height,
            layout,
        })
    }

    /// Build a 16-bit grid from one `u16` per channel sample.
    pub fn from_samples16(
        samples: &[u16],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, PnmError> {
        if layout.bytes_per_sample() != 2 {
            return Err(PnmError::UnsupportedColorModel(layout));
        }
        let pixels = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
        Self::new(pixels, width, height, layout)
    }

    pub(crate) fn from_decoded(pixels: Vec<u8>, width: u32, height: u32, layout: PixelLayout) -> Self {
        debug_assert_eq!(
            Some(pixels.len()),
            buffer_len(width, height, layout).ok()
        );
        Self {
            pixels,
            width,
            height,
            layout,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Read one channel sample, widened to `u16`.
    ///
    /// Returns `None` when the coordinates or channel are out of range.
    pub fn sample(&self, x: u32, y: u32, channel: usize) -> Option<u16> {
        if x >= self.width || y >= self.height || channel >= self.layout.channels() {
            return None;
        }
        let pixel = y as usize * self.width as usize + x as usize;
        let index = pixel * self.layout.channels() + channel;
        Some(read_sample(&self.pixels, index, self.layout.bytes_per_sample()))
    }

    /// All channel samples in row-major, channel-minor order.
    pub fn samples(&self) -> impl Iterator<Item = u16> + '_ {
        let bps = self.layout.bytes_per_sample();
        self.pixels.chunks_exact(bps).map(move |s| match bps {
            2 => u16::from_ne_bytes([s[0], s[1]]),
            _ => u16::from(s[0]),
        })
    }

    /// One row of raw bytes.
    pub(crate) fn row(&self, y: usize) -> &[u8] {
        let stride = self.width as usize * self.layout.bytes_per_pixel();
        &self.pixels[y * stride..(y + 1) * stride]
    }
}

/// Byte length of a `width` x `height` buffer in `layout`.
pub(crate) fn buffer_len(width: u32, height: u32, layout: PixelLayout) -> Result<usize, PnmError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
        .ok_or(PnmError::DimensionsTooLarge { width, height })
}

#[inline]
pub(crate) fn read_sample(bytes: &[u8], index: usize, bytes_per_sample: usize) -> u16 {
    if bytes_per_sample == 2 {
        let off = index * 2;
        u16::from_ne_bytes([bytes[off], bytes[off + 1]])
    } else {
        u16::from(bytes[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn shape_is_fixed_at_construction() {
        let grid = PixelGrid::new(vec![9; 5], 2, 2, PixelLayout::Gray8).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.layout(), PixelLayout::Gray8);
        assert_eq!(grid.pixels().len(), 4);

        let encoded = crate::encode(&grid, None, Unstoppable).unwrap();
        assert_eq!(encoded, b"P5\n2 2\n255\n\x09\x09\x09\x09");
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(matches!(
            PixelGrid::new(vec![0; 11], 2, 2, PixelLayout::Rgb8),
            Err(PnmError::BufferTooSmall {
                needed: 12,
                actual: 11
            })
        ));
    }
}
