//! Typed pixel conversions (`rgb` / `imgref` features).

use alloc::vec::Vec;

use rgb::{AsPixels as _, ComponentBytes as _, ComponentSlice as _, Rgb, Rgba};

use crate::error::PnmError;
use crate::grid::PixelGrid;
use crate::pixel::PixelLayout;

impl PixelGrid {
    fn expect_layout(&self, expected: PixelLayout) -> Result<(), PnmError> {
        if self.layout() != expected {
            return Err(PnmError::LayoutMismatch {
                expected,
                actual: self.layout(),
            });
        }
        Ok(())
    }

    pub fn from_rgb8_pixels(pixels: &[Rgb<u8>], width: u32, height: u32) -> Result<Self, PnmError> {
        Self::new(pixels.as_bytes().to_vec(), width, height, PixelLayout::Rgb8)
    }

    pub fn from_rgba8_pixels(
        pixels: &[Rgba<u8>],
        width: u32,
        height: u32,
    ) -> Result<Self, PnmError> {
        Self::new(pixels.as_bytes().to_vec(), width, height, PixelLayout::Rgba8)
    }

    pub fn from_rgba16_pixels(
        pixels: &[Rgba<u16>],
        width: u32,
        height: u32,
    ) -> Result<Self, PnmError> {
        Self::from_samples16(pixels.as_slice(), width, height, PixelLayout::Rgba16)
    }

    /// Pixels of an `Rgba16` grid, i.e. a decoded pixmap.
    pub fn to_rgba16_pixels(&self) -> Result<Vec<Rgba<u16>>, PnmError> {
        self.expect_layout(PixelLayout::Rgba16)?;
        let samples: Vec<u16> = self.samples().collect();
        let pixels: &[Rgba<u16>] = samples.as_pixels();
        Ok(pixels.to_vec())
    }

    /// Pixels of an `Rgb8` grid.
    pub fn to_rgb8_pixels(&self) -> Result<Vec<Rgb<u8>>, PnmError> {
        self.expect_layout(PixelLayout::Rgb8)?;
        let pixels: &[Rgb<u8>] = self.pixels().as_pixels();
        Ok(pixels.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn rgb8_pixels_share_the_byte_layout() {
        let pixels = [Rgb { r: 1, g: 2, b: 3 }, Rgb { r: 4, g: 5, b: 6 }];
        let grid = PixelGrid::from_rgb8_pixels(&pixels, 2, 1).unwrap();
        assert_eq!(grid.pixels(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(grid.to_rgb8_pixels().unwrap(), pixels);
    }

    #[test]
    fn rgba16_pixels_round_trip() {
        let pixels = vec![Rgba {
            r: 1u16,
            g: 300,
            b: 65535,
            a: 9,
        }];
        let grid = PixelGrid::from_rgba16_pixels(&pixels, 1, 1).unwrap();
        assert_eq!(grid.sample(0, 0, 1), Some(300));
        assert_eq!(grid.to_rgba16_pixels().unwrap(), pixels);
    }
}

#[cfg(feature = "imgref")]
mod img {
    use alloc::vec::Vec;

    use imgref::{ImgRef, ImgVec};
    use rgb::{ComponentBytes, ComponentSlice, Rgb, Rgba};

    use crate::error::PnmError;
    use crate::grid::PixelGrid;
    use crate::pixel::PixelLayout;

    fn dims<T>(img: &ImgRef<'_, T>) -> Result<(u32, u32), PnmError> {
        match (u32::try_from(img.width()), u32::try_from(img.height())) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => Err(PnmError::DimensionsTooLarge {
                width: u32::MAX,
                height: u32::MAX,
            }),
        }
    }

    /// Strided rows packed into one contiguous byte buffer.
    fn packed_bytes<P>(img: ImgRef<'_, P>) -> Vec<u8>
    where
        [P]: ComponentBytes<u8>,
    {
        let mut out = Vec::new();
        for row in img.rows() {
            out.extend_from_slice(row.as_bytes());
        }
        out
    }

    fn packed_samples16<P>(img: ImgRef<'_, P>) -> Vec<u16>
    where
        [P]: ComponentSlice<u16>,
    {
        let mut out = Vec::new();
        for row in img.rows() {
            out.extend_from_slice(row.as_slice());
        }
        out
    }

    impl PixelGrid {
        pub fn from_imgref_gray8(img: ImgRef<'_, u8>) -> Result<Self, PnmError> {
            let (w, h) = dims(&img)?;
            Self::new(img.rows().flatten().copied().collect(), w, h, PixelLayout::Gray8)
        }

        pub fn from_imgref_gray16(img: ImgRef<'_, u16>) -> Result<Self, PnmError> {
            let (w, h) = dims(&img)?;
            let samples: Vec<u16> = img.rows().flatten().copied().collect();
            Self::from_samples16(&samples, w, h, PixelLayout::Gray16)
        }

        pub fn from_imgref_rgb8(img: ImgRef<'_, Rgb<u8>>) -> Result<Self, PnmError> {
            let (w, h) = dims(&img)?;
            Self::new(packed_bytes(img), w, h, PixelLayout::Rgb8)
        }

        pub fn from_imgref_rgba16(img: ImgRef<'_, Rgba<u16>>) -> Result<Self, PnmError> {
            let (w, h) = dims(&img)?;
            Self::from_samples16(&packed_samples16(img), w, h, PixelLayout::Rgba16)
        }

        /// Decoded bitmap as an 8-bit image (0 = black, 255 = white).
        pub fn to_imgvec_gray8(&self) -> Result<ImgVec<u8>, PnmError> {
            self.expect_layout(PixelLayout::Gray8)?;
            Ok(ImgVec::new(
                self.pixels().to_vec(),
                self.width() as usize,
                self.height() as usize,
            ))
        }

        /// Decoded graymap as a 16-bit image.
        pub fn to_imgvec_gray16(&self) -> Result<ImgVec<u16>, PnmError> {
            self.expect_layout(PixelLayout::Gray16)?;
            Ok(ImgVec::new(
                self.samples().collect(),
                self.width() as usize,
                self.height() as usize,
            ))
        }

        /// Decoded pixmap as a 16-bit RGBA image (alpha always opaque).
        pub fn to_imgvec_rgba16(&self) -> Result<ImgVec<Rgba<u16>>, PnmError> {
            Ok(ImgVec::new(
                self.to_rgba16_pixels()?,
                self.width() as usize,
                self.height() as usize,
            ))
        }
    }

}
