/// Pixel memory layout of a [`crate::PixelGrid`].
///
/// 16-bit layouts store each sample as a native-endian `u16`.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// Single channel, 16-bit grayscale.
    Gray16,
    /// Gray + alpha, 8-bit. Has no PNM mapping.
    GrayAlpha8,
    /// Gray + alpha, 16-bit. Has no PNM mapping.
    GrayAlpha16,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 3 channels, 8-bit BGR.
    Bgr8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
    /// 3 channels, 16-bit RGB.
    Rgb16,
    /// 4 channels, 16-bit RGBA.
    Rgba16,
}

impl PixelLayout {
    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 => 1,
            Self::GrayAlpha8 | Self::GrayAlpha16 => 2,
            Self::Rgb8 | Self::Bgr8 | Self::Rgb16 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Rgba16 => 4,
        }
    }

    /// Bytes per channel sample (1 or 2).
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            Self::Gray16 | Self::GrayAlpha16 | Self::Rgb16 | Self::Rgba16 => 2,
            _ => 1,
        }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.bytes_per_sample()
    }

    /// Largest sample value the layout can hold: 255 or 65535.
    pub fn native_maxval(&self) -> u16 {
        if self.bytes_per_sample() == 2 {
            u16::MAX
        } else {
            u8::MAX as u16
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::GrayAlpha8 | Self::GrayAlpha16 | Self::Rgba8 | Self::Bgra8 | Self::Rgba16
        )
    }

    /// Whether the color channels are gray (as opposed to RGB/BGR).
    pub fn is_gray(&self) -> bool {
        matches!(
            self,
            Self::Gray8 | Self::Gray16 | Self::GrayAlpha8 | Self::GrayAlpha16
        )
    }

    /// Index of the red, green and blue samples within one pixel.
    pub(crate) fn rgb_order(&self) -> [usize; 3] {
        match self {
            Self::Bgr8 | Self::Bgra8 => [2, 1, 0],
            Self::Rgb8 | Self::Rgba8 | Self::Rgb16 | Self::Rgba16 => [0, 1, 2],
            _ => [0, 0, 0],
        }
    }
}
