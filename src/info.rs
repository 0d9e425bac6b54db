use crate::error::PnmError;
use crate::pixel::PixelLayout;
use crate::pnm::{Family, Magic, Mode, PnmHeader};

/// Header-level facts about a PNM stream, read without decoding the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub magic: Magic,
    /// Declared maxval (1 for bitmaps).
    pub maxval: u16,
    /// Layout a full decode will produce.
    pub native_layout: PixelLayout,
}

impl ImageInfo {
    /// Probe image info from the header bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PnmError> {
        crate::pnm::probe_header(data)
    }

    pub(crate) fn from_header(header: &PnmHeader) -> Self {
        Self {
            width: header.width,
            height: header.height,
            magic: header.magic,
            maxval: header.maxval,
            native_layout: header.magic.family().native_layout(),
        }
    }

    pub fn family(&self) -> Family {
        self.magic.family()
    }

    pub fn mode(&self) -> Mode {
        self.magic.mode()
    }
}
