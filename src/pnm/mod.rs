//! PNM family: P1–P6 (PBM, PGM, PPM in plain and binary variants).

mod decode;
mod depth;
mod encode;
mod header;
mod tokenizer;

use core::fmt;

use crate::error::PnmError;
use crate::grid::{self, PixelGrid};
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use alloc::vec::Vec;
use enough::Stop;

pub(crate) use header::{PnmHeader, settled_header_len};

/// Image family, determined by the magic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// PBM — one bit per pixel.
    Bitmap,
    /// PGM — one gray sample per pixel.
    Graymap,
    /// PPM — three RGB samples per pixel.
    Pixmap,
}

impl Family {
    /// Samples per pixel in the file.
    pub fn channels(self) -> usize {
        match self {
            Family::Bitmap | Family::Graymap => 1,
            Family::Pixmap => 3,
        }
    }

    /// Layout of the grid produced by decoding this family.
    pub fn native_layout(self) -> PixelLayout {
        match self {
            Family::Bitmap => PixelLayout::Gray8,
            Family::Graymap => PixelLayout::Gray16,
            Family::Pixmap => PixelLayout::Rgba16,
        }
    }

    /// Whether the header carries a maxval field.
    pub fn has_maxval(self) -> bool {
        self != Family::Bitmap
    }
}

/// Sample encoding, determined by the magic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// ASCII decimal samples.
    Plain,
    /// Raw bytes (big-endian words above maxval 255).
    Binary,
}

/// The six two-character magic identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Magic {
    /// Plain bitmap.
    P1,
    /// Plain graymap.
    P2,
    /// Plain pixmap.
    P3,
    /// Binary bitmap.
    P4,
    /// Binary graymap.
    P5,
    /// Binary pixmap.
    P6,
}

impl Magic {
    pub const ALL: [Magic; 6] = [
        Magic::P1,
        Magic::P2,
        Magic::P3,
        Magic::P4,
        Magic::P5,
        Magic::P6,
    ];

    pub fn new(family: Family, mode: Mode) -> Self {
        match (family, mode) {
            (Family::Bitmap, Mode::Plain) => Magic::P1,
            (Family::Graymap, Mode::Plain) => Magic::P2,
            (Family::Pixmap, Mode::Plain) => Magic::P3,
            (Family::Bitmap, Mode::Binary) => Magic::P4,
            (Family::Graymap, Mode::Binary) => Magic::P5,
            (Family::Pixmap, Mode::Binary) => Magic::P6,
        }
    }

    /// Match an exact two-byte token (case-sensitive).
    pub fn from_bytes(token: &[u8]) -> Option<Self> {
        match token {
            b"P1" => Some(Magic::P1),
            b"P2" => Some(Magic::P2),
            b"P3" => Some(Magic::P3),
            b"P4" => Some(Magic::P4),
            b"P5" => Some(Magic::P5),
            b"P6" => Some(Magic::P6),
            _ => None,
        }
    }

    /// Sniff the magic prefix of a stream.
    pub fn detect(data: &[u8]) -> Option<Self> {
        data.get(..2).and_then(Self::from_bytes)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Magic::P1 => "P1",
            Magic::P2 => "P2",
            Magic::P3 => "P3",
            Magic::P4 => "P4",
            Magic::P5 => "P5",
            Magic::P6 => "P6",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Magic::P1 | Magic::P4 => Family::Bitmap,
            Magic::P2 | Magic::P5 => Family::Graymap,
            Magic::P3 | Magic::P6 => Family::Pixmap,
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Magic::P1 | Magic::P2 | Magic::P3 => Mode::Plain,
            Magic::P4 | Magic::P5 | Magic::P6 => Mode::Binary,
        }
    }

    /// Default target for a layout: gray → P5, color (with or without alpha) → P6.
    pub fn default_for(layout: PixelLayout) -> Result<Self, PnmError> {
        match layout.channels() {
            1 => Ok(Magic::P5),
            3 | 4 => Ok(Magic::P6),
            _ => Err(PnmError::UnsupportedColorModel(layout)),
        }
    }
}

impl fmt::Display for Magic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe header for ImageInfo without decoding.
pub(crate) fn probe_header(data: &[u8]) -> Result<ImageInfo, PnmError> {
    let header = header::parse_header(data)?;
    Ok(ImageInfo::from_header(&header))
}

/// Decode PNM data (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PnmError> {
    let header = header::parse_header(data)?;
    let layout = header.magic.family().native_layout();

    if let Some(limits) = limits {
        limits.check_grid(header.width, header.height, layout)?;
    }
    grid::buffer_len(header.width, header.height, layout)?;

    stop.check()?;

    let raster = data.get(header.data_offset..).unwrap_or_default();
    let pixels = decode::decode_raster(raster, &header, stop)?;
    tracing::trace!(magic = %header.magic, bytes = pixels.len(), "raster decoded");
    Ok(PixelGrid::from_decoded(
        pixels,
        header.width,
        header.height,
        layout,
    ))
}

/// Encode to PNM (called from EncodeRequest).
pub(crate) fn encode(
    grid: &PixelGrid,
    magic: Option<Magic>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PnmError> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err(PnmError::InvalidImageDimensions {
            width: grid.width(),
            height: grid.height(),
        });
    }
    let default = Magic::default_for(grid.layout())?;
    let magic = magic.unwrap_or(default);
    let header = PnmHeader::for_grid(magic, grid);
    tracing::debug!(
        magic = %magic,
        width = grid.width(),
        height = grid.height(),
        maxval = header.maxval,
        layout = ?grid.layout(),
        "encoding pnm"
    );
    stop.check()?;
    encode::encode_pnm(grid, &header, stop)
}
