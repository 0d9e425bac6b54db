//! Header parse/serialize: magic, width, height and (except for bitmaps) maxval.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use super::tokenizer::{Tokenizer, is_whitespace, parse_decimal};
use super::{Family, Magic};
use crate::error::PnmError;
use crate::grid::PixelGrid;

/// Parsed PNM header (internal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PnmHeader {
    pub magic: Magic,
    pub width: u32,
    pub height: u32,
    /// 1 for bitmaps.
    pub maxval: u16,
    /// 2 when maxval exceeds 255, else 1.
    pub bytes_per_sample: usize,
    /// Offset of the first raster byte.
    pub data_offset: usize,
}

impl PnmHeader {
    pub(crate) fn new(magic: Magic, width: u32, height: u32, maxval: u16) -> Self {
        let maxval = if magic.family().has_maxval() { maxval } else { 1 };
        Self {
            magic,
            width,
            height,
            maxval,
            bytes_per_sample: if maxval > 255 { 2 } else { 1 },
            data_offset: 0,
        }
    }

    /// Header for writing `grid`; maxval follows the grid's native depth.
    pub(crate) fn for_grid(magic: Magic, grid: &PixelGrid) -> Self {
        Self::new(magic, grid.width(), grid.height(), grid.layout().native_maxval())
    }

    /// Append `"<magic>\n<width> <height>\n[<maxval>\n]"`.
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        let text = if self.magic.family().has_maxval() {
            format!(
                "{}\n{} {}\n{}\n",
                self.magic, self.width, self.height, self.maxval
            )
        } else {
            format!("{}\n{} {}\n", self.magic, self.width, self.height)
        };
        out.extend_from_slice(text.as_bytes());
    }
}

/// Parse the header fields from the start of `data`.
pub(crate) fn parse_header(data: &[u8]) -> Result<PnmHeader, PnmError> {
    let mut tokens = Tokenizer::new(data);
    let magic = tokens.next_token()?;
    let magic = Magic::from_bytes(magic).ok_or(PnmError::UnrecognizedFormat)?;

    let width = read_field(&mut tokens, "width")?;
    let height = read_field(&mut tokens, "height")?;
    if width == 0 || height == 0 {
        return Err(PnmError::InvalidHeader(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }

    let maxval = if magic.family() == Family::Bitmap {
        1
    } else {
        let maxval = read_field(&mut tokens, "maxval")?;
        match u16::try_from(maxval) {
            Ok(m) if m > 0 => m,
            _ => {
                return Err(PnmError::InvalidHeader(format!(
                    "maxval must be in 1..=65535, got {maxval}"
                )));
            }
        }
    };

    let mut header = PnmHeader::new(magic, width, height, maxval);
    header.data_offset = tokens.position();
    tracing::debug!(
        magic = %header.magic,
        width,
        height,
        maxval = header.maxval,
        data_offset = header.data_offset,
        "parsed pnm header"
    );
    Ok(header)
}

/// Length of the prefix of a partially read stream whose header outcome can
/// no longer change as more bytes arrive.
///
/// Only tokens followed by whitespace count. Returns `None` while every
/// complete field so far is valid and some are still missing.
pub(crate) fn settled_header_len(data: &[u8]) -> Option<usize> {
    let end = data.iter().rposition(|&b| is_whitespace(b))? + 1;
    let tokens: Vec<&[u8]> = Tokenizer::new(&data[..end]).take(4).collect();
    let (first, fields) = tokens.split_first()?;
    let Some(magic) = Magic::from_bytes(first) else {
        return Some(end);
    };
    let needed = if magic.family().has_maxval() { 3 } else { 2 };
    let fields = &fields[..fields.len().min(needed)];
    let malformed = fields.iter().any(|t| parse_decimal(t).is_none());
    (fields.len() == needed || malformed).then_some(end)
}

fn read_field(tokens: &mut Tokenizer<'_>, name: &str) -> Result<u32, PnmError> {
    let token = match tokens.next_token() {
        Ok(t) => t,
        Err(PnmError::UnexpectedEof) => {
            return Err(PnmError::InvalidHeader(format!("missing {name}")));
        }
        Err(e) => return Err(e),
    };
    parse_decimal(token).ok_or_else(|| {
        PnmError::InvalidHeader(format!(
            "{name} is not a decimal integer: {:?}",
            String::from_utf8_lossy(token)
        ))
    })
}
