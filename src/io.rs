//! `std::io` entry points.
//!
//! The reader or writer is held only for the duration of one call and is
//! dropped on every return path, errors included.

use std::io::{ErrorKind, Read, Write};

use enough::Stop;

use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::PnmError;
use crate::grid::PixelGrid;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::pnm::{Magic, settled_header_len};

fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>, PnmError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(data)
}

/// Read a whole stream and decode it.
pub fn decode_from_reader<R: Read>(reader: R, stop: impl Stop) -> Result<PixelGrid, PnmError> {
    decode_from_reader_with_limits(reader, &Limits::default(), stop)
}

/// [`decode_from_reader`] with resource limits checked against the header.
pub fn decode_from_reader_with_limits<R: Read>(
    reader: R,
    limits: &Limits,
    stop: impl Stop,
) -> Result<PixelGrid, PnmError> {
    let data = read_all(reader)?;
    DecodeRequest::new(&data).with_limits(limits).decode(stop)
}

/// Header bytes [`read_info`] buffers before giving up.
const MAX_HEADER_BYTES: usize = 4096;

/// Read only as much of the stream as the header needs and parse it.
///
/// The stream is read in small chunks until the header outcome is settled,
/// the stream ends, or [`MAX_HEADER_BYTES`] have been buffered.
pub fn read_info<R: Read>(mut reader: R) -> Result<ImageInfo, PnmError> {
    let mut data = Vec::new();
    let mut chunk = [0u8; 64];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            return ImageInfo::from_bytes(&data);
        }
        data.extend_from_slice(&chunk[..n]);
        if let Some(end) = settled_header_len(&data) {
            return ImageInfo::from_bytes(&data[..end]);
        }
        if data.len() >= MAX_HEADER_BYTES {
            tracing::debug!(buffered = data.len(), "pnm header not found");
            return Err(PnmError::InvalidHeader(format!(
                "no complete header in the first {MAX_HEADER_BYTES} bytes"
            )));
        }
    }
}

/// Encode `grid` into `writer`. `magic: None` picks P5 for gray and P6 for color.
pub fn encode_to_writer<W: Write>(
    writer: W,
    grid: &PixelGrid,
    magic: Option<Magic>,
    stop: impl Stop,
) -> Result<(), PnmError> {
    let request = match magic {
        Some(m) => EncodeRequest::pnm(m),
        None => EncodeRequest::auto(),
    };
    request.encode_to(grid, writer, stop)
}
