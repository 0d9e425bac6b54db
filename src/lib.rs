//! # zenpnm
//!
//! Portable Any-Map codec: PBM, PGM and PPM in both plain (ASCII) and binary
//! variants, i.e. magics `P1` through `P6`.
//!
//! ## Canonical depth
//!
//! Decoding always rescales samples from `0..=maxval` to a fixed depth:
//! - **Bitmap** (`P1`, `P4`) → [`PixelLayout::Gray8`], black = 0, white = 255
//! - **Graymap** (`P2`, `P5`) → [`PixelLayout::Gray16`]
//! - **Pixmap** (`P3`, `P6`) → [`PixelLayout::Rgba16`], alpha always 65535
//!
//! Encoding writes samples at the grid's native depth, so the header maxval
//! is 255 for 8-bit layouts and 65535 for 16-bit layouts.
//!
//! ## Bitmap polarity
//!
//! A `1` bit (or `'1'` character) is black, `0` is white, in both directions.
//! Padding bits at the end of a packed row are written as 0.
//!
//! ## Non-Goals
//!
//! - PAM (`P7`) and PFM
//! - Streaming or partial decode
//! - Color management beyond a linear rescale
//!
//! ## Usage
//!
//! ```no_run
//! use zenpnm::{DecodeRequest, EncodeRequest, ImageInfo, Magic, Unstoppable};
//!
//! let data: &[u8] = &[]; // your PNM bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {}", info.width, info.height, info.magic);
//!
//! let grid = DecodeRequest::new(data).decode(Unstoppable)?;
//!
//! // Re-encode as plain PPM
//! let encoded = EncodeRequest::pnm(Magic::P3).encode(&grid, Unstoppable)?;
//! # Ok::<(), zenpnm::PnmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod encode;
mod error;
mod grid;
mod info;
mod limits;
mod pixel;
mod pnm;

#[cfg(feature = "std")]
mod io;

#[cfg(feature = "rgb")]
mod typed;

use alloc::vec::Vec;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::PnmError;
pub use grid::PixelGrid;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::PixelLayout;
pub use pnm::{Family, Magic, Mode};

#[cfg(feature = "std")]
pub use io::{decode_from_reader, decode_from_reader_with_limits, encode_to_writer, read_info};

/// Decode PNM bytes into a canonical-depth grid.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<PixelGrid, PnmError> {
    DecodeRequest::new(data).decode(stop)
}

/// Parse only the header.
pub fn decode_header(data: &[u8]) -> Result<ImageInfo, PnmError> {
    ImageInfo::from_bytes(data)
}

/// Encode `grid`; `magic: None` picks P5 for gray and P6 for color.
pub fn encode(grid: &PixelGrid, magic: Option<Magic>, stop: impl Stop) -> Result<Vec<u8>, PnmError> {
    let request = match magic {
        Some(m) => EncodeRequest::pnm(m),
        None => EncodeRequest::auto(),
    };
    request.encode(grid, stop)
}
