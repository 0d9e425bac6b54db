//! Raster decoders for P1–P6.
//!
//! Output is always canonical: bitmaps → Gray8 (black 0, white 255),
//! graymaps → Gray16, pixmaps → Rgba16 with opaque alpha. 16-bit output is
//! native endian.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use enough::Stop;

use super::depth::Rescale;
use super::tokenizer::{Tokenizer, parse_decimal};
use super::{Family, Mode, PnmHeader};
use crate::error::PnmError;

/// Decode the bytes following the header.
pub(crate) fn decode_raster(
    raster: &[u8],
    header: &PnmHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PnmError> {
    match (header.magic.family(), header.magic.mode()) {
        (Family::Bitmap, Mode::Plain) => decode_pbm_plain(raster, header, stop),
        (Family::Bitmap, Mode::Binary) => decode_pbm_binary(raster, header, stop),
        (_, Mode::Plain) => {
            let mut source = PlainSamples {
                tokens: Tokenizer::new(raster),
            };
            decode_samples(&mut source, header, stop)
        }
        (_, Mode::Binary) => {
            let needed = binary_raster_len(header)?;
            if raster.len() < needed {
                return Err(PnmError::InvalidSampleData(format!(
                    "raster needs {needed} bytes, got {}",
                    raster.len()
                )));
            }
            let mut source = BinarySamples {
                data: &raster[..needed],
                bytes_per_sample: header.bytes_per_sample,
            };
            decode_samples(&mut source, header, stop)
        }
    }
}

fn short_raster(read: usize, total: usize) -> PnmError {
    PnmError::InvalidSampleData(format!("raster ended after {read} of {total} samples"))
}

fn binary_raster_len(header: &PnmHeader) -> Result<usize, PnmError> {
    let (width, height) = (header.width, header.height);
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(header.magic.family().channels()))
        .and_then(|n| n.checked_mul(header.bytes_per_sample))
        .ok_or(PnmError::DimensionsTooLarge { width, height })
}

// ── Bitmaps ─────────────────────────────────────────────────────────

#[inline]
fn bit_to_gray(bit: u8) -> u8 {
    if bit == 0 { 255 } else { 0 }
}

fn decode_pbm_plain(
    raster: &[u8],
    header: &PnmHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PnmError> {
    let w = header.width as usize;
    let total = w * header.height as usize;
    // Every sample takes at least one raster byte.
    let mut out = Vec::with_capacity(total.min(raster.len()));
    let mut tokens = Tokenizer::new(raster);

    for row in 0..header.height as usize {
        if row % 16 == 0 {
            stop.check()?;
        }
        for _ in 0..w {
            let b = tokens.next_byte().map_err(|_| short_raster(out.len(), total))?;
            let bit = match b {
                b'0' => 0,
                b'1' => 1,
                other => {
                    return Err(PnmError::InvalidSampleData(format!(
                        "bitmap sample must be '0' or '1', got {:?}",
                        char::from(other)
                    )));
                }
            };
            out.push(bit_to_gray(bit));
        }
    }
    Ok(out)
}

fn decode_pbm_binary(
    raster: &[u8],
    header: &PnmHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PnmError> {
    let w = header.width as usize;
    let h = header.height as usize;
    let row_bytes = w.div_ceil(8);
    let needed = row_bytes
        .checked_mul(h)
        .ok_or(PnmError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    if raster.len() < needed {
        return Err(PnmError::InvalidSampleData(format!(
            "packed bitmap needs {needed} bytes, got {}",
            raster.len()
        )));
    }

    let mut out = Vec::with_capacity(w * h);
    for (row_idx, row) in raster[..needed].chunks_exact(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        // Bits past `w` in the last byte are padding.
        for x in 0..w {
            let bit = (row[x / 8] >> (7 - x % 8)) & 1;
            out.push(bit_to_gray(bit));
        }
    }
    Ok(out)
}

// ── Graymaps and pixmaps ────────────────────────────────────────────

/// Where raw samples come from: ASCII tokens or packed bytes.
trait SampleSource {
    /// Next raw sample, or `None` once the raster is exhausted.
    fn next_sample(&mut self) -> Option<Result<u32, PnmError>>;

    /// Upper bound on the samples left.
    fn max_remaining(&self) -> usize;
}

struct PlainSamples<'a> {
    tokens: Tokenizer<'a>,
}

impl SampleSource for PlainSamples<'_> {
    fn next_sample(&mut self) -> Option<Result<u32, PnmError>> {
        let token = self.tokens.next()?;
        Some(parse_decimal(token).ok_or_else(|| {
            PnmError::InvalidSampleData(format!(
                "sample is not a decimal integer: {:?}",
                String::from_utf8_lossy(token)
            ))
        }))
    }

    fn max_remaining(&self) -> usize {
        // A digit plus a separator, except for the last sample.
        self.tokens.remaining() / 2 + 1
    }
}

struct BinarySamples<'a> {
    data: &'a [u8],
    bytes_per_sample: usize,
}

impl SampleSource for BinarySamples<'_> {
    fn next_sample(&mut self) -> Option<Result<u32, PnmError>> {
        let (sample, rest) = self.data.split_at_checked(self.bytes_per_sample)?;
        self.data = rest;
        let raw = match *sample {
            [hi, lo] => u16::from_be_bytes([hi, lo]),
            [v] => u16::from(v),
            _ => return None,
        };
        Some(Ok(u32::from(raw)))
    }

    fn max_remaining(&self) -> usize {
        self.data.len() / self.bytes_per_sample
    }
}

fn decode_samples<S: SampleSource>(
    source: &mut S,
    header: &PnmHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PnmError> {
    let family = header.magic.family();
    let channels = family.channels();
    let out_channels = family.native_layout().channels();
    let w = header.width as usize;
    let total = w * header.height as usize * channels;
    let rescale = Rescale::new(header.maxval);

    let pixels = (total / channels).min(source.max_remaining() / channels + 1);
    let mut out = Vec::with_capacity(pixels * out_channels * 2);
    let mut read = 0usize;
    for row in 0..header.height as usize {
        if row % 16 == 0 {
            stop.check()?;
        }
        for _ in 0..w {
            for _ in 0..channels {
                let raw = source
                    .next_sample()
                    .ok_or_else(|| short_raster(read, total))??;
                out.extend_from_slice(&rescale.apply(raw)?.to_ne_bytes());
                read += 1;
            }
            if out_channels > channels {
                out.extend_from_slice(&u16::MAX.to_ne_bytes());
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnm::Magic;
    use enough::Unstoppable;

    fn header(magic: Magic, width: u32, height: u32, maxval: u16) -> PnmHeader {
        PnmHeader::new(magic, width, height, maxval)
    }

    fn as_u16(bytes: &[u8]) -> Vec<u16> {
        bytes
            .chunks_exact(2)
            .map(|p| u16::from_ne_bytes([p[0], p[1]]))
            .collect()
    }

    #[test]
    fn packed_bitmap_discards_padding() {
        // 10 pixels wide: second byte holds 2 pixels + 6 padding bits.
        let h = header(Magic::P4, 10, 1, 1);
        let out = decode_raster(&[0b1010_0000, 0b0111_1111], &h, &Unstoppable).unwrap();
        assert_eq!(out, [0, 255, 0, 255, 255, 255, 255, 255, 255, 0]);
    }

    #[test]
    fn plain_bitmap_without_separators() {
        let h = header(Magic::P1, 3, 1, 1);
        let out = decode_raster(b"101", &h, &Unstoppable).unwrap();
        assert_eq!(out, [0, 255, 0]);
    }

    #[test]
    fn plain_bitmap_rejects_other_digits() {
        let h = header(Magic::P1, 2, 1, 1);
        assert!(matches!(
            decode_raster(b"1 2", &h, &Unstoppable),
            Err(PnmError::InvalidSampleData(_))
        ));
    }

    #[test]
    fn sixteen_bit_binary_is_big_endian() {
        let h = header(Magic::P5, 2, 1, 65535);
        let out = decode_raster(&[0x12, 0x34, 0xff, 0xfe], &h, &Unstoppable).unwrap();
        assert_eq!(as_u16(&out), [0x1234, 0xfffe]);
    }

    #[test]
    fn pixmap_gains_opaque_alpha() {
        let h = header(Magic::P6, 1, 1, 255);
        let out = decode_raster(&[255, 0, 128], &h, &Unstoppable).unwrap();
        assert_eq!(as_u16(&out), [65535, 0, 32896, 65535]);
    }

    #[test]
    fn plain_samples_rescale() {
        let h = header(Magic::P2, 3, 1, 15);
        let out = decode_raster(b"0 15\n 5", &h, &Unstoppable).unwrap();
        assert_eq!(as_u16(&out), [0, 65535, 21845]);
    }

    #[test]
    fn plain_sample_errors() {
        let h = header(Magic::P3, 1, 1, 255);
        for raster in [&b"1 2 x"[..], b"1 2 256", b"1 2"] {
            assert!(matches!(
                decode_raster(raster, &h, &Unstoppable),
                Err(PnmError::InvalidSampleData(_))
            ));
        }
    }

    #[test]
    fn binary_sample_above_maxval() {
        let h = header(Magic::P5, 1, 1, 100);
        assert!(matches!(
            decode_raster(&[101], &h, &Unstoppable),
            Err(PnmError::InvalidSampleData(_))
        ));
    }
}
