//! Raster encoders for P1–P6.
//!
//! Samples are written at the grid's native depth; the header maxval is
//! pinned to that depth (255 or 65535), so no rescale happens here.

use alloc::vec::Vec;
use enough::Stop;

use super::depth::{is_black, luma};
use super::{Family, Mode, PnmHeader};
use crate::error::PnmError;
use crate::grid::{PixelGrid, read_sample};
use crate::pixel::PixelLayout;

/// Encode `grid` with an already chosen header.
pub(crate) fn encode_pnm(
    grid: &PixelGrid,
    header: &PnmHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PnmError> {
    let layout = grid.layout();
    // Gray+alpha has no PNM family to map onto; color alpha is dropped below.
    if layout.is_gray() && layout.has_alpha() {
        return Err(PnmError::UnsupportedColorModel(layout));
    }

    let family = header.magic.family();
    let w = grid.width() as usize;
    let h = grid.height() as usize;
    let mut out = Vec::with_capacity(64 + estimate_raster_len(header, w, h));
    header.write(&mut out);

    let mut values = Vec::with_capacity(w * family.channels());
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        values.clear();
        collect_row(grid.row(y), layout, family, &mut values);
        match (family, header.magic.mode()) {
            (_, Mode::Plain) => write_plain_row(&mut out, &values),
            (Family::Bitmap, Mode::Binary) => pack_bits(&mut out, &values),
            (_, Mode::Binary) => write_binary_row(&mut out, &values, header.bytes_per_sample),
        }
    }
    Ok(out)
}

fn estimate_raster_len(header: &PnmHeader, w: usize, h: usize) -> usize {
    let channels = header.magic.family().channels();
    match (header.magic.family(), header.magic.mode()) {
        (Family::Bitmap, Mode::Binary) => w.div_ceil(8) * h,
        // "1 " per pixel
        (Family::Bitmap, Mode::Plain) => w * h * 2,
        (_, Mode::Binary) => w * h * channels * header.bytes_per_sample,
        // Typical 8-bit token plus separator; the buffer grows if needed.
        (_, Mode::Plain) => w * h * channels * 4,
    }
}

/// Convert one row of `layout` pixels into the family's sample values.
///
/// Bitmaps yield 1 (black) or 0 (white); graymaps one gray value per pixel;
/// pixmaps R, G, B per pixel. Alpha is dropped.
fn collect_row(row: &[u8], layout: PixelLayout, family: Family, values: &mut Vec<u16>) {
    let channels = layout.channels();
    let bps = layout.bytes_per_sample();
    let [ri, gi, bi] = layout.rgb_order();
    let max = layout.native_maxval();
    let pixels = row.len() / layout.bytes_per_pixel();

    for px in 0..pixels {
        let base = px * channels;
        let sample = |c: usize| read_sample(row, base + c, bps);
        let (r, g, b) = if layout.is_gray() {
            let v = sample(0);
            (v, v, v)
        } else {
            (sample(ri), sample(gi), sample(bi))
        };
        let gray = || if layout.is_gray() { r } else { luma(r, g, b) };
        match family {
            Family::Bitmap => values.push(u16::from(is_black(gray(), max))),
            Family::Graymap => values.push(gray()),
            Family::Pixmap => values.extend_from_slice(&[r, g, b]),
        }
    }
}

/// Space-separated decimal samples, newline-terminated.
fn write_plain_row(out: &mut Vec<u8>, values: &[u16]) {
    for (i, &v) in values.iter().enumerate() {
        if i > 0 {
            out.push(b' ');
        }
        push_decimal(out, v);
    }
    out.push(b'\n');
}

/// MSB-first, 8 pixels per byte; the last byte of a row is zero-filled.
fn pack_bits(out: &mut Vec<u8>, bits: &[u16]) {
    for group in bits.chunks(8) {
        let byte = group
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8 & 1) << (7 - i)));
        out.push(byte);
    }
}

fn write_binary_row(out: &mut Vec<u8>, values: &[u16], bytes_per_sample: usize) {
    if bytes_per_sample == 2 {
        for &v in values {
            out.extend_from_slice(&v.to_be_bytes());
        }
    } else {
        out.extend(values.iter().map(|&v| v as u8));
    }
}

fn push_decimal(out: &mut Vec<u8>, mut v: u16) {
    let mut digits = [0u8; 5];
    let mut n = digits.len();
    loop {
        n -= 1;
        digits[n] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    out.extend_from_slice(&digits[n..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_digits() {
        let mut out = Vec::new();
        for v in [0u16, 7, 10, 255, 65535] {
            push_decimal(&mut out, v);
            out.push(b',');
        }
        assert_eq!(out, b"0,7,10,255,65535,");
    }

    #[test]
    fn packs_partial_group_msb_first() {
        let mut out = Vec::new();
        pack_bits(&mut out, &[1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1]);
        assert_eq!(out, [0xff, 0b1010_0000]);
    }

    #[test]
    fn bgr_rows_are_swizzled() {
        let mut values = Vec::new();
        collect_row(&[1, 2, 3, 4, 5, 6, 7, 8], PixelLayout::Bgra8, Family::Pixmap, &mut values);
        assert_eq!(values, [3, 2, 1, 7, 6, 5]);
    }

    #[test]
    fn color_rows_reduce_to_luma() {
        let mut values = Vec::new();
        collect_row(&[255, 255, 255, 255, 0, 0], PixelLayout::Rgb8, Family::Graymap, &mut values);
        assert_eq!(values, [255, 76]);
    }

    #[test]
    fn gray_alpha_is_rejected() {
        let grid = PixelGrid::new(alloc::vec![0; 4], 2, 1, PixelLayout::GrayAlpha8).unwrap();
        let header = PnmHeader::new(crate::pnm::Magic::P5, 2, 1, 255);
        assert!(matches!(
            encode_pnm(&grid, &header, &enough::Unstoppable),
            Err(PnmError::UnsupportedColorModel(PixelLayout::GrayAlpha8))
        ));
    }

    #[test]
    fn gray_rows_replicate_into_rgb() {
        let mut values = Vec::new();
        let row: Vec<u8> = [0x1234u16, 0xffff].iter().flat_map(|v| v.to_ne_bytes()).collect();
        collect_row(&row, PixelLayout::Gray16, Family::Pixmap, &mut values);
        assert_eq!(values, [0x1234, 0x1234, 0x1234, 0xffff, 0xffff, 0xffff]);
    }
}
