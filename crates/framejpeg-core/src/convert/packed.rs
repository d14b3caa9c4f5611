//! Per-scanline converters for packed (interleaved) layouts.
//!
//! Every converter has the same shape: it reads one source row and fills
//! `out`, whose length is `width * 3`, with RGB triplets. Row padding is never
//! read because the caller hands over only the pixel portion of each row.

use super::yuv::packed_yuv_to_rgb;

/// Byte offsets of the samples inside one 4-byte packed 4:2:2 pixel pair.
struct Packed422Layout {
    y0: usize,
    u: usize,
    y1: usize,
    v: usize,
}

const YUYV_LAYOUT: Packed422Layout = Packed422Layout {
    y0: 0,
    u: 1,
    y1: 2,
    v: 3,
};

const UYVY_LAYOUT: Packed422Layout = Packed422Layout {
    u: 0,
    y0: 1,
    v: 2,
    y1: 3,
};

fn packed_422_row_to_rgb24(row: &[u8], out: &mut [u8], layout: &Packed422Layout) {
    let width = out.len() / 3;
    debug_assert!(
        row.len() >= width.div_ceil(2) * 4,
        "packed 4:2:2 row too short for {width} pixels"
    );

    // Each pair of output pixels shares the U/V of one 4-byte group
    for (pixels, pair) in out.chunks_mut(6).zip(row.chunks_exact(4)) {
        let (u, v) = (pair[layout.u], pair[layout.v]);
        let (first, second) = pixels.split_at_mut(3);
        first.copy_from_slice(&packed_yuv_to_rgb(pair[layout.y0], u, v));
        if !second.is_empty() {
            second.copy_from_slice(&packed_yuv_to_rgb(pair[layout.y1], u, v));
        }
    }
}

/// Convert one YUYV (`Y0 U Y1 V`) row to RGB24.
pub fn yuyv_row_to_rgb24(row: &[u8], out: &mut [u8]) {
    packed_422_row_to_rgb24(row, out, &YUYV_LAYOUT);
}

/// Convert one UYVY (`U Y0 V Y1`) row to RGB24.
pub fn uyvy_row_to_rgb24(row: &[u8], out: &mut [u8]) {
    packed_422_row_to_rgb24(row, out, &UYVY_LAYOUT);
}

/// Expand one RGB565 word to 8-bit channels.
///
/// Each field is shifted up into the high bits with no bit replication, so
/// full-scale red is 248, not 255.
#[inline]
pub fn rgb565_to_rgb(word: u16) -> [u8; 3] {
    let [lo, hi] = word.to_le_bytes();
    [hi & 0xF8, ((word & 0x07E0) >> 3) as u8, (lo & 0x1F) << 3]
}

/// Convert one RGB565 (little-endian) row to RGB24.
pub fn rgb565_row_to_rgb24(row: &[u8], out: &mut [u8]) {
    debug_assert!(row.len() >= out.len() / 3 * 2);

    for (pixel, word) in out.chunks_exact_mut(3).zip(row.chunks_exact(2)) {
        pixel.copy_from_slice(&rgb565_to_rgb(u16::from_le_bytes([word[0], word[1]])));
    }
}

/// Convert one BGR24 row to RGB24 by swapping red and blue.
pub fn bgr24_row_to_rgb24(row: &[u8], out: &mut [u8]) {
    debug_assert!(row.len() >= out.len());

    for (pixel, bgr) in out.chunks_exact_mut(3).zip(row.chunks_exact(3)) {
        pixel[0] = bgr[2];
        pixel[1] = bgr[1];
        pixel[2] = bgr[0];
    }
}
