//! Whole-frame converters for semi-planar YUV layouts (NV12, NV16, NV24).
//!
//! The luma plane comes first: `height` rows of `stride` bytes. The
//! interleaved U/V plane follows directly. Its row pitch is
//! `ceil(stride / h) * 2` and it has `ceil(height / v)` rows, where `h` and
//! `v` are the subsampling divisors.
//!
//! Output is a tightly packed RGB24 plane (`width * 3` bytes per row).

use super::yuv::semiplanar_yuv_to_rgb;
use crate::frame::ChromaSubsampling;

/// Convert a semi-planar frame to a packed RGB24 plane.
///
/// # Arguments
///
/// * `data` - Luma plane followed by the interleaved chroma plane
/// * `width` - Width in pixels
/// * `height` - Height in pixels
/// * `stride` - Luma row pitch in bytes (0 or `width` when unpadded)
/// * `subsampling` - How many luma samples share one U/V pair
/// * `out` - Destination, at least `width * height * 3` bytes
pub fn semiplanar_to_rgb24(
    data: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    subsampling: ChromaSubsampling,
    out: &mut [u8],
) {
    let stride = stride.max(width);
    let h = subsampling.horizontal();
    let v = subsampling.vertical();
    let chroma_pitch = stride.div_ceil(h) * 2;

    debug_assert!(out.len() >= width * height * 3);
    debug_assert!(data.len() >= stride * height + chroma_pitch * height.div_ceil(v));

    let (luma, chroma) = data.split_at(stride * height);

    for (i, out_row) in out.chunks_exact_mut(width * 3).take(height).enumerate() {
        let luma_row = &luma[i * stride..i * stride + width];
        let chroma_start = (i / v) * chroma_pitch;
        let chroma_row = &chroma[chroma_start..chroma_start + chroma_pitch];

        for (j, (pixel, &y)) in out_row.chunks_exact_mut(3).zip(luma_row).enumerate() {
            let uv = (j / h) * 2;
            pixel.copy_from_slice(&semiplanar_yuv_to_rgb(y, chroma_row[uv], chroma_row[uv + 1]));
        }
    }
}

/// NV12: one U/V pair per 2x2 luma block.
pub fn nv12_to_rgb24(data: &[u8], width: usize, height: usize, stride: usize, out: &mut [u8]) {
    semiplanar_to_rgb24(data, width, height, stride, ChromaSubsampling::Yuv420, out);
}

/// NV16: one U/V pair per 2x1 luma block.
pub fn nv16_to_rgb24(data: &[u8], width: usize, height: usize, stride: usize, out: &mut [u8]) {
    semiplanar_to_rgb24(data, width, height, stride, ChromaSubsampling::Yuv422, out);
}

/// NV24: one U/V pair per luma sample.
pub fn nv24_to_rgb24(data: &[u8], width: usize, height: usize, stride: usize, out: &mut [u8]) {
    semiplanar_to_rgb24(data, width, height, stride, ChromaSubsampling::Yuv444, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a 4x4 frame with distinct luma and a unique U/V pair per chroma
    /// sample, so reuse patterns can be checked.
    fn test_frame(subsampling: ChromaSubsampling) -> Vec<u8> {
        let (w, h) = (4usize, 4usize);
        let mut data: Vec<u8> = (0..w * h).map(|i| 16 + i as u8 * 10).collect();
        let pitch = w.div_ceil(subsampling.horizontal()) * 2;
        let rows = h.div_ceil(subsampling.vertical());
        for k in 0..pitch * rows / 2 {
            data.push(100 + k as u8);
            data.push(200 - k as u8);
        }
        data
    }

    fn pixel(out: &[u8], width: usize, x: usize, y: usize) -> [u8; 3] {
        let i = (y * width + x) * 3;
        [out[i], out[i + 1], out[i + 2]]
    }

    fn chroma_pair(k: usize) -> (u8, u8) {
        (100 + k as u8, 200 - k as u8)
    }

    #[test]
    fn test_nv12_reuses_chroma_per_2x2_block() {
        let data = test_frame(ChromaSubsampling::Yuv420);
        let mut out = vec![0u8; 4 * 4 * 3];
        nv12_to_rgb24(&data, 4, 4, 0, &mut out);

        for y in 0..4 {
            for x in 0..4 {
                let luma = data[y * 4 + x];
                let (u, v) = chroma_pair((y / 2) * 2 + x / 2);
                assert_eq!(pixel(&out, 4, x, y), semiplanar_yuv_to_rgb(luma, u, v));
            }
        }
    }

    #[test]
    fn test_nv16_reuses_chroma_per_2x1_block() {
        let data = test_frame(ChromaSubsampling::Yuv422);
        let mut out = vec![0u8; 4 * 4 * 3];
        nv16_to_rgb24(&data, 4, 4, 0, &mut out);

        for y in 0..4 {
            for x in 0..4 {
                let luma = data[y * 4 + x];
                let (u, v) = chroma_pair(y * 2 + x / 2);
                assert_eq!(pixel(&out, 4, x, y), semiplanar_yuv_to_rgb(luma, u, v));
            }
        }
    }

    #[test]
    fn test_nv24_has_chroma_per_sample() {
        let data = test_frame(ChromaSubsampling::Yuv444);
        let mut out = vec![0u8; 4 * 4 * 3];
        nv24_to_rgb24(&data, 4, 4, 0, &mut out);

        for y in 0..4 {
            for x in 0..4 {
                let luma = data[y * 4 + x];
                let (u, v) = chroma_pair(y * 4 + x);
                assert_eq!(pixel(&out, 4, x, y), semiplanar_yuv_to_rgb(luma, u, v));
            }
        }
    }

    #[test]
    fn test_stride_padding_matches_packed_frame() {
        let packed = test_frame(ChromaSubsampling::Yuv420);
        let (w, h, stride) = (4usize, 4usize, 8usize);

        // Re-lay the same samples with 4 garbage bytes after every row
        let mut padded = Vec::new();
        for row in packed[..w * h].chunks(w) {
            padded.extend_from_slice(row);
            padded.extend_from_slice(&[0xEE; 4]);
        }
        for row in packed[w * h..].chunks(w) {
            padded.extend_from_slice(row);
            padded.extend_from_slice(&[0xEE; 4]);
        }

        let mut expected = vec![0u8; w * h * 3];
        let mut actual = vec![0u8; w * h * 3];
        nv12_to_rgb24(&packed, w, h, 0, &mut expected);
        nv12_to_rgb24(&padded, w, h, stride, &mut actual);

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_odd_dimensions() {
        // 3x3 NV12: chroma pitch rounds up to 4, two chroma rows
        let (w, h) = (3usize, 3usize);
        let mut data = vec![128u8; w * h];
        data.extend_from_slice(&[128; 8]);

        let mut out = vec![0u8; w * h * 3];
        nv12_to_rgb24(&data, w, h, 0, &mut out);

        assert!(out.iter().all(|&c| c == 130));
    }
}
