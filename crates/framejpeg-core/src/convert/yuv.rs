//! YUV to RGB coefficient sets.
//!
//! Two fixed-point formulas are in use and they are deliberately kept apart:
//!
//! - [`packed_yuv_to_rgb`] serves the packed 4:2:2 layouts (YUYV, UYVY). It
//!   treats luma as full range, with no footroom correction and no rounding
//!   offset.
//! - [`semiplanar_yuv_to_rgb`] serves NV12/NV16/NV24. It uses BT.601
//!   limited-range coefficients with a 16-level luma footroom and a rounding
//!   offset of 128.
//!
//! The same Y/U/V triple therefore renders differently depending on the
//! layout it arrived in (mid grey 128 becomes 128 vs 130). Which of the two is
//! the intended rendition is unresolved, so both are preserved bit-exactly.

/// Clamp a fixed-point result to an 8-bit channel.
#[inline]
fn clamp_component(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Convert one YUV sample from a packed 4:2:2 frame to RGB.
///
/// Formula (luma scaled by 256, chroma centred on 0):
/// - `R = (Y + 359·V) >> 8`
/// - `G = (Y − 88·U − 183·V) >> 8`
/// - `B = (Y + 454·U) >> 8`
#[inline]
pub fn packed_yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = (y as i32) << 8;
    let u = u as i32 - 128;
    let v = v as i32 - 128;

    [
        clamp_component((y + 359 * v) >> 8),
        clamp_component((y - 88 * u - 183 * v) >> 8),
        clamp_component((y + 454 * u) >> 8),
    ]
}

/// Convert one YUV sample from a semi-planar frame to RGB.
///
/// Formula with `C = Y − 16`, `D = U − 128`, `E = V − 128`:
/// - `R = (298·C + 409·E + 128) >> 8`
/// - `G = (298·C − 100·D − 208·E + 128) >> 8`
/// - `B = (298·C + 516·D + 128) >> 8`
#[inline]
pub fn semiplanar_yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = y as i32 - 16;
    let d = u as i32 - 128;
    let e = v as i32 - 128;

    [
        clamp_component((298 * c + 409 * e + 128) >> 8),
        clamp_component((298 * c - 100 * d - 208 * e + 128) >> 8),
        clamp_component((298 * c + 516 * d + 128) >> 8),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_neutral_chroma_is_identity() {
        for y in [0u8, 1, 64, 128, 200, 255] {
            assert_eq!(packed_yuv_to_rgb(y, 128, 128), [y, y, y]);
        }
    }

    #[test]
    fn test_semiplanar_limited_range_endpoints() {
        // Limited range: 16 is black and 235 is white
        assert_eq!(semiplanar_yuv_to_rgb(16, 128, 128), [0, 0, 0]);
        assert_eq!(semiplanar_yuv_to_rgb(235, 128, 128), [255, 255, 255]);
        // Footroom and headroom clip
        assert_eq!(semiplanar_yuv_to_rgb(0, 128, 128), [0, 0, 0]);
        assert_eq!(semiplanar_yuv_to_rgb(255, 128, 128), [255, 255, 255]);
    }

    /// The packed and semi-planar paths disagree on the same YUV input.
    /// The assertions pin the measured offsets between the two renditions.
    #[test]
    fn test_coefficient_sets_diverge() {
        // Mid grey: packed keeps 128, semi-planar stretches to 130
        assert_eq!(packed_yuv_to_rgb(128, 128, 128), [128, 128, 128]);
        assert_eq!(semiplanar_yuv_to_rgb(128, 128, 128), [130, 130, 130]);

        // Limited-range black: packed leaves it at 16, semi-planar maps to 0
        assert_eq!(packed_yuv_to_rgb(16, 128, 128), [16, 16, 16]);
        assert_eq!(semiplanar_yuv_to_rgb(16, 128, 128), [0, 0, 0]);

        // The gap is never more than the footroom stretch over the full range
        let mut max_gap = 0;
        for y in 0..=255u8 {
            let packed = packed_yuv_to_rgb(y, 128, 128)[0] as i32;
            let semi = semiplanar_yuv_to_rgb(y, 128, 128)[0] as i32;
            max_gap = max_gap.max((packed - semi).abs());
        }
        assert_eq!(max_gap, 20);
    }

    #[test]
    fn test_packed_saturated_chroma_clamps() {
        assert_eq!(packed_yuv_to_rgb(128, 128, 255), [255, 37, 128]);
        assert_eq!(packed_yuv_to_rgb(128, 255, 128), [128, 84, 255]);
        assert_eq!(packed_yuv_to_rgb(0, 0, 0), [0, 135, 0]);
    }
}
