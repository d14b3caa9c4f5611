//! Pixel format conversion to 8-bit RGB.
//!
//! This module provides:
//! - Per-scanline converters for packed layouts (YUYV, UYVY, RGB565, BGR24)
//! - Whole-frame converters for semi-planar layouts (NV12, NV16, NV24)
//! - The two YUV coefficient sets the converters are built on
//!
//! RGB24 needs no conversion and is handed to the compressor as-is.
//!
//! All converters are pure functions of their input bytes and keep no state
//! between calls.

mod packed;
mod semiplanar;
mod yuv;

pub use packed::{
    bgr24_row_to_rgb24, rgb565_row_to_rgb24, rgb565_to_rgb, uyvy_row_to_rgb24, yuyv_row_to_rgb24,
};
pub use semiplanar::{nv12_to_rgb24, nv16_to_rgb24, nv24_to_rgb24, semiplanar_to_rgb24};
pub use yuv::{packed_yuv_to_rgb, semiplanar_yuv_to_rgb};

/// Signature shared by the per-scanline converters: source row in, `width * 3`
/// RGB bytes out.
pub type RowConverter = fn(&[u8], &mut [u8]);

/// Signature shared by the whole-frame semi-planar converters:
/// `(data, width, height, stride, out)`.
pub type PlaneConverter = fn(&[u8], usize, usize, usize, &mut [u8]);

// ============================================================================
// Property-Based Tests
// ============================================================================
