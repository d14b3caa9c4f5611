//! framejpeg core - CPU JPEG encoding for raw camera frames
//!
//! This crate turns frames captured from a video device (packed YUV 4:2:2,
//! RGB565, RGB24, BGR24 and semi-planar NV12/NV16/NV24) into baseline JPEG,
//! writing the compressed bytes into a reusable destination frame.

pub mod convert;
pub mod encode;
pub mod frame;

pub use encode::{compress, try_compress, CpuEncoder, EncodeError, EncoderConfig};
pub use frame::{FourCc, Frame, PixelFormat};
