//! framejpeg - compress a raw camera frame dump to JPEG.
//!
//! ```bash
//! # 1280x720 YUYV capture at quality 90
//! framejpeg frame.yuv frame.jpg --format YUYV --width 1280 --height 720 --quality 90
//!
//! # Via environment variables
//! export FRAMEJPEG_FORMAT=NV12 FRAMEJPEG_WIDTH=1920 FRAMEJPEG_HEIGHT=1080
//! framejpeg frame.nv12 frame.jpg
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use framejpeg_core::{CpuEncoder, EncoderConfig, FourCc, Frame, PixelFormat};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the frame compressor.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Raw frame file as captured from the device
    pub input: PathBuf,

    /// Where to write the JPEG
    pub output: PathBuf,

    /// Pixel format FourCC (YUYV, UYVY, RGBP, RGB3, BGR3, NV12, NV16, NV24)
    #[arg(short, long, env = "FRAMEJPEG_FORMAT")]
    pub format: FourCc,

    /// Frame width in pixels
    #[arg(short = 'W', long, env = "FRAMEJPEG_WIDTH")]
    pub width: u32,

    /// Frame height in pixels
    #[arg(short = 'H', long, env = "FRAMEJPEG_HEIGHT")]
    pub height: u32,

    /// Bytes per row including padding (0 = tightly packed)
    #[arg(long, env = "FRAMEJPEG_STRIDE", default_value_t = 0)]
    pub stride: usize,

    /// JPEG quality (0-100)
    #[arg(
        short,
        long,
        env = "FRAMEJPEG_QUALITY",
        default_value_t = framejpeg_core::encode::DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub quality: u8,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, env = "FRAMEJPEG_VERBOSE")]
    pub verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

/// Check the dump is large enough for the declared geometry before handing it
/// to the encoder, which trusts its input.
fn validate(args: &Args, len: usize) -> Result<(), Box<dyn Error>> {
    let format = PixelFormat::try_from(args.format)?;
    if args.width == 0 || args.height == 0 {
        return Err(format!("invalid dimensions {}x{}", args.width, args.height).into());
    }
    if format.is_packed_422() && args.width % 2 != 0 {
        return Err(format!("{} requires an even width, got {}", args.format, args.width).into());
    }
    let row_bytes = args.width as usize * format.bytes_per_pixel();
    if args.stride != 0 && args.stride < row_bytes {
        return Err(format!("stride {} is shorter than a {row_bytes}-byte row", args.stride).into());
    }
    let expected = format.frame_size(args.width, args.height, args.stride);
    if len < expected {
        return Err(format!(
            "{} holds {len} bytes, a {}x{} {} frame needs {expected}",
            args.input.display(),
            args.width,
            args.height,
            args.format
        )
        .into());
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let data = fs::read(&args.input)?;
    validate(args, data.len())?;
    debug!(path = %args.input.display(), bytes = data.len(), "read raw frame");

    let src = Frame::from_raw(args.format, args.width, args.height, args.stride, data);
    let encoder = CpuEncoder::new(EncoderConfig::new(args.quality));
    let mut dest = Frame::new();
    encoder.try_compress(&src, &mut dest)?;

    fs::write(&args.output, &dest.data)?;

    info!(
        path = %args.output.display(),
        bytes = dest.used(),
        duration = ?dest.encode_duration().unwrap_or_default(),
        "wrote JPEG"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(&args)
}
