//! Criterion benchmarks for frame conversion and compression.
//!
//! Run with: `cargo bench -p framejpeg-core`
//! Quick compile check: `cargo bench -p framejpeg-core -- --test`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use framejpeg_core::compress;
use framejpeg_core::convert::{nv12_to_rgb24, yuyv_row_to_rgb24};
use framejpeg_core::frame::{Frame, PixelFormat};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const RESOLUTIONS: [(u32, u32); 3] = [(640, 480), (1280, 720), (1920, 1080)];

/// A frame of smoothly varying bytes, closer to camera output than noise.
fn make_frame(format: PixelFormat, width: u32, height: u32) -> Frame {
    let size = format.frame_size(width, height, 0);
    let row = width as usize;
    let data = (0..size)
        .map(|i| ((i % row) / 4 + (i / row) / 3) as u8)
        .collect();
    Frame::from_raw(format.fourcc(), width, height, 0, data)
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for (width, height) in RESOLUTIONS {
        let label = format!("{width}x{height}");
        let pixels = (width * height) as u64;
        group.throughput(Throughput::Elements(pixels));

        let yuyv = make_frame(PixelFormat::Yuyv, width, height);
        let mut line = vec![0u8; width as usize * 3];
        group.bench_with_input(BenchmarkId::new("yuyv_rows", &label), &yuyv, |b, frame| {
            b.iter(|| {
                for row in frame.data.chunks_exact(width as usize * 2) {
                    yuyv_row_to_rgb24(black_box(row), &mut line);
                }
            });
        });

        let nv12 = make_frame(PixelFormat::Nv12, width, height);
        let mut plane = vec![0u8; (width * height) as usize * 3];
        group.bench_with_input(BenchmarkId::new("nv12_plane", &label), &nv12, |b, frame| {
            b.iter(|| {
                nv12_to_rgb24(
                    black_box(&frame.data),
                    width as usize,
                    height as usize,
                    0,
                    &mut plane,
                )
            });
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Compression
// ---------------------------------------------------------------------------

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.sample_size(20);

    for format in PixelFormat::ALL {
        for (width, height) in RESOLUTIONS {
            let src = make_frame(format, width, height);
            let mut dest = Frame::new();
            group.throughput(Throughput::Bytes(src.used() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{format:?}"), format!("{width}x{height}")),
                &src,
                |b, src| b.iter(|| compress(black_box(src), &mut dest, 80)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_compress);
criterion_main!(benches);
