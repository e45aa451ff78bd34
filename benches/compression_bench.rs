use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use photo_squeeze::{
    compress_batch, compress_image, format_file_size, reduce_quality, target_dimensions,
    CompressionConfig, JpegCodec, SourceImage,
};
use std::io::Cursor;

fn create_test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    }))
}

fn create_test_source(name: &str, width: u32, height: u32) -> SourceImage {
    let mut bytes = Vec::new();
    create_test_image(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    SourceImage::new(name, Some("image/png"), bytes)
}

fn bench_resize_calculator(c: &mut Criterion) {
    c.bench_function("target_dimensions", |b| {
        b.iter(|| target_dimensions(black_box(4032), black_box(3024), 1920, 1080))
    });
}

fn bench_format_file_size(c: &mut Criterion) {
    c.bench_function("format_file_size", |b| {
        b.iter(|| format_file_size(black_box(3_456_789)))
    });
}

fn bench_quality_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("quality_reduction");
    let codec = JpegCodec::default();

    for size in [Small, Medium, Large].iter() {
        let (width, height) = match size {
            Small => (800, 600),
            Medium => (1280, 720),
            Large => (1920, 1080),
        };
        let img = create_test_image(width, height);
        let config = CompressionConfig {
            max_size_bytes: 64 * 1024,
            ..Default::default()
        };

        group.bench_with_input(
            BenchmarkId::new("reduce", format!("{}x{}", width, height)),
            &img,
            |b, img| b.iter(|| reduce_quality(&codec, black_box(img), &config)),
        );
    }

    group.finish();
}

fn bench_single_pipeline(c: &mut Criterion) {
    let codec = JpegCodec::default();
    let source = create_test_source("listing.png", 3840, 2160);
    let config = CompressionConfig::default();

    c.bench_function("compress_image", |b| {
        b.iter(|| compress_image(&codec, black_box(&source), &config))
    });
}

fn bench_batch_processing(c: &mut Criterion) {
    let codec = JpegCodec::default();
    let sources: Vec<_> = (0..10)
        .map(|i| create_test_source(&format!("photo_{}.png", i), 800, 600))
        .collect();
    let config = CompressionConfig::default();

    c.bench_function("compress_batch", |b| {
        b.iter(|| compress_batch(&codec, black_box(&sources), &config))
    });
}

enum ImageSize {
    Small,
    Medium,
    Large,
}

use ImageSize::*;

criterion_group!(
    benches,
    bench_resize_calculator,
    bench_format_file_size,
    bench_quality_reduction,
    bench_single_pipeline,
    bench_batch_processing
);
criterion_main!(benches);
