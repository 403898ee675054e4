//! Benchmarks for the atlasify pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use atlasify::{
    build_sheet, AlphaMask, CellNormalizer, Component, ComponentScanner, RowMajorSorter,
    SheetParams,
};

/// A 10x3 sheet of 40x40 sprites with hand-placed jitter and soft edges.
fn jittered_sheet() -> RgbaImage {
    let mut img = RgbaImage::new(800, 300);
    for i in 0..30u32 {
        let jitter = (i * 7) % 11;
        let ox = (i % 10) * 80 + jitter;
        let oy = (i / 10) * 100 + jitter;
        for y in oy..oy + 40 {
            for x in ox..ox + 40 {
                let edge = x == ox || y == oy || x == ox + 39 || y == oy + 39;
                let alpha = if edge { 64 } else { 255 };
                img.put_pixel(x, y, Rgba([(i * 8) as u8, 120, 200, alpha]));
            }
        }
    }
    img
}

fn params() -> SheetParams {
    SheetParams::new(30, 10, 3, 16, 16)
}

// -- Segmentation benchmarks --

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    let sheet = jittered_sheet();
    let mask = AlphaMask::from_image(&sheet, 128);
    let components = ComponentScanner::new(500).scan(&mask);

    group.bench_function("alpha_mask", |b| {
        b.iter(|| AlphaMask::from_image(black_box(&sheet), 128))
    });

    group.bench_function("scan_components", |b| {
        b.iter(|| ComponentScanner::new(500).scan(black_box(&mask)))
    });

    group.bench_function("sort_row_major", |b| {
        b.iter(|| RowMajorSorter::default().sort(black_box(components.clone())))
    });

    group.finish();
}

// -- Normalization benchmarks --

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let sheet = jittered_sheet();
    let sprite = Component::new(0, 0, 39, 39, 1600);

    let small = CellNormalizer::new(16, 16, 1, 96);
    let large = CellNormalizer::new(64, 64, 1, 96);

    group.bench_function("normalize_downscale", |b| {
        b.iter(|| small.normalize(black_box(&sheet), black_box(&sprite)))
    });

    group.bench_function("normalize_upscale", |b| {
        b.iter(|| large.normalize(black_box(&sheet), black_box(&sprite)))
    });

    group.finish();
}

// -- Full pipeline --

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    let sheet = jittered_sheet();
    let params = params();

    group.bench_function("build_sheet_30", |b| {
        b.iter(|| build_sheet(black_box(&sheet), &params).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_segmentation, bench_normalization, bench_build);
criterion_main!(benches);
