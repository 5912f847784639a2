use criterion::{criterion_group, criterion_main, Criterion};

use fractnav_core::{CoordinateSystem, EscapeParams, Mandelbrot};
use fractnav_render::{compute_iteration_field, ColorMapper};

fn bench_full_frame_field(c: &mut Criterion) {
    let screen = CoordinateSystem::new(0, 640, 0, 480);
    let plane = CoordinateSystem::new(-2.2, 1.2, -1.275, 1.275);
    let params = EscapeParams::default();

    c.bench_function("field_640x480", |b| {
        b.iter(|| compute_iteration_field(&screen, &plane, &params, &Mandelbrot));
    });
}

fn bench_iteration_throughput(c: &mut Criterion) {
    let screen = CoordinateSystem::new(0, 256, 0, 256);
    let plane = CoordinateSystem::new(-0.75, -0.25, -0.25, 0.25);
    let params = EscapeParams::new(1000, 2.0).unwrap();

    c.bench_function("field_256x256_1000iter", |b| {
        b.iter(|| compute_iteration_field(&screen, &plane, &params, &Mandelbrot));
    });
}

fn bench_colorize(c: &mut Criterion) {
    let screen = CoordinateSystem::new(0, 640, 0, 480);
    let plane = CoordinateSystem::new(-2.2, 1.2, -1.275, 1.275);
    let field = compute_iteration_field(&screen, &plane, &EscapeParams::default(), &Mandelbrot);
    let smooth = ColorMapper::from_smooth(true);
    let piecewise = ColorMapper::PiecewiseLinear;

    c.bench_function("colorize_smooth_640x480", |b| {
        b.iter(|| smooth.colorize(&field));
    });
    c.bench_function("colorize_piecewise_640x480", |b| {
        b.iter(|| piecewise.colorize(&field));
    });
}

criterion_group!(
    benches,
    bench_full_frame_field,
    bench_iteration_throughput,
    bench_colorize
);
criterion_main!(benches);
