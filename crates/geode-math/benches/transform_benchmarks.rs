use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geode_math::*;
use glam::{Vec3, Vec4};

fn bench_normalized_midpoint(c: &mut Criterion) {
    let a = black_box(Vec4::new(0.0, 0.0, -1.0, 1.0));
    let b = black_box(Vec4::new(0.0, 0.942809, 0.333333, 1.0));
    c.bench_function("normalized_midpoint", |bencher| {
        bencher.iter(|| black_box(normalize_direction(midpoint(a, b))))
    });
}

fn bench_spherical_to_cartesian(c: &mut Criterion) {
    let theta = black_box(0.4_f32);
    let phi = black_box(1.3_f32);
    c.bench_function("spherical_to_cartesian", |bencher| {
        bencher.iter(|| black_box(spherical_to_cartesian(1.5, theta, phi)))
    });
}

fn bench_view_projection(c: &mut Criterion) {
    let eye = black_box(Vec3::new(0.3, 0.8, 1.2));
    let volume = OrthoVolume::default();
    c.bench_function("look_at_times_ortho", |bencher| {
        bencher.iter(|| black_box(ortho(&volume) * look_at(eye, Vec3::ZERO, Vec3::Y)))
    });
}

criterion_group!(
    benches,
    bench_normalized_midpoint,
    bench_spherical_to_cartesian,
    bench_view_projection
);
criterion_main!(benches);
