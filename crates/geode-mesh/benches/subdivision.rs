use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geode_mesh::{MeshBuilder, SeedTetrahedron, build_sphere};

fn bench_build_sphere(c: &mut Criterion) {
    let seed = SeedTetrahedron::default();
    let mut group = c.benchmark_group("build_sphere");
    for depth in [2u32, 4, 5, 6] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| black_box(build_sphere(&seed, depth)))
        });
    }
    group.finish();
}

fn bench_rebuild_in_place(c: &mut Criterion) {
    let mut builder = MeshBuilder::new(SeedTetrahedron::default(), 5);
    c.bench_function("rebuild_depth_5", |b| {
        b.iter(|| {
            builder.rebuild(black_box(5));
        })
    });
}

fn bench_interleave(c: &mut Criterion) {
    let mesh = build_sphere(&SeedTetrahedron::default(), 5);
    c.bench_function("to_vertices_depth_5", |b| {
        b.iter(|| black_box(mesh.to_vertices()))
    });
}

criterion_group!(benches, bench_build_sphere, bench_rebuild_in_place, bench_interleave);
criterion_main!(benches);
