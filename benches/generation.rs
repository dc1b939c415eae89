use criterion::{criterion_group, criterion_main, Criterion, black_box};

use voyager::lattice::{build_lattice_mesh, build_occupancy_texels};
use voyager::voxel::{Chunk, OccupancyBitmask, Voxel, CHUNK_DIM};

fn checker_chunk() -> Chunk {
    Chunk::from_fn(|i| {
        if i % 2 == 0 {
            Voxel::new(1)
        } else {
            Voxel::EMPTY
        }
    })
}

fn bench_bitmask_encode(c: &mut Criterion) {
    let chunk = checker_chunk();

    c.bench_function("bitmask_encode_32", |b| {
        b.iter(|| OccupancyBitmask::encode(black_box(&chunk)));
    });
}

fn bench_occupancy_texels(c: &mut Criterion) {
    let mask = OccupancyBitmask::encode(&checker_chunk());

    c.bench_function("occupancy_texels_32", |b| {
        b.iter(|| build_occupancy_texels(black_box(&mask), black_box(CHUNK_DIM)));
    });
}

fn bench_lattice_mesh_32(c: &mut Criterion) {
    c.bench_function("lattice_mesh_32", |b| {
        b.iter(|| build_lattice_mesh(black_box(32), black_box(0.1)).unwrap());
    });
}

fn bench_lattice_mesh_128(c: &mut Criterion) {
    c.bench_function("lattice_mesh_128", |b| {
        b.iter(|| build_lattice_mesh(black_box(128), black_box(0.1)).unwrap());
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    // Chunk to upload-ready data: bitmask, texel image, lattice vertices
    c.bench_function("chunk_to_gpu_data_32", |b| {
        let chunk = checker_chunk();
        b.iter(|| {
            let mask = OccupancyBitmask::encode(black_box(&chunk));
            let texels = build_occupancy_texels(&mask, CHUNK_DIM);
            let vertices = build_lattice_mesh(CHUNK_DIM as u32, 0.1).unwrap();
            black_box((texels, vertices));
        });
    });
}

criterion_group!(
    benches,
    bench_bitmask_encode,
    bench_occupancy_texels,
    bench_lattice_mesh_32,
    bench_lattice_mesh_128,
    bench_full_pipeline,
);
criterion_main!(benches);
