//! Benchmarks for voxel distance fields and ROI rasterization.
//!
//! Run with: cargo bench -p cortex-volume

#![allow(missing_docs, clippy::cast_precision_loss, clippy::unwrap_used)]

use cortex_types::{HemispherePair, Matrix4, Point3, Surface, VoxelGrid};
use cortex_volume::{
    compute_distance_field, rasterize_rois, RoiMaskParams, RoiSet, VertexIndexMap,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

// =============================================================================
// Test Surface Generation
// =============================================================================

/// A wavy sheet of `n * n` vertices, offset along x.
fn wavy_sheet(n: u32, offset: f64) -> Surface {
    let mut vertices = Vec::with_capacity((n * n) as usize);
    for i in 0..n {
        for j in 0..n {
            let (u, v) = (f64::from(i), f64::from(j));
            // Coordinates stay distinct on every axis.
            vertices.push(Point3::new(
                offset + u * 0.731 + (v * 0.37).sin(),
                v * 0.917 + (u * 0.23).cos(),
                10.0 + (u * 0.41).sin() * (v * 0.29).cos() * 3.0 + u * 0.013 + v * 0.007,
            ));
        }
    }
    let mut triangles = Vec::new();
    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let a = i * n + j;
            triangles.push([a, a + 1, a + n]);
            triangles.push([a + 1, a + n + 1, a + n]);
        }
    }
    Surface::from_parts(vertices, triangles)
}

fn fiducial() -> HemispherePair<Surface> {
    HemispherePair::new(wavy_sheet(60, 0.0), wavy_sheet(60, 50.0))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_distance_field(c: &mut Criterion) {
    let fiducial = fiducial();
    let grid = VoxelGrid::new([24, 48, 96], Matrix4::identity()).unwrap();

    let mut group = c.benchmark_group("DistanceField");
    group.sample_size(10);
    group.throughput(Throughput::Elements(grid.voxel_count() as u64));
    group.bench_function("voxels_110k", |b| {
        b.iter(|| compute_distance_field(black_box(&grid), black_box(&fiducial)));
    });
    group.finish();
}

fn bench_rasterize(c: &mut Criterion) {
    let fiducial = fiducial();
    let grid = VoxelGrid::new([24, 48, 96], Matrix4::identity()).unwrap();
    let field = compute_distance_field(&grid, &fiducial).unwrap();
    let map = VertexIndexMap::from_flat_surfaces(&fiducial).unwrap();

    let mut rois = RoiSet::new();
    rois.insert("a", (0..2000).collect());
    rois.insert("b", (1500..4000).collect());
    rois.insert("c", (3600..7000).step_by(2).collect());

    let params = RoiMaskParams::default();
    c.bench_function("rasterize_three_rois", |b| {
        b.iter(|| rasterize_rois(black_box(&field), &rois, &map, None, &params));
    });
}

criterion_group!(benches, bench_distance_field, bench_rasterize);
criterion_main!(benches);
