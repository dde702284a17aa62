//! Property-based tests for geodesic disc sampling.
//!
//! Run with: cargo test -p cortex-tissot -- proptest

#![allow(clippy::unwrap_used)]

use cortex_geodesic::{GeodesicSolver, SurfaceGraph};
use cortex_tissot::{tissot_indicatrix, TissotParams};
use cortex_types::{Point3, Surface};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// Strategies
// =============================================================================

/// A jittered `n` x `n` grid sheet with mild height variation.
fn arb_sheet() -> impl Strategy<Value = Surface> {
    (4_u32..10).prop_flat_map(|n| {
        prop::collection::vec(prop::array::uniform3(-0.25..0.25f64), (n * n) as usize).prop_map(
            move |jitter| {
                let vertices = jitter
                    .iter()
                    .enumerate()
                    .map(|(k, [dx, dy, dz])| {
                        #[allow(clippy::cast_possible_truncation)]
                        let k = k as u32;
                        Point3::new(f64::from(k / n) + dx, f64::from(k % n) + dy, *dz)
                    })
                    .collect();
                let mut triangles = Vec::new();
                for i in 0..n - 1 {
                    for j in 0..n - 1 {
                        let a = i * n + j;
                        triangles.push([a, a + n, a + 1]);
                        triangles.push([a + 1, a + n, a + n + 1]);
                    }
                }
                Surface::from_parts(vertices, triangles)
            },
        )
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// No two accepted centres are closer than the spacing, and every weight
    /// lies between 0 and the number of centres.
    #[test]
    fn centres_spaced_and_weights_bounded(
        sheet in arb_sheet(),
        seed in any::<u64>(),
        spacing in 1.0..5.0f64,
        radius in 0.5..3.0f64,
    ) {
        let params = TissotParams::default()
            .with_radius(radius)
            .with_spacing(spacing)
            .with_max_fails(20);
        let result = tissot_indicatrix(&sheet, &params, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert!(!result.centers.is_empty());

        let graph = SurfaceGraph::from_surface(&sheet).unwrap();
        let solver = GeodesicSolver::new(&graph, &sheet.vertices).unwrap();
        for (i, &a) in result.centers.iter().enumerate() {
            let dist = solver.distances_from(a).unwrap();
            for &b in &result.centers[i + 1..] {
                prop_assert!(dist[b] >= spacing - 1e-9);
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let bound = result.centers.len() as f64;
        prop_assert!(result.weights.iter().all(|&w| (0.0..=bound).contains(&w)));
    }
}
