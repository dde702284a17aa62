//! Metric (edge length) distortion.

use cortex_geodesic::SurfaceGraph;
use cortex_types::SurfacePair;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::DistortionResult;

/// Per-vertex mean of `flat - fiducial` edge length over flat-mesh neighbours.
///
/// Adjacency comes from the flat triangles. Vertices with no flat neighbour
/// get 0. Positive values mean the flatmap stretches edges at the vertex.
///
/// # Errors
///
/// Returns [`crate::DistortionError::Geodesic`] if a flat triangle
/// references a vertex outside the surface.
pub fn metric_distortion(pair: &SurfacePair) -> DistortionResult<Vec<f64>> {
    let fiducial = pair.fiducial();
    let flat = pair.flat();
    let graph = SurfaceGraph::from_surface(flat)?;

    let isolated = (0..graph.vertex_count())
        .filter(|&v| graph.is_isolated(v))
        .count();
    if isolated > 0 {
        warn!(isolated, "Vertices off the flatmap get zero metric distortion");
    }
    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "Computing metric distortion"
    );

    Ok((0..graph.vertex_count())
        .into_par_iter()
        .map(|v| {
            let neighbors = graph.neighbors(v);
            if neighbors.is_empty() {
                return 0.0;
            }
            let total: f64 = neighbors
                .iter()
                .map(|&u| flat.edge_length(v, u as usize) - fiducial.edge_length(v, u as usize))
                .sum();
            #[allow(clippy::cast_precision_loss)]
            let count = neighbors.len() as f64;
            total / count
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cortex_types::{Point3, Surface};

    fn fan(scale: f64) -> Surface {
        Surface::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(scale, 0.0, 0.0),
                Point3::new(0.0, scale, 0.0),
                Point3::new(-scale, 0.0, 0.0),
                Point3::new(3.0, 3.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn isometry_has_zero_distortion() {
        let pair = SurfacePair::new(fan(1.0), fan(1.0)).unwrap();
        for d in metric_distortion(&pair).unwrap() {
            assert_relative_eq!(d, 0.0);
        }
    }

    #[test]
    fn centre_vertex_averages_spoke_stretch() {
        let pair = SurfacePair::new(fan(1.0), fan(2.0)).unwrap();
        let d = metric_distortion(&pair).unwrap();

        // Vertex 0 has three unit spokes, each stretched by 1.
        assert_relative_eq!(d[0], 1.0, epsilon = 1e-12);
        // Vertex 1 neighbours 0 (stretch 1) and 2 (stretch sqrt 2).
        assert_relative_eq!(d[1], (1.0 + 2.0_f64.sqrt()) / 2.0, epsilon = 1e-12);
        // Vertex 4 is on no triangle.
        assert_eq!(d[4], 0.0);
    }

    #[test]
    fn fiducial_triangles_are_ignored() {
        let mut fiducial = fan(1.0);
        fiducial.triangles = vec![[1, 3, 4]];
        let pair = SurfacePair::new(fiducial, fan(1.0)).unwrap();
        let d = metric_distortion(&pair).unwrap();
        assert_eq!(d[4], 0.0);
        assert_relative_eq!(d[0], 0.0);
    }
}
