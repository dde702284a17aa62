//! Gaussian smoothing of per-vertex values over n-ring neighbourhoods.

use cortex_geodesic::{RingWalker, SurfaceGraph};
use cortex_types::Surface;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{CurvatureError, CurvatureResult};

/// Parameters for [`smooth_curvature`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothingParams {
    /// Gaussian bandwidth in surface units; 0 disables smoothing.
    pub smooth: f64,
    /// Neighbourhood size: vertices within `neighborhood + 1` hops are used.
    pub neighborhood: usize,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            smooth: 8.0,
            neighborhood: 3,
        }
    }
}

impl SmoothingParams {
    /// Set the Gaussian bandwidth.
    #[must_use]
    pub const fn with_smooth(mut self, smooth: f64) -> Self {
        self.smooth = smooth;
        self
    }

    /// Set the neighbourhood size.
    #[must_use]
    pub const fn with_neighborhood(mut self, neighborhood: usize) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Number of graph hops spanned by a neighbourhood.
    #[must_use]
    pub const fn hops(&self) -> usize {
        self.neighborhood + 1
    }

    fn validate(&self) -> CurvatureResult<()> {
        if !self.smooth.is_finite() || self.smooth < 0.0 {
            return Err(CurvatureError::InvalidParams(format!(
                "smooth must be finite and non-negative, got {}",
                self.smooth
            )));
        }
        Ok(())
    }
}

/// Smooth `raw` over geodesic neighbourhoods of `surface`.
///
/// Each vertex gets the mean over its neighbourhood of
/// `exp(-|p_u - p_v|² / (2 smooth²)) * raw[u]`. The neighbourhood holds the
/// vertex itself and every vertex within [`SmoothingParams::hops`] hops.
/// Vertices in no triangle have an empty neighbourhood and get 0.
///
/// With `smooth == 0` the raw values are returned unchanged.
///
/// # Errors
///
/// - [`CurvatureError::LengthMismatch`] if `raw` does not have one value per
///   vertex.
/// - [`CurvatureError::InvalidParams`] if `smooth` is negative or not finite.
/// - [`CurvatureError::Geodesic`] if a triangle index is out of range.
///
/// # Example
///
/// ```
/// use cortex_curvature::{smooth_curvature, SmoothingParams};
/// use cortex_types::{Point3, Surface};
///
/// let surface = Surface::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// let raw = vec![1.0, 2.0, 3.0];
///
/// let unchanged = smooth_curvature(&surface, &raw, &SmoothingParams::default().with_smooth(0.0)).unwrap();
/// assert_eq!(unchanged, raw);
/// ```
pub fn smooth_curvature(
    surface: &Surface,
    raw: &[f64],
    params: &SmoothingParams,
) -> CurvatureResult<Vec<f64>> {
    let n = surface.vertex_count();
    if raw.len() != n {
        return Err(CurvatureError::LengthMismatch {
            values: raw.len(),
            vertices: n,
        });
    }
    params.validate()?;

    if params.smooth <= 0.0 {
        return Ok(raw.to_vec());
    }

    let graph = SurfaceGraph::from_surface(surface)?;
    let isolated = (0..n).filter(|&v| graph.is_isolated(v)).count();
    if isolated > 0 {
        warn!(isolated, "Vertices in no triangle get zero smoothed curvature");
    }
    debug!(
        vertices = n,
        hops = params.hops(),
        smooth = params.smooth,
        "Smoothing curvature"
    );

    let denom = 2.0 * params.smooth * params.smooth;
    let hops = params.hops();
    let positions = &surface.vertices;

    let smoothed = (0..n)
        .into_par_iter()
        .map_init(
            || RingWalker::new(n),
            |walker, v| {
                let ring = walker.collect(&graph, v, hops);
                if ring.is_empty() {
                    return 0.0;
                }
                let origin = positions[v];
                let sum: f64 = ring
                    .iter()
                    .map(|&u| {
                        let d2 = (positions[u] - origin).norm_squared();
                        (-d2 / denom).exp() * raw[u]
                    })
                    .sum();
                #[allow(clippy::cast_precision_loss)]
                let count = ring.len() as f64;
                sum / count
            },
        )
        .collect();

    Ok(smoothed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cortex_types::Point3;

    /// Triangle strip along x: vertex i at (i / 2, i % 2, 0).
    fn strip(n: u32) -> Surface {
        let vertices = (0..n)
            .map(|i| Point3::new(f64::from(i / 2), f64::from(i % 2), 0.0))
            .collect();
        let triangles = (0..n - 2).map(|i| [i, i + 1, i + 2]).collect();
        Surface::from_parts(vertices, triangles)
    }

    #[test]
    fn zero_bandwidth_is_identity() {
        let surface = strip(8);
        let raw: Vec<f64> = (0..8).map(|i| f64::from(i) * 0.37 - 1.0).collect();
        let params = SmoothingParams::default().with_smooth(0.0);
        assert_eq!(smooth_curvature(&surface, &raw, &params).unwrap(), raw);
    }

    #[test]
    fn constant_field_is_damped_by_distance_weights() {
        let surface = strip(10);
        let raw = vec![2.0; 10];
        let params = SmoothingParams::default();
        let out = smooth_curvature(&surface, &raw, &params).unwrap();

        for &v in &out {
            // Mean of g * 2 with 0 < g <= 1, and g = 1 for the vertex itself.
            assert!(v > 0.0 && v <= 2.0);
        }
    }

    #[test]
    fn huge_bandwidth_is_plain_neighbourhood_mean() {
        let surface = strip(6);
        let raw = vec![0.0, 6.0, 0.0, 0.0, 0.0, 3.0];
        let params = SmoothingParams::default()
            .with_smooth(1e9)
            .with_neighborhood(0);
        let out = smooth_curvature(&surface, &raw, &params).unwrap();

        // One hop from vertex 0 reaches {0, 1, 2}.
        assert_relative_eq!(out[0], 2.0, epsilon = 1e-9);
        // One hop from vertex 5 reaches {3, 4, 5}.
        assert_relative_eq!(out[5], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn isolated_vertex_gets_zero() {
        let mut surface = strip(4);
        surface.vertices.push(Point3::new(9.0, 9.0, 9.0));
        let raw = vec![1.0; 5];
        let out = smooth_curvature(&surface, &raw, &SmoothingParams::default()).unwrap();
        assert_eq!(out[4], 0.0);
    }

    #[test]
    fn input_validation() {
        let surface = strip(4);
        assert!(matches!(
            smooth_curvature(&surface, &[1.0; 3], &SmoothingParams::default()),
            Err(CurvatureError::LengthMismatch { values: 3, vertices: 4 })
        ));
        assert!(matches!(
            smooth_curvature(
                &surface,
                &[1.0; 4],
                &SmoothingParams::default().with_smooth(-1.0)
            ),
            Err(CurvatureError::InvalidParams(_))
        ));
    }
}
