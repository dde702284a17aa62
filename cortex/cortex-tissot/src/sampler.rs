//! Rejection sampling of geodesic disc centres.

use cortex_geodesic::{GeodesicSolver, SurfaceGraph};
use cortex_types::{HemispherePair, Surface};
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::TissotResult;
use crate::params::TissotParams;

/// Accumulated disc weights and the centres that produced them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TissotIndicatrix {
    /// Per-vertex sum of disc weights over all accepted centres.
    pub weights: Vec<f64>,
    /// Accepted centre vertices, in acceptance order.
    pub centers: Vec<usize>,
    /// Number of candidates drawn.
    pub attempts: usize,
}

impl TissotIndicatrix {
    /// Number of accepted centres.
    #[must_use]
    pub fn center_count(&self) -> usize {
        self.centers.len()
    }
}

/// Soft disc profile: close to 1 inside `radius`, 0.5 on the rim, falling
/// towards 0 outside.
#[inline]
fn disc_weight(radius: f64, distance: f64) -> f64 {
    (radius - distance).tanh() / 2.0 + 0.5
}

/// Place geodesic discs on one surface.
///
/// Repeatedly draws a random vertex. A candidate is rejected if an accepted
/// centre lies less than `params.spacing` away along the surface; otherwise
/// it is accepted and every vertex within `2 * radius` of it gains the disc
/// weight `tanh(radius - d) / 2 + 0.5`. Sampling stops after
/// `params.max_fails` consecutive rejections, or after
/// `params.max_attempts` draws in total.
///
/// Path lengths are shortest-path lengths through the triangle edges in
/// world units.
///
/// # Errors
///
/// - [`crate::TissotError::InvalidParams`] if radius or spacing is not
///   finite and positive.
/// - [`crate::TissotError::Geodesic`] if a triangle index is out of range.
pub fn tissot_indicatrix<R: Rng + ?Sized>(
    surface: &Surface,
    params: &TissotParams,
    rng: &mut R,
) -> TissotResult<TissotIndicatrix> {
    params.validate()?;

    let n = surface.vertex_count();
    let graph = SurfaceGraph::from_surface(surface)?;
    let positions = surface.vertices.as_slice();
    let solver = GeodesicSolver::new(&graph, positions)?;

    let mut weights = vec![0.0; n];
    let mut centers: Vec<usize> = Vec::new();
    let mut attempts = 0;
    let mut fails = 0;

    if n == 0 {
        return Ok(TissotIndicatrix {
            weights,
            centers,
            attempts,
        });
    }

    let search_radius = params.search_radius();
    let disc_radius = params.disc_radius();

    while fails < params.max_fails && attempts < params.max_attempts {
        attempts += 1;
        let candidate = rng.gen_range(0..n);

        let nearby = solver.shortest_paths(candidate, search_radius)?;
        let mut lengths = nearby.prefix_lengths(positions);
        let too_close = centers.iter().any(|&c| {
            lengths
                .length_to(c)
                .is_some_and(|d| d < params.spacing)
        });

        if too_close {
            fails += 1;
            debug!(candidate, fails, "Candidate too close to an accepted centre");
            continue;
        }

        fails = 0;
        centers.push(candidate);
        debug!(candidate, accepted = centers.len(), "Accepted disc centre");

        let disc = solver.shortest_paths(candidate, disc_radius)?;
        let mut lengths = disc.prefix_lengths(positions);
        for (vertex, _) in disc.iter() {
            if let Some(d) = lengths.length_to(vertex) {
                weights[vertex] += disc_weight(params.radius, d);
            }
        }
    }

    if attempts >= params.max_attempts && fails < params.max_fails {
        warn!(
            attempts,
            centers = centers.len(),
            "Tissot sampling stopped at the attempt cap"
        );
    }

    Ok(TissotIndicatrix {
        weights,
        centers,
        attempts,
    })
}

/// Place geodesic discs on both fiducial surfaces, left first.
///
/// Uses `params.seed` when set, so results are reproducible; otherwise the
/// thread RNG.
///
/// # Errors
///
/// Returns the first error from either hemisphere.
///
/// # Example
///
/// ```
/// use cortex_tissot::{tissots_indicatrix, TissotParams};
/// use cortex_types::{HemispherePair, Point3, Surface};
///
/// let strip = Surface::from_parts(
///     (0..20).map(|i| Point3::new(f64::from(i / 2), f64::from(i % 2), 0.0)).collect(),
///     (0..18).map(|i| [i, i + 1, i + 2]).collect(),
/// );
/// let fiducial = HemispherePair::new(strip.clone(), strip);
/// let params = TissotParams::default().with_radius(1.0).with_spacing(3.0).with_seed(1);
///
/// let discs = tissots_indicatrix(&fiducial, &params).unwrap();
/// assert!(!discs.left.centers.is_empty());
/// ```
pub fn tissots_indicatrix(
    fiducial: &HemispherePair<Surface>,
    params: &TissotParams,
) -> TissotResult<HemispherePair<TissotIndicatrix>> {
    let mut rng: Box<dyn RngCore> = if let Some(seed) = params.seed {
        Box::new(rand::rngs::StdRng::seed_from_u64(seed))
    } else {
        Box::new(rand::thread_rng())
    };

    fiducial.as_ref().try_map(|hemisphere, surface| {
        let result = tissot_indicatrix(surface, params, &mut rng)?;
        info!(
            %hemisphere,
            centers = result.center_count(),
            attempts = result.attempts,
            "Placed Tissot indicatrices"
        );
        Ok(result)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cortex_types::Point3;
    use rand::rngs::StdRng;

    /// `n` x `n` unit grid in the plane, split into right triangles.
    fn grid(n: u32) -> Surface {
        let vertices = (0..n * n)
            .map(|k| Point3::new(f64::from(k / n), f64::from(k % n), 0.0))
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
    }

    fn params() -> TissotParams {
        TissotParams::default()
            .with_radius(1.5)
            .with_spacing(4.0)
            .with_max_fails(30)
    }

    #[test]
    fn disc_profile() {
        assert_relative_eq!(disc_weight(10.0, 10.0), 0.5);
        assert!(disc_weight(10.0, 0.0) > 0.999);
        assert!(disc_weight(10.0, 20.0) < 0.001);
    }

    #[test]
    fn centres_respect_spacing() {
        let surface = grid(12);
        let mut rng = StdRng::seed_from_u64(3);
        let result = tissot_indicatrix(&surface, &params(), &mut rng).unwrap();
        assert!(result.center_count() > 1);

        let graph = SurfaceGraph::from_surface(&surface).unwrap();
        let solver = GeodesicSolver::new(&graph, &surface.vertices).unwrap();
        for (i, &a) in result.centers.iter().enumerate() {
            let dist = solver.distances_from(a).unwrap();
            for &b in &result.centers[i + 1..] {
                assert!(dist[b] >= 4.0, "centres {a} and {b} are {} apart", dist[b]);
            }
        }
    }

    #[test]
    fn weights_are_bounded_by_centre_count() {
        let surface = grid(10);
        let mut rng = StdRng::seed_from_u64(11);
        let result = tissot_indicatrix(&surface, &params(), &mut rng).unwrap();

        #[allow(clippy::cast_precision_loss)]
        let bound = result.center_count() as f64;
        assert!(result.weights.iter().all(|&w| (0.0..=bound).contains(&w)));
        for &c in &result.centers {
            assert!(result.weights[c] > 0.9);
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let surface = grid(8);
        let a = tissot_indicatrix(&surface, &params(), &mut StdRng::seed_from_u64(5)).unwrap();
        let b = tissot_indicatrix(&surface, &params(), &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_vertex_exhausts_fail_budget() {
        let surface = Surface::from_parts(vec![Point3::origin()], Vec::new());
        let p = params().with_max_fails(5);
        let result = tissot_indicatrix(&surface, &p, &mut StdRng::seed_from_u64(0)).unwrap();

        assert_eq!(result.centers, vec![0]);
        assert_eq!(result.attempts, 6);
        assert_relative_eq!(result.weights[0], disc_weight(p.radius, 0.0));
    }

    #[test]
    fn attempt_cap_bounds_sampling() {
        let surface = grid(6);
        let p = params().with_max_fails(usize::MAX).with_max_attempts(25);
        let result = tissot_indicatrix(&surface, &p, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(result.attempts, 25);
    }

    #[test]
    fn empty_surface_yields_nothing() {
        let result =
            tissot_indicatrix(&Surface::new(), &params(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(result.centers.is_empty());
        assert_eq!(result.attempts, 0);
    }

    #[test]
    fn hemispheres_share_seeded_stream() {
        let fiducial = HemispherePair::new(grid(7), grid(7));
        let p = params().with_seed(42);
        let first = tissots_indicatrix(&fiducial, &p).unwrap();
        let second = tissots_indicatrix(&fiducial, &p).unwrap();
        assert_eq!(first, second);
    }
}
