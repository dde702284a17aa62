//! Per-vertex curvature of cortical surfaces.
//!
//! Raw curvature comes from a [`CurvatureEstimator`]; the built-in
//! [`CotangentMeanCurvature`] computes discrete mean curvature, and any
//! closure `Fn(&Surface) -> Vec<f64>` can stand in for an external
//! estimate. [`smooth_curvature`] then averages the raw values over
//! n-ring neighbourhoods with Gaussian distance weights.
//!
//! # Example
//!
//! ```
//! use cortex_curvature::{curvature, CotangentMeanCurvature, SmoothingParams};
//! use cortex_types::{HemispherePair, Point3, Surface};
//!
//! let tri = Surface::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//! let fiducial = HemispherePair::new(tri.clone(), tri);
//!
//! let curv = curvature(&fiducial, &CotangentMeanCurvature, &SmoothingParams::default()).unwrap();
//! assert_eq!(curv.left.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod estimator;
mod smooth;

pub use error::{CurvatureError, CurvatureResult};
pub use estimator::{CotangentMeanCurvature, CurvatureEstimator};
pub use smooth::{smooth_curvature, SmoothingParams};

use cortex_types::{HemispherePair, Surface};
use tracing::info;

/// Smoothed curvature of both hemispheres.
///
/// Runs `estimator` on each fiducial surface and smooths the result with
/// `params`, left hemisphere first.
///
/// # Errors
///
/// Returns the first error from estimation or smoothing.
pub fn curvature<E: CurvatureEstimator + ?Sized>(
    fiducial: &HemispherePair<Surface>,
    estimator: &E,
    params: &SmoothingParams,
) -> CurvatureResult<HemispherePair<Vec<f64>>> {
    fiducial.as_ref().try_map(|hemisphere, surface| {
        info!(
            %hemisphere,
            vertices = surface.vertex_count(),
            smooth = params.smooth,
            neighborhood = params.neighborhood,
            "Computing curvature"
        );
        let raw = estimator.estimate(surface)?;
        smooth_curvature(surface, &raw, params)
    })
}
