//! Distortion of cortical flatmaps relative to the fiducial surface.
//!
//! Two measures are provided, selected by [`DistortionKind`]:
//!
//! - [`areal_distortion`] - log ratio of flat to fiducial area around each
//!   vertex
//! - [`metric_distortion`] - mean difference between flat and fiducial edge
//!   lengths at each vertex
//!
//! Both use the flat triangulation, so vertices cut from the flatmap get a
//! distortion of 0.
//!
//! # Example
//!
//! ```
//! use cortex_distortion::{flatmap_distortion, DistortionKind};
//! use cortex_types::{HemispherePair, Point3, Surface, SurfacePair};
//!
//! let tri = Surface::from_parts(
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![[0, 1, 2]],
//! );
//! let pair = SurfacePair::new(tri.clone(), tri).unwrap();
//! let both = HemispherePair::new(pair.clone(), pair);
//!
//! let kind: DistortionKind = "metric".parse().unwrap();
//! let d = flatmap_distortion(&both, kind).unwrap();
//! assert!(d.left.iter().all(|v| v.abs() < 1e-12));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod areal;
mod error;
mod kind;
mod metric;

pub use areal::areal_distortion;
pub use error::{DistortionError, DistortionResult};
pub use kind::DistortionKind;
pub use metric::metric_distortion;

use cortex_types::{HemispherePair, SurfacePair};
use tracing::info;

/// Distortion of one hemisphere's flatmap.
///
/// # Errors
///
/// Returns [`DistortionError::Geodesic`] if the flat triangles are invalid
/// for metric distortion.
pub fn distortion(pair: &SurfacePair, kind: DistortionKind) -> DistortionResult<Vec<f64>> {
    match kind {
        DistortionKind::Areal => Ok(areal_distortion(pair)),
        DistortionKind::Metric => metric_distortion(pair),
    }
}

/// Distortion of both hemispheres' flatmaps, left first.
///
/// # Errors
///
/// Returns the first error from either hemisphere.
pub fn flatmap_distortion(
    pairs: &HemispherePair<SurfacePair>,
    kind: DistortionKind,
) -> DistortionResult<HemispherePair<Vec<f64>>> {
    pairs.as_ref().try_map(|hemisphere, pair| {
        info!(
            %hemisphere,
            %kind,
            vertices = pair.vertex_count(),
            "Computing flatmap distortion"
        );
        distortion(pair, kind)
    })
}
