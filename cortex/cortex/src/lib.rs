//! Geometric analyses of cortical surfaces and the volumes they sit in.
//!
//! This umbrella crate re-exports the cortex-* crates behind one API.
//! Every analysis is a pure function over already-loaded surfaces and
//! grids; loading files, fetching transforms and caching results are left
//! to the caller.
//!
//! # Quick Start
//!
//! ```
//! use cortex::prelude::*;
//!
//! let tri = |x: f64| {
//!     Surface::from_parts(
//!         vec![
//!             Point3::new(x, 0.0, 0.0),
//!             Point3::new(x + 1.0, 0.0, 0.0),
//!             Point3::new(x, 1.0, 0.0),
//!         ],
//!         vec![[0, 1, 2]],
//!     )
//! };
//! let fiducial = HemispherePair::new(tri(0.0), tri(10.0));
//!
//! // Curvature, smoothed over 4-hop neighbourhoods
//! let curv = curvature(&fiducial, &CotangentMeanCurvature, &SmoothingParams::default()).unwrap();
//! assert_eq!(curv.right.len(), 3);
//!
//! // Distortion of a flatmap identical to the fiducial surface
//! let pairs = fiducial
//!     .clone()
//!     .try_map(|_, s| SurfacePair::new(s.clone(), s))
//!     .unwrap();
//! let areal = flatmap_distortion(&pairs, DistortionKind::Areal).unwrap();
//! assert!(areal.left.iter().all(|d| d.abs() < 1e-12));
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Surfaces, hemisphere pairs, voxel grids and volumes
//! - [`geodesic`] - Adjacency graphs, n-ring neighbourhoods, shortest paths
//! - [`volume`] - Voxel distance fields and ROI voxel masks
//! - [`curvature`] - Mean curvature and its geodesic smoothing
//! - [`distortion`] - Areal and metric flatmap distortion
//! - [`tissot`] - Geodesic disc sampling
//!
//! # Feature Flags
//!
//! - `serde` - Serialize parameter structs and results

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Surfaces, hemisphere pairs, voxel grids and volumes.
pub use cortex_types as types;

/// Adjacency graphs, n-ring neighbourhoods and shortest paths.
pub use cortex_geodesic as geodesic;

/// Voxel distance fields and ROI voxel masks.
pub use cortex_volume as volume;

/// Mean curvature and geodesic smoothing.
pub use cortex_curvature as curvature;

/// Areal and metric flatmap distortion.
pub use cortex_distortion as distortion;

/// Geodesic disc sampling.
pub use cortex_tissot as tissot;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for cortical surface analyses.
///
/// # Usage
///
/// ```
/// use cortex::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cortex_types::{
        Hemisphere, HemispherePair, Matrix4, Point3, Surface, SurfacePair, VoxelGrid, VoxelVolume,
    };

    // Graphs
    pub use cortex_geodesic::{GeodesicSolver, SurfaceGraph};

    // Volume
    pub use cortex_volume::{
        compute_distance_field, rasterize_rois, OverlapPolicy, RoiMaskParams, RoiMasks, RoiSet,
        RoiSource, VertexIndexMap, VoxelDistanceField,
    };

    // Curvature
    pub use cortex_curvature::{
        curvature, smooth_curvature, CotangentMeanCurvature, CurvatureEstimator, SmoothingParams,
    };

    // Distortion
    pub use cortex_distortion::{flatmap_distortion, DistortionKind};

    // Tissot
    pub use cortex_tissot::{tissot_indicatrix, tissots_indicatrix, TissotIndicatrix, TissotParams};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let surface = Surface::new();
        assert_eq!(surface.vertex_count(), 0);
        assert_eq!(RoiMaskParams::default().overlap, OverlapPolicy::Cut);
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::Surface::new();
        let _ = volume::RoiSet::new();
        let _ = curvature::SmoothingParams::default();
        let _ = tissot::TissotParams::default();
        assert_eq!(distortion::DistortionKind::default(), distortion::DistortionKind::Areal);
    }
}
