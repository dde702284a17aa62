//! Core types for cortical surface geometry.
//!
//! This crate provides the shared data model used by the analysis crates:
//!
//! - [`Surface`] - One hemisphere's triangulated surface
//! - [`SurfacePair`] - Fiducial and flat surfaces sharing vertex indexing
//! - [`Hemisphere`] / [`HemispherePair`] - Per-hemisphere selection and storage
//! - [`VoxelGrid`] - A voxel lattice with its surface-to-voxel transform
//! - [`VoxelVolume`] - Per-voxel values in the grid's flattened order
//!
//! Loading surfaces and transforms from disk is left to callers; everything
//! here is an already-loaded value.
//!
//! # Units
//!
//! Fiducial coordinates are millimetres. Flat coordinates live in the
//! flatmap plane (`z = 0`) with the same index space as the fiducial surface.
//!
//! # Example
//!
//! ```
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
//! let both = HemispherePair::new(tri.clone(), tri);
//! let merged = Surface::merge(&both.left, &both.right);
//!
//! assert_eq!(merged.vertex_count(), 6);
//! assert_eq!(merged.triangles[1], [3, 4, 5]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod grid;
mod hemisphere;
mod surface;

pub use error::{TypesError, TypesResult};
pub use grid::{VoxelGrid, VoxelVolume};
pub use hemisphere::{Hemisphere, HemispherePair};
pub use surface::{Surface, SurfacePair};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
