//! Voxel-space analyses of cortical surfaces.
//!
//! This crate turns surface geometry into volumes on a reference voxel grid:
//!
//! - [`compute_distance_field`] - Distance from every voxel to the nearest
//!   fiducial vertex, and which vertex that is
//! - [`rasterize_rois`] - Signed per-hemisphere ROI labels for voxels near
//!   the surface
//!
//! ROIs are given in the valid-vertex index space (vertices that survive
//! on the flatmap); a [`VertexIndexMap`] translates them into the merged
//! full index space of the distance field.
//!
//! # Example
//!
//! ```
//! use cortex_types::{HemispherePair, Matrix4, Point3, Surface, VoxelGrid};
//! use cortex_volume::{
//!     compute_distance_field, rasterize_rois, RoiMaskParams, RoiSet, VertexIndexMap,
//! };
//!
//! let hemi = |x: f64| {
//!     Surface::from_parts(
//!         vec![
//!             Point3::new(x, 0.0, 0.0),
//!             Point3::new(x + 1.0, 0.0, 0.0),
//!             Point3::new(x, 1.0, 0.0),
//!         ],
//!         vec![[0, 1, 2]],
//!     )
//! };
//! let fiducial = HemispherePair::new(hemi(0.0), hemi(6.0));
//! let grid = VoxelGrid::new([1, 2, 8], Matrix4::identity()).unwrap();
//!
//! let field = compute_distance_field(&grid, &fiducial).unwrap();
//! let index_map = VertexIndexMap::from_flat_surfaces(&fiducial).unwrap();
//!
//! let mut rois = RoiSet::new();
//! rois.insert("V1", vec![0, 3]);
//!
//! let masks = rasterize_rois(&field, &rois, &index_map, None, &RoiMaskParams::default()).unwrap();
//! assert_eq!(masks.label_of("V1"), Some(1));
//! assert_eq!(masks.mask().as_slice()[0], -1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod field;
mod index_map;
mod rasterize;
mod roi;
mod spatial;

pub use error::{VolumeError, VolumeResult};
pub use field::{compute_distance_field, VoxelDistanceField};
pub use index_map::VertexIndexMap;
pub use rasterize::{rasterize_rois, OverlapPolicy, RoiMaskParams, RoiMasks};
pub use roi::{is_cortex, RoiSet, RoiSource, CORTEX_ROI};
pub use spatial::{NearestVertex, SurfaceIndex};
