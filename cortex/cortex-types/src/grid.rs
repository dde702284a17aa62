//! Voxel grids and voxel-shaped volumes.
//!
//! Grids are stored in row-major order over three spatial axes. The first
//! (slowest) axis corresponds to image `z`, the last (fastest) to image `x`,
//! so a voxel at grid position `[a0, a1, a2]` has image coordinates
//! `(x, y, z) = (a2, a1, a0)`.

use nalgebra::{Matrix4, Point3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};

/// A 3-D voxel lattice with its surface-to-voxel transform.
///
/// `xfm` maps surface (world) coordinates to voxel coordinates. Its inverse,
/// computed once at construction, maps voxel coordinates back to the
/// surface space.
///
/// # Example
///
/// ```
/// use cortex_types::{Matrix4, VoxelGrid};
///
/// // A 4D reference image (x=4, y=3, z=2, t=10): the time axis is dropped.
/// let grid = VoxelGrid::from_reference_shape(&[4, 3, 2, 10], Matrix4::identity()).unwrap();
/// assert_eq!(grid.shape(), [2, 3, 4]);
/// assert_eq!(grid.voxel_count(), 24);
///
/// let p = grid.voxel_center(grid.flat_index([1, 2, 3]).unwrap()).unwrap();
/// assert_eq!((p.x, p.y, p.z), (3.0, 2.0, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelGrid {
    shape: [usize; 3],
    xfm: Matrix4<f64>,
    voxel_to_world: Matrix4<f64>,
}

impl VoxelGrid {
    /// Create a grid from a row-major shape and a surface-to-voxel transform.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::SingularTransform`] if `xfm` cannot be inverted.
    pub fn new(shape: [usize; 3], xfm: Matrix4<f64>) -> TypesResult<Self> {
        let voxel_to_world = xfm.try_inverse().ok_or(TypesError::SingularTransform)?;
        Ok(Self {
            shape,
            xfm,
            voxel_to_world,
        })
    }

    /// Create a grid from a reference image shape in image axis order.
    ///
    /// The image shape `(x, y, z[, t, ...])` is reversed into row-major order
    /// and any leading non-spatial axes are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidShape`] if fewer than three axes are given,
    /// or [`TypesError::SingularTransform`] if `xfm` cannot be inverted.
    pub fn from_reference_shape(image_shape: &[usize], xfm: Matrix4<f64>) -> TypesResult<Self> {
        if image_shape.len() < 3 {
            return Err(TypesError::invalid_shape(format!(
                "reference shape has {} axes, need at least 3",
                image_shape.len()
            )));
        }
        let shape = [image_shape[2], image_shape[1], image_shape[0]];
        Self::new(shape, xfm)
    }

    /// Row-major grid shape.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Total number of voxels.
    #[inline]
    #[must_use]
    pub const fn voxel_count(&self) -> usize {
        self.shape[0] * self.shape[1] * self.shape[2]
    }

    /// Surface-to-voxel transform.
    #[inline]
    #[must_use]
    pub const fn xfm(&self) -> &Matrix4<f64> {
        &self.xfm
    }

    /// Voxel-to-surface transform (inverse of [`VoxelGrid::xfm`]).
    #[inline]
    #[must_use]
    pub const fn voxel_to_world(&self) -> &Matrix4<f64> {
        &self.voxel_to_world
    }

    /// Flattened index of a grid position, or `None` if out of bounds.
    #[must_use]
    pub const fn flat_index(&self, [a0, a1, a2]: [usize; 3]) -> Option<usize> {
        let [s0, s1, s2] = self.shape;
        if a0 >= s0 || a1 >= s1 || a2 >= s2 {
            return None;
        }
        Some((a0 * s1 + a1) * s2 + a2)
    }

    /// Grid position of a flattened index, or `None` if out of bounds.
    #[must_use]
    pub const fn unravel(&self, flat: usize) -> Option<[usize; 3]> {
        if flat >= self.voxel_count() {
            return None;
        }
        let [_, s1, s2] = self.shape;
        Some([flat / (s1 * s2), (flat / s2) % s1, flat % s2])
    }

    /// Surface-space coordinate of a voxel given by flattened index, or
    /// `None` if out of bounds.
    ///
    /// The grid position is reversed into image order, extended to
    /// homogeneous coordinates `(x, y, z, 1)` and multiplied by the inverse
    /// transform; the first three components are returned.
    #[must_use]
    pub fn voxel_center(&self, flat: usize) -> Option<Point3<f64>> {
        self.unravel(flat).map(|position| self.center_at(position))
    }

    /// Surface-space coordinates of every voxel, in flattened order.
    #[must_use]
    pub fn voxel_centers(&self) -> Vec<Point3<f64>> {
        let [s0, s1, s2] = self.shape;
        let mut centers = Vec::with_capacity(self.voxel_count());
        for a0 in 0..s0 {
            for a1 in 0..s1 {
                for a2 in 0..s2 {
                    centers.push(self.center_at([a0, a1, a2]));
                }
            }
        }
        centers
    }

    #[allow(clippy::cast_precision_loss)]
    fn center_at(&self, [a0, a1, a2]: [usize; 3]) -> Point3<f64> {
        let h = self.voxel_to_world * Vector4::new(a2 as f64, a1 as f64, a0 as f64, 1.0);
        Point3::new(h.x, h.y, h.z)
    }

    /// Continuous voxel coordinate `(x, y, z)` of a surface-space point.
    #[must_use]
    pub fn world_to_voxel(&self, point: &Point3<f64>) -> Point3<f64> {
        let h = self.xfm * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(h.x, h.y, h.z)
    }
}

/// Per-voxel values laid out in a grid's flattened order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelVolume<T> {
    shape: [usize; 3],
    data: Vec<T>,
}

impl<T> VoxelVolume<T> {
    /// Wrap flattened data with its row-major shape.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidShape`] if `data.len()` does not equal the
    /// product of `shape`.
    pub fn from_vec(shape: [usize; 3], data: Vec<T>) -> TypesResult<Self> {
        let expected = shape[0] * shape[1] * shape[2];
        if data.len() != expected {
            return Err(TypesError::invalid_shape(format!(
                "shape {shape:?} holds {expected} voxels but data has {}",
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Row-major shape.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Number of voxels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the volume has no voxels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at a flattened index.
    #[inline]
    #[must_use]
    pub fn get(&self, flat: usize) -> Option<&T> {
        self.data.get(flat)
    }

    /// Value at a grid position.
    #[must_use]
    pub fn get_at(&self, [a0, a1, a2]: [usize; 3]) -> Option<&T> {
        let [s0, s1, s2] = self.shape;
        if a0 >= s0 || a1 >= s1 || a2 >= s2 {
            return None;
        }
        self.data.get((a0 * s1 + a1) * s2 + a2)
    }

    /// Flattened values.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume and return the flattened values.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over flattened values.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Map every voxel to a new value, keeping the shape.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> VoxelVolume<U> {
        VoxelVolume {
            shape: self.shape,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Number of voxels satisfying `pred`.
    #[must_use]
    pub fn count_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.data.iter().filter(|v| pred(v)).count()
    }
}
