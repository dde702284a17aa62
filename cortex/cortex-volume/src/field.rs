//! Distance from every voxel to the nearest fiducial vertex.

use cortex_types::{Hemisphere, HemispherePair, Surface, VoxelGrid, VoxelVolume};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::VolumeResult;
use crate::spatial::{NearestVertex, SurfaceIndex};

/// Per-voxel distance to the closest vertex of either hemisphere.
///
/// Both volumes share the grid's shape. Nearest-vertex indices are in the
/// merged "left, then right" index space of the fiducial surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelDistanceField {
    distance: VoxelVolume<f64>,
    nearest_vertex: VoxelVolume<usize>,
    left_vertex_count: usize,
    vertex_count: usize,
}

/// Compute the distance field of `grid` against both fiducial surfaces.
///
/// Voxel centres are placed in surface space with the inverse of the grid
/// transform and each is matched to its closest vertex. Queries run in
/// parallel; ties between equidistant vertices resolve to whichever the
/// KD-tree reports.
///
/// # Errors
///
/// Returns [`crate::VolumeError::EmptySurface`] if neither hemisphere has
/// vertices.
///
/// # Example
///
/// ```
/// use cortex_types::{HemispherePair, Matrix4, Point3, Surface, VoxelGrid};
/// use cortex_volume::compute_distance_field;
///
/// let left = Surface::from_parts(vec![Point3::new(0.0, 0.0, 0.0)], Vec::new());
/// let right = Surface::from_parts(vec![Point3::new(3.0, 0.0, 0.0)], Vec::new());
/// let grid = VoxelGrid::new([1, 1, 4], Matrix4::identity()).unwrap();
///
/// let field = compute_distance_field(&grid, &HemispherePair::new(left, right)).unwrap();
/// assert_eq!(field.nearest_vertex().as_slice(), &[0, 0, 1, 1]);
/// ```
pub fn compute_distance_field(
    grid: &VoxelGrid,
    fiducial: &HemispherePair<Surface>,
) -> VolumeResult<VoxelDistanceField> {
    let index = SurfaceIndex::new(fiducial)?;
    info!(
        voxels = grid.voxel_count(),
        vertices = index.vertex_count(),
        "Computing voxel distance field"
    );
    VoxelDistanceField::from_index(grid, &index)
}

impl VoxelDistanceField {
    /// Compute the field against a prebuilt vertex index.
    ///
    /// # Errors
    ///
    /// Propagates shape errors from volume construction.
    pub fn from_index(grid: &VoxelGrid, index: &SurfaceIndex) -> VolumeResult<Self> {
        let hits: Vec<NearestVertex> = grid
            .voxel_centers()
            .par_iter()
            .map(|center| index.nearest(center))
            .collect();

        let (distance, nearest): (Vec<f64>, Vec<usize>) =
            hits.into_iter().map(|h| (h.distance, h.vertex)).unzip();

        let shape = grid.shape();
        let field = Self {
            distance: VoxelVolume::from_vec(shape, distance)?,
            nearest_vertex: VoxelVolume::from_vec(shape, nearest)?,
            left_vertex_count: index.left_vertex_count(),
            vertex_count: index.vertex_count(),
        };
        debug!(
            left = field.hemisphere_mask(Hemisphere::Left).iter().filter(|&&b| b).count(),
            "Assigned voxels to hemispheres"
        );
        Ok(field)
    }

    /// Distance from each voxel to its nearest vertex.
    #[inline]
    #[must_use]
    pub const fn distance(&self) -> &VoxelVolume<f64> {
        &self.distance
    }

    /// Merged index of each voxel's nearest vertex.
    #[inline]
    #[must_use]
    pub const fn nearest_vertex(&self) -> &VoxelVolume<usize> {
        &self.nearest_vertex
    }

    /// Number of left-hemisphere vertices; merged indices below this are left.
    #[inline]
    #[must_use]
    pub const fn left_vertex_count(&self) -> usize {
        self.left_vertex_count
    }

    /// Total number of vertices in the merged index space.
    #[inline]
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Grid shape.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> [usize; 3] {
        self.distance.shape()
    }

    /// Number of voxels.
    #[inline]
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.distance.len()
    }

    /// Hemisphere whose vertex is closest to `voxel`.
    #[must_use]
    pub fn hemisphere_of_voxel(&self, voxel: usize) -> Option<Hemisphere> {
        self.nearest_vertex.get(voxel).map(|&v| {
            if v < self.left_vertex_count {
                Hemisphere::Left
            } else {
                Hemisphere::Right
            }
        })
    }

    /// Voxels whose nearest vertex lies on `hemisphere`.
    #[must_use]
    pub fn hemisphere_mask(&self, hemisphere: Hemisphere) -> Vec<bool> {
        let left = self.left_vertex_count;
        self.nearest_vertex
            .iter()
            .map(|&v| (v < left) == (hemisphere == Hemisphere::Left))
            .collect()
    }

    /// Voxels strictly closer than `max_distance` to the surface.
    #[must_use]
    pub fn cortical_mask(&self, max_distance: f64) -> Vec<bool> {
        self.distance.iter().map(|&d| d < max_distance).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cortex_types::{Matrix4, Point3};

    fn point_surface(points: &[[f64; 3]]) -> Surface {
        Surface::from_parts(
            points.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn distances_follow_inverse_transform() {
        // Surface-to-voxel transform scales by 2, so voxel i sits at x = i / 2.
        let xfm = Matrix4::new_scaling(2.0);
        let grid = VoxelGrid::new([1, 1, 5], xfm).unwrap();
        let left = point_surface(&[[0.0, 0.0, 0.0]]);
        let right = point_surface(&[[2.0, 0.0, 0.0]]);

        let field = compute_distance_field(&grid, &HemispherePair::new(left, right)).unwrap();

        let d = field.distance().as_slice();
        assert_relative_eq!(d[0], 0.0);
        assert_relative_eq!(d[1], 0.5);
        assert_relative_eq!(d[3], 0.5);
        assert_relative_eq!(d[4], 0.0);
        assert_eq!(field.nearest_vertex().as_slice()[4], 1);
    }

    #[test]
    fn hemisphere_masks_partition_voxels() {
        let grid = VoxelGrid::new([1, 2, 6], Matrix4::identity()).unwrap();
        let left = point_surface(&[[0.0, 0.0, 0.0], [1.0, 1.0, 0.0]]);
        let right = point_surface(&[[5.0, 0.0, 0.0]]);
        let field = compute_distance_field(&grid, &HemispherePair::new(left, right)).unwrap();

        let lh = field.hemisphere_mask(Hemisphere::Left);
        let rh = field.hemisphere_mask(Hemisphere::Right);
        assert_eq!(lh.len(), 12);
        assert!(lh.iter().zip(&rh).all(|(a, b)| a != b));
        assert_eq!(field.hemisphere_of_voxel(0), Some(Hemisphere::Left));
        assert_eq!(field.hemisphere_of_voxel(5), Some(Hemisphere::Right));
        assert_eq!(field.hemisphere_of_voxel(99), None);
    }

    #[test]
    fn cortical_mask_is_strict() {
        let grid = VoxelGrid::new([1, 1, 4], Matrix4::identity()).unwrap();
        let left = point_surface(&[[0.0, 0.0, 0.0]]);
        let right = point_surface(&[[0.0, 0.0, 100.0]]);
        let field = compute_distance_field(&grid, &HemispherePair::new(left, right)).unwrap();

        // Distances are 0, 1, 2, 3
        assert_eq!(field.cortical_mask(2.0), vec![true, true, false, false]);
    }

    #[test]
    fn shape_matches_grid() {
        let grid = VoxelGrid::new([2, 3, 4], Matrix4::identity()).unwrap();
        let left = point_surface(&[[0.0, 0.0, 0.0]]);
        let field =
            compute_distance_field(&grid, &HemispherePair::new(left, Surface::new())).unwrap();
        assert_eq!(field.shape(), [2, 3, 4]);
        assert_eq!(field.voxel_count(), 24);
        assert_eq!(field.vertex_count(), 1);
    }

    #[test]
    fn flat_sheet_and_line_match_brute_force() {
        // Left: 40 x 40 sheet at z = 0. Right: 40 collinear vertices.
        let sheet: Vec<Point3<f64>> = (0..1600)
            .map(|k| Point3::new(f64::from(k / 40), f64::from(k % 40), 0.0))
            .collect();
        let line: Vec<Point3<f64>> = (0..40)
            .map(|i| Point3::new(45.0, f64::from(i), 3.0))
            .collect();
        let fiducial = HemispherePair::new(
            Surface::from_parts(sheet, Vec::new()),
            Surface::from_parts(line, Vec::new()),
        );

        // Voxels every 4 units, offset so they fall between vertices.
        let xfm = Matrix4::new_scaling(0.25)
            * Matrix4::new_translation(&cortex_types::Vector3::new(1.5, 1.5, 2.0));
        let grid = VoxelGrid::new([3, 11, 13], xfm).unwrap();
        let field = compute_distance_field(&grid, &fiducial).unwrap();
        let merged = Surface::merge(&fiducial.left, &fiducial.right);

        for (voxel, center) in grid.voxel_centers().iter().enumerate() {
            let best = merged
                .vertices
                .iter()
                .map(|v| (v - center).norm())
                .fold(f64::INFINITY, f64::min);
            assert_relative_eq!(field.distance().as_slice()[voxel], best, epsilon = 1e-9);
            let nearest = field.nearest_vertex().as_slice()[voxel];
            assert_relative_eq!((merged.vertices[nearest] - center).norm(), best, epsilon = 1e-9);
        }
        assert!(field.hemisphere_mask(Hemisphere::Right).iter().any(|&b| b));
    }
}
