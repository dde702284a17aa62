//! Triangulated cortical surfaces.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};

/// One hemisphere's triangulated surface.
///
/// Vertices are world-space positions (millimetres for fiducial surfaces,
/// flattened coordinates with `z = 0` for flat surfaces). Triangles index
/// into `vertices`.
///
/// # Example
///
/// ```
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
///
/// assert_eq!(surface.vertex_count(), 3);
/// assert!(surface.validate().is_ok());
/// assert!((surface.triangle_area([0, 1, 2]) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Surface {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangles as indices into `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

impl Surface {
    /// Create an empty surface.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a surface from vertex positions and triangles.
    ///
    /// No validation is performed; call [`Surface::validate`] before
    /// trusting the triangle indices.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Create a validated surface from flat coordinate and index buffers.
    ///
    /// # Arguments
    ///
    /// * `positions` - `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `indices` - `[a0, b0, c0, a1, b1, c1, ...]`
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidBuffer`] if either buffer length is not a
    /// multiple of three, or [`TypesError::VertexIndexOutOfRange`] if an index
    /// is out of range.
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> TypesResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(TypesError::invalid_buffer(format!(
                "{} coordinates is not a multiple of 3",
                positions.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(TypesError::invalid_buffer(format!(
                "{} indices is not a multiple of 3",
                indices.len()
            )));
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let triangles = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        let surface = Self::from_parts(vertices, triangles);
        surface.validate()?;
        Ok(surface)
    }

    /// Concatenate two hemispheres into one surface.
    ///
    /// The right hemisphere's vertices follow the left hemisphere's, and its
    /// triangle indices are shifted by the left vertex count, so the merged
    /// index space is "left, then right".
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: surface indices are u32, larger surfaces are unsupported
    pub fn merge(left: &Self, right: &Self) -> Self {
        let offset = left.vertices.len() as u32;

        let mut vertices = Vec::with_capacity(left.vertices.len() + right.vertices.len());
        vertices.extend_from_slice(&left.vertices);
        vertices.extend_from_slice(&right.vertices);

        let mut triangles = Vec::with_capacity(left.triangles.len() + right.triangles.len());
        triangles.extend_from_slice(&left.triangles);
        triangles.extend(
            right
                .triangles
                .iter()
                .map(|&[a, b, c]| [a + offset, b + offset, c + offset]),
        );

        Self {
            vertices,
            triangles,
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the surface has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check that every triangle index refers to an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::VertexIndexOutOfRange`] for the first bad index.
    pub fn validate(&self) -> TypesResult<()> {
        let vertex_count = self.vertices.len();
        for (triangle, tri) in self.triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(TypesError::VertexIndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Euclidean distance between two vertices.
    #[inline]
    #[must_use]
    pub fn edge_length(&self, a: usize, b: usize) -> f64 {
        (self.vertices[a] - self.vertices[b]).norm()
    }

    /// Area of a triangle given by vertex indices of this surface.
    ///
    /// Half the magnitude of the cross product of two edge vectors. Zero for
    /// degenerate triangles.
    #[inline]
    #[must_use]
    pub fn triangle_area(&self, [a, b, c]: [u32; 3]) -> f64 {
        let pa = &self.vertices[a as usize];
        let pb = &self.vertices[b as usize];
        let pc = &self.vertices[c as usize];
        (pa - pb).cross(&(pa - pc)).norm() / 2.0
    }

    /// Sorted, de-duplicated indices of vertices used by at least one triangle.
    ///
    /// On a flat surface these are the vertices that have a flattened
    /// placement; medial-wall vertices are left out.
    #[must_use]
    pub fn referenced_vertices(&self) -> Vec<usize> {
        let mut used = vec![false; self.vertices.len()];
        for tri in &self.triangles {
            for &i in tri {
                if let Some(slot) = used.get_mut(i as usize) {
                    *slot = true;
                }
            }
        }
        used.iter()
            .enumerate()
            .filter_map(|(i, &u)| u.then_some(i))
            .collect()
    }
}

/// Fiducial and flat surfaces of the same hemisphere.
///
/// Both surfaces share vertex indexing one-to-one. The flat surface's
/// triangle list may omit the medial wall.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfacePair {
    fiducial: Surface,
    flat: Surface,
}

impl SurfacePair {
    /// Pair a fiducial surface with its flattened counterpart.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::VertexCountMismatch`] if the surfaces disagree on
    /// vertex count, or [`TypesError::VertexIndexOutOfRange`] if either
    /// surface has an invalid triangle.
    pub fn new(fiducial: Surface, flat: Surface) -> TypesResult<Self> {
        if fiducial.vertex_count() != flat.vertex_count() {
            return Err(TypesError::VertexCountMismatch {
                fiducial: fiducial.vertex_count(),
                flat: flat.vertex_count(),
            });
        }
        fiducial.validate()?;
        flat.validate()?;
        Ok(Self { fiducial, flat })
    }

    /// The anatomically accurate 3-D surface.
    #[inline]
    #[must_use]
    pub const fn fiducial(&self) -> &Surface {
        &self.fiducial
    }

    /// The flattened surface.
    #[inline]
    #[must_use]
    pub const fn flat(&self) -> &Surface {
        &self.flat
    }

    /// Shared vertex count.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.fiducial.vertex_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn triangle() -> Surface {
        Surface::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn from_raw_builds_surface() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let surface = Surface::from_raw(&positions, &[0, 1, 2]).unwrap();
        assert_eq!(surface.vertex_count(), 3);
        assert_eq!(surface.triangle_count(), 1);
    }

    #[test]
    fn from_raw_rejects_ragged_buffers() {
        assert!(matches!(
            Surface::from_raw(&[0.0, 1.0], &[]),
            Err(TypesError::InvalidBuffer(_))
        ));
        assert!(matches!(
            Surface::from_raw(&[0.0; 9], &[0, 1]),
            Err(TypesError::InvalidBuffer(_))
        ));
    }

    #[test]
    fn validate_catches_bad_index() {
        let mut surface = triangle();
        surface.triangles.push([0, 1, 7]);
        let err = surface.validate().unwrap_err();
        assert!(matches!(
            err,
            TypesError::VertexIndexOutOfRange {
                triangle: 1,
                index: 7,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn area_and_edges() {
        let surface = triangle();
        assert!((surface.triangle_area([0, 1, 2]) - 6.0).abs() < 1e-12);
        assert!((surface.edge_length(1, 2) - 5.0).abs() < 1e-12);
        assert!(surface.triangle_area([0, 0, 1]).abs() < 1e-12);
    }

    #[test]
    fn merge_shifts_right_indices() {
        let left = triangle();
        let right = triangle();
        let merged = Surface::merge(&left, &right);

        assert_eq!(merged.vertex_count(), 6);
        assert_eq!(merged.triangles, vec![[0, 1, 2], [3, 4, 5]]);
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn referenced_vertices_skip_unused() {
        let mut surface = triangle();
        surface.vertices.push(Point3::new(9.0, 9.0, 0.0));
        assert_eq!(surface.referenced_vertices(), vec![0, 1, 2]);
    }

    #[test]
    fn pair_requires_matching_counts() {
        let fiducial = triangle();
        let mut flat = triangle();
        flat.vertices.pop();
        flat.triangles.clear();

        let err = SurfacePair::new(fiducial, flat).unwrap_err();
        assert!(matches!(
            err,
            TypesError::VertexCountMismatch {
                fiducial: 3,
                flat: 2
            }
        ));
    }

    #[test]
    fn pair_validates_triangles() {
        let fiducial = triangle();
        let mut flat = triangle();
        flat.triangles = vec![[0, 1, 3]];
        assert!(SurfacePair::new(fiducial, flat).is_err());
    }
}
