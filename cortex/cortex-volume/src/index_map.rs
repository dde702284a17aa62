//! Translation between the valid-vertex and full-vertex index spaces.

use cortex_types::{HemispherePair, Surface};

use crate::error::{VolumeError, VolumeResult};

/// Bijection between valid-vertex indices and full merged vertex indices.
///
/// ROI definitions address only the vertices that survive on the flatmap
/// (the valid space). The distance field addresses every fiducial vertex of
/// both hemispheres (the full space). Valid index `i` maps to the `i`-th
/// smallest valid full index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexIndexMap {
    valid_to_full: Vec<usize>,
    full_to_valid: Vec<Option<usize>>,
}

impl VertexIndexMap {
    /// Build from the sorted list of valid full indices.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidIndexMap`] unless `valid` is strictly
    /// increasing with every entry below `full_count`.
    pub fn new(valid: Vec<usize>, full_count: usize) -> VolumeResult<Self> {
        if let Some(w) = valid.windows(2).find(|w| w[0] >= w[1]) {
            return Err(VolumeError::invalid_index_map(format!(
                "valid indices must be strictly increasing, found {} then {}",
                w[0], w[1]
            )));
        }
        if let Some(&last) = valid.last() {
            if last >= full_count {
                return Err(VolumeError::invalid_index_map(format!(
                    "valid index {last} outside {full_count} vertices"
                )));
            }
        }

        let mut full_to_valid = vec![None; full_count];
        for (i, &full) in valid.iter().enumerate() {
            full_to_valid[full] = Some(i);
        }
        Ok(Self {
            valid_to_full: valid,
            full_to_valid,
        })
    }

    /// Every full index is valid.
    #[must_use]
    pub fn identity(count: usize) -> Self {
        Self {
            valid_to_full: (0..count).collect(),
            full_to_valid: (0..count).map(Some).collect(),
        }
    }

    /// Valid vertices are those referenced by a triangle of either flat
    /// surface, in merged "left, then right" order.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::Types`] if a flat triangle references a vertex
    /// outside its surface.
    pub fn from_flat_surfaces(flat: &HemispherePair<Surface>) -> VolumeResult<Self> {
        flat.left.validate()?;
        flat.right.validate()?;
        let merged = Surface::merge(&flat.left, &flat.right);
        let full_count = merged.vertex_count();
        Self::new(merged.referenced_vertices(), full_count)
    }

    /// Number of valid vertices.
    #[inline]
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.valid_to_full.len()
    }

    /// Number of vertices in the full space.
    #[inline]
    #[must_use]
    pub fn full_count(&self) -> usize {
        self.full_to_valid.len()
    }

    /// Full index of valid vertex `valid`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidVertexIndex`] if `valid` is out of range.
    pub fn to_full(&self, valid: usize) -> VolumeResult<usize> {
        self.valid_to_full
            .get(valid)
            .copied()
            .ok_or(VolumeError::InvalidVertexIndex {
                index: valid,
                vertex_count: self.valid_count(),
            })
    }

    /// Valid index of full vertex `full`, if it is valid.
    #[must_use]
    pub fn to_valid(&self, full: usize) -> Option<usize> {
        self.full_to_valid.get(full).copied().flatten()
    }

    /// Full-space membership mask of a set of valid indices.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidVertexIndex`] for any index outside the
    /// valid space.
    pub fn full_mask(&self, valid: &[usize]) -> VolumeResult<Vec<bool>> {
        let mut mask = vec![false; self.full_count()];
        for &v in valid {
            mask[self.to_full(v)?] = true;
        }
        Ok(mask)
    }

    /// Valid full indices in ascending order.
    #[must_use]
    pub fn valid_indices(&self) -> &[usize] {
        &self.valid_to_full
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cortex_types::Point3;

    #[test]
    fn translation_both_ways() {
        let map = VertexIndexMap::new(vec![1, 4, 5], 7).unwrap();
        assert_eq!(map.valid_count(), 3);
        assert_eq!(map.full_count(), 7);
        assert_eq!(map.to_full(1).unwrap(), 4);
        assert_eq!(map.to_valid(5), Some(2));
        assert_eq!(map.to_valid(0), None);
        assert_eq!(map.to_valid(70), None);
        assert!(matches!(
            map.to_full(3),
            Err(VolumeError::InvalidVertexIndex { index: 3, vertex_count: 3 })
        ));
    }

    #[test]
    fn unsorted_or_out_of_range_rejected() {
        assert!(VertexIndexMap::new(vec![2, 1], 5).is_err());
        assert!(VertexIndexMap::new(vec![1, 1], 5).is_err());
        assert!(VertexIndexMap::new(vec![0, 5], 5).is_err());
    }

    #[test]
    fn full_mask_marks_members() {
        let map = VertexIndexMap::new(vec![0, 2, 3], 4).unwrap();
        assert_eq!(map.full_mask(&[1, 2]).unwrap(), vec![false, false, true, true]);
        assert!(map.full_mask(&[9]).is_err());
    }

    #[test]
    fn flat_surfaces_skip_unreferenced_vertices() {
        let tri = |n: usize, tris: Vec<[u32; 3]>| {
            Surface::from_parts(vec![Point3::origin(); n], tris)
        };
        // Left vertex 3 and right vertex 0 are cut from the flatmap.
        let flat = HemispherePair::new(tri(4, vec![[0, 1, 2]]), tri(4, vec![[1, 2, 3]]));
        let map = VertexIndexMap::from_flat_surfaces(&flat).unwrap();

        assert_eq!(map.full_count(), 8);
        assert_eq!(map.valid_indices(), &[0, 1, 2, 5, 6, 7]);
        assert_eq!(map.to_full(3).unwrap(), 5);
    }

    #[test]
    fn identity_map() {
        let map = VertexIndexMap::identity(3);
        assert_eq!(map.to_full(2).unwrap(), 2);
        assert_eq!(map.to_valid(1), Some(1));
    }
}
