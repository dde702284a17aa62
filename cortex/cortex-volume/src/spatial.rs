//! Nearest-vertex queries over both hemispheres.

use cortex_types::{Hemisphere, HemispherePair, Point3, Surface};
use hashbrown::{HashMap, HashSet};
use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use nalgebra::Rotation3;
use tracing::debug;

use crate::error::{VolumeError, VolumeResult};

/// Leaf capacity of the KD-tree. A leaf whose points all share one value on
/// its split axis cannot be split, so fewer than this many distinct points
/// may share a coordinate on any index axis.
const BUCKET_SIZE: usize = 32;

type VertexTree = KdTree<f64, u64, 3, BUCKET_SIZE, u32>;

/// Rotation from surface space into the frame the KD-tree is built in.
///
/// The index axes are oblique to the surface axes, so sheets and lines of
/// vertices aligned with the surface axes spread out along every index axis.
fn index_frame() -> Rotation3<f64> {
    Rotation3::from_euler_angles(0.613, 1.137, 0.389)
}

/// Bit pattern of a coordinate with `-0.0` folded into `0.0`.
#[inline]
fn coordinate_key(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// Result of a nearest-vertex query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestVertex {
    /// Euclidean distance to the vertex.
    pub distance: f64,
    /// Vertex index in the merged "left, then right" index space.
    pub vertex: usize,
}

/// KD-tree over the fiducial vertices of both hemispheres.
///
/// Vertices are indexed in merged order: left hemisphere first, then right,
/// so a vertex index below [`SurfaceIndex::left_vertex_count`] is on the
/// left hemisphere. Coincident vertices are stored once, under the lowest
/// index among them, so queries near them report that index.
#[derive(Debug, Clone)]
pub struct SurfaceIndex {
    tree: VertexTree,
    frame: Rotation3<f64>,
    positions: Vec<Point3<f64>>,
    left_count: usize,
}

impl SurfaceIndex {
    /// Index the fiducial vertices of both hemispheres.
    ///
    /// # Errors
    ///
    /// See [`SurfaceIndex::from_points`].
    pub fn new(fiducial: &HemispherePair<Surface>) -> VolumeResult<Self> {
        let points = fiducial
            .left
            .vertices
            .iter()
            .chain(fiducial.right.vertices.iter());
        Self::from_points(points, fiducial.left.vertex_count())
    }

    /// Index arbitrary points; the first `left_count` belong to the left
    /// hemisphere.
    ///
    /// # Errors
    ///
    /// - [`VolumeError::EmptySurface`] if `points` is empty.
    /// - [`VolumeError::NonFiniteVertex`] if a coordinate is NaN or infinite.
    /// - [`VolumeError::DegenerateVertexLayout`] if too many distinct points
    ///   share one coordinate of the index frame.
    pub fn from_points<'a>(
        points: impl IntoIterator<Item = &'a Point3<f64>>,
        left_count: usize,
    ) -> VolumeResult<Self> {
        let positions: Vec<Point3<f64>> = points.into_iter().copied().collect();
        if positions.is_empty() {
            return Err(VolumeError::EmptySurface);
        }
        if let Some(vertex) = positions
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(VolumeError::NonFiniteVertex { vertex });
        }

        let frame = index_frame();
        let mut seen = HashSet::with_capacity(positions.len());
        let mut framed = Vec::with_capacity(positions.len());
        for (vertex, p) in positions.iter().enumerate() {
            if seen.insert([p.x, p.y, p.z].map(coordinate_key)) {
                let q = frame * p;
                framed.push((vertex, [q.x, q.y, q.z]));
            }
        }
        let merged = positions.len() - framed.len();
        if merged > 0 {
            debug!(merged, "Merged coincident vertices in the surface index");
        }

        for axis in 0..3 {
            let mut counts: HashMap<u64, usize> = HashMap::new();
            for (_, q) in &framed {
                *counts.entry(coordinate_key(q[axis])).or_insert(0) += 1;
            }
            let shared = counts.values().copied().max().unwrap_or(0);
            if shared >= BUCKET_SIZE {
                return Err(VolumeError::DegenerateVertexLayout { axis, shared });
            }
        }

        let mut tree: VertexTree = KdTree::new();
        for (vertex, q) in &framed {
            tree.add(q, *vertex as u64);
        }

        Ok(Self {
            tree,
            frame,
            positions,
            left_count,
        })
    }

    /// Closest indexed vertex to `point`.
    ///
    /// The distance is measured from `point` to the stored vertex position.
    #[must_use]
    pub fn nearest(&self, point: &Point3<f64>) -> NearestVertex {
        let q = self.frame * point;
        let nearest = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[q.x, q.y, q.z]);
        #[allow(clippy::cast_possible_truncation)]
        let vertex = nearest.item as usize;
        NearestVertex {
            distance: (self.positions[vertex] - point).norm(),
            vertex,
        }
    }

    /// Hemisphere owning a merged vertex index.
    #[inline]
    #[must_use]
    pub const fn hemisphere_of(&self, vertex: usize) -> Hemisphere {
        if vertex < self.left_count {
            Hemisphere::Left
        } else {
            Hemisphere::Right
        }
    }

    /// Number of left-hemisphere vertices.
    #[inline]
    #[must_use]
    pub const fn left_vertex_count(&self) -> usize {
        self.left_count
    }

    /// Total number of indexed vertices, coincident ones included.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
