//! Vertex adjacency derived from a triangle list.
//!
//! Every vertex is linked to the other two vertices of each triangle it
//! belongs to. For a triangle mesh this is the same as edge adjacency.

use cortex_types::{Surface, TypesError};

use crate::error::GeodesicResult;
use crate::ring::RingWalker;

/// Undirected vertex adjacency graph of a surface.
///
/// Built once per surface and shared by curvature smoothing, metric
/// distortion and geodesic search. Degenerate triangles may introduce
/// self-loops; they are kept.
#[derive(Debug, Clone, Default)]
pub struct SurfaceGraph {
    /// For each vertex, its distinct neighbours.
    neighbors: Vec<Vec<u32>>,
}

impl SurfaceGraph {
    /// Build the graph of a surface.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeodesicError::Surface`] if a triangle references a
    /// vertex outside the surface.
    pub fn from_surface(surface: &Surface) -> GeodesicResult<Self> {
        Self::from_triangles(&surface.triangles, surface.vertex_count())
    }

    /// Build a graph over `vertex_count` vertices from a triangle list.
    ///
    /// Vertices that appear in no triangle get an empty neighbour list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeodesicError::Surface`] if a triangle index is
    /// `>= vertex_count`.
    pub fn from_triangles(triangles: &[[u32; 3]], vertex_count: usize) -> GeodesicResult<Self> {
        let mut neighbors: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];

        for (triangle, &[i0, i1, i2]) in triangles.iter().enumerate() {
            if let Some(&index) = [i0, i1, i2].iter().find(|&&i| i as usize >= vertex_count) {
                return Err(TypesError::VertexIndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                }
                .into());
            }

            Self::add_edge(&mut neighbors, i0, i1);
            Self::add_edge(&mut neighbors, i1, i2);
            Self::add_edge(&mut neighbors, i2, i0);
        }

        Ok(Self { neighbors })
    }

    /// Add an edge in both directions unless already present.
    fn add_edge(neighbors: &mut [Vec<u32>], v0: u32, v1: u32) {
        if !neighbors[v0 as usize].contains(&v1) {
            neighbors[v0 as usize].push(v1);
        }
        if !neighbors[v1 as usize].contains(&v0) {
            neighbors[v1 as usize].push(v0);
        }
    }

    /// Number of vertices (including isolated ones).
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbours of a vertex; empty for isolated or out-of-range vertices.
    #[inline]
    #[must_use]
    pub fn neighbors(&self, vertex: usize) -> &[u32] {
        self.neighbors.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Number of neighbours of a vertex.
    #[inline]
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbors(vertex).len()
    }

    /// Whether the vertex belongs to no triangle.
    #[inline]
    #[must_use]
    pub fn is_isolated(&self, vertex: usize) -> bool {
        self.neighbors(vertex).is_empty()
    }

    /// Whether `a` and `b` share a triangle.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&(b as u32))
    }

    /// Whether the graph has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Number of undirected edges, counting each self-loop once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let mut twice = 0;
        let mut loops = 0;
        for (v, list) in self.neighbors.iter().enumerate() {
            for &n in list {
                if n as usize == v {
                    loops += 1;
                } else {
                    twice += 1;
                }
            }
        }
        twice / 2 + loops
    }

    /// Iterate over undirected edges `(a, b)` with `a <= b`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(a, list)| {
            list.iter()
                .map(|&b| b as usize)
                .filter(move |&b| a <= b)
                .map(move |b| (a, b))
        })
    }

    /// Whether every edge `a-b` is mirrored by `b-a`.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.neighbors.iter().enumerate().all(|(a, list)| {
            list.iter()
                .all(|&b| self.contains_edge(b as usize, a))
        })
    }

    /// Vertices within `hops` steps of `vertex`, including `vertex` itself.
    ///
    /// Empty when `vertex` is isolated. Use a [`RingWalker`] when collecting
    /// rings for many vertices.
    #[must_use]
    pub fn ring(&self, vertex: usize, hops: usize) -> Vec<usize> {
        let mut walker = RingWalker::new(self.vertex_count());
        walker.collect(self, vertex, hops).to_vec()
    }
}
