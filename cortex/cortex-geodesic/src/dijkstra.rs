//! Dijkstra's algorithm over the surface graph.
//!
//! Edge weights are Euclidean distances between vertex positions, so path
//! lengths are in world units rather than hop counts.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use cortex_types::Point3;
use hashbrown::HashMap;

use crate::adjacency::SurfaceGraph;
use crate::error::{GeodesicError, GeodesicResult};
use crate::tree::{Reached, ShortestPathTree};

/// Geodesic distance solver using Dijkstra's algorithm.
///
/// Computes shortest-path distances along surface edges from a source
/// vertex, optionally bounded by a distance cutoff.
///
/// # Performance
///
/// Time complexity: O((V + E) log V) for V reached vertices and E edges.
///
/// # Example
///
/// ```
/// use cortex_geodesic::{GeodesicSolver, SurfaceGraph};
/// use cortex_types::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let graph = SurfaceGraph::from_triangles(&[[0, 1, 2]], 3).unwrap();
///
/// let solver = GeodesicSolver::new(&graph, &positions).unwrap();
/// let tree = solver.shortest_paths(0, f64::INFINITY).unwrap();
///
/// assert!((tree.distance(1).unwrap() - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeodesicSolver<'a> {
    graph: &'a SurfaceGraph,
    positions: &'a [Point3<f64>],
}

/// State for the priority queue in Dijkstra's algorithm.
#[derive(Debug, Clone, Copy)]
struct State {
    /// Current vertex.
    vertex: u32,
    /// Distance from the source to this vertex.
    distance: f64,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex && (self.distance - other.distance).abs() < f64::EPSILON
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
    }
}

impl<'a> GeodesicSolver<'a> {
    /// Create a solver over a graph and the positions of its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesicError::PositionCountMismatch`] if `positions` does
    /// not have one entry per graph vertex.
    pub fn new(graph: &'a SurfaceGraph, positions: &'a [Point3<f64>]) -> GeodesicResult<Self> {
        if graph.vertex_count() != positions.len() {
            return Err(GeodesicError::PositionCountMismatch {
                graph: graph.vertex_count(),
                positions: positions.len(),
            });
        }
        Ok(Self { graph, positions })
    }

    /// The graph being searched.
    #[must_use]
    pub const fn graph(&self) -> &'a SurfaceGraph {
        self.graph
    }

    /// Vertex positions used for edge weights.
    #[must_use]
    pub const fn positions(&self) -> &'a [Point3<f64>] {
        self.positions
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Shortest paths from `source` to every vertex within `cutoff`.
    ///
    /// Vertices whose path length exceeds `cutoff` are not reached. Pass
    /// `f64::INFINITY` for an unbounded search.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesicError::InvalidVertex`] if `source` is out of range.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex indices are u32, surfaces with >4B vertices unsupported
    pub fn shortest_paths(&self, source: usize, cutoff: f64) -> GeodesicResult<ShortestPathTree> {
        let vertex_count = self.graph.vertex_count();
        if source >= vertex_count {
            return Err(GeodesicError::InvalidVertex {
                index: source,
                vertex_count,
            });
        }

        let mut best: HashMap<u32, Reached> = HashMap::new();
        let mut settled: HashMap<u32, Reached> = HashMap::new();
        let mut heap = BinaryHeap::new();

        let start = Reached {
            distance: 0.0,
            predecessor: source as u32,
        };
        best.insert(source as u32, start);
        heap.push(State {
            vertex: source as u32,
            distance: 0.0,
        });

        while let Some(State { vertex, distance }) = heap.pop() {
            if settled.contains_key(&vertex) {
                continue;
            }
            let Some(&entry) = best.get(&vertex) else {
                continue;
            };
            // Skip stale heap entries
            if distance > entry.distance {
                continue;
            }
            settled.insert(vertex, entry);

            let origin = &self.positions[vertex as usize];
            for &neighbor in self.graph.neighbors(vertex as usize) {
                if settled.contains_key(&neighbor) {
                    continue;
                }
                let new_distance = distance + (self.positions[neighbor as usize] - origin).norm();
                if new_distance > cutoff {
                    continue;
                }
                let improves = best
                    .get(&neighbor)
                    .map_or(true, |r| new_distance < r.distance);
                if improves {
                    best.insert(
                        neighbor,
                        Reached {
                            distance: new_distance,
                            predecessor: vertex,
                        },
                    );
                    heap.push(State {
                        vertex: neighbor,
                        distance: new_distance,
                    });
                }
            }
        }

        Ok(ShortestPathTree::new(source, settled))
    }

    /// Full per-vertex distance array from `source`; unreachable vertices
    /// get `f64::INFINITY`.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesicError::InvalidVertex`] if `source` is out of range.
    pub fn distances_from(&self, source: usize) -> GeodesicResult<Vec<f64>> {
        let tree = self.shortest_paths(source, f64::INFINITY)?;
        let mut distances = vec![f64::INFINITY; self.vertex_count()];
        for (v, d) in tree.iter() {
            distances[v] = d;
        }
        Ok(distances)
    }
}
