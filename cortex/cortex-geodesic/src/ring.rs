//! Breadth-first n-ring neighbourhoods.

use crate::adjacency::SurfaceGraph;

/// Reusable scratch space for collecting n-ring neighbourhoods.
///
/// Expansion is iterative with an explicit frontier and a generation-stamped
/// visited set, so collecting rings for every vertex of a large surface does
/// neither recurse nor clear a full-size buffer per query.
///
/// # Example
///
/// ```
/// use cortex_geodesic::{RingWalker, SurfaceGraph};
///
/// // Strip of triangles: 0-1-2-3-4
/// let graph = SurfaceGraph::from_triangles(&[[0, 1, 2], [1, 2, 3], [2, 3, 4]], 5).unwrap();
/// let mut walker = RingWalker::new(graph.vertex_count());
///
/// let mut one_ring = walker.collect(&graph, 0, 1).to_vec();
/// one_ring.sort_unstable();
/// assert_eq!(one_ring, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct RingWalker {
    stamp: Vec<u32>,
    generation: u32,
    frontier: Vec<u32>,
    next: Vec<u32>,
    collected: Vec<usize>,
}

impl RingWalker {
    /// Create a walker for graphs with up to `vertex_count` vertices.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            stamp: vec![0; vertex_count],
            generation: 0,
            frontier: Vec::new(),
            next: Vec::new(),
            collected: Vec::new(),
        }
    }

    fn begin(&mut self, vertex_count: usize) {
        if self.stamp.len() < vertex_count {
            self.stamp.resize(vertex_count, 0);
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.stamp.fill(0);
            self.generation = 1;
        }
        self.frontier.clear();
        self.next.clear();
        self.collected.clear();
    }

    /// Collect every vertex within `hops` steps of `vertex`, itself included.
    ///
    /// An isolated vertex has an empty neighbourhood. The returned slice is
    /// in discovery order and is valid until the next call.
    #[allow(clippy::cast_possible_truncation)]
    pub fn collect(&mut self, graph: &SurfaceGraph, vertex: usize, hops: usize) -> &[usize] {
        self.begin(graph.vertex_count());

        if graph.is_isolated(vertex) {
            return &self.collected;
        }

        let generation = self.generation;
        self.stamp[vertex] = generation;
        self.collected.push(vertex);
        self.frontier.push(vertex as u32);

        for _ in 0..hops {
            if self.frontier.is_empty() {
                break;
            }
            for &v in &self.frontier {
                for &n in graph.neighbors(v as usize) {
                    let slot = &mut self.stamp[n as usize];
                    if *slot != generation {
                        *slot = generation;
                        self.collected.push(n as usize);
                        self.next.push(n);
                    }
                }
            }
            std::mem::swap(&mut self.frontier, &mut self.next);
            self.next.clear();
        }

        &self.collected
    }
}
