//! Shortest-path trees and path-length recovery.

use cortex_types::Point3;
use hashbrown::HashMap;

/// A vertex reached by a shortest-path search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reached {
    /// Path length from the source, in world units.
    pub distance: f64,
    /// Previous vertex on the shortest path; the source points to itself.
    pub predecessor: u32,
}

/// Result of a single-source shortest-path search.
///
/// Only vertices settled within the search cutoff are stored, so trees
/// from local searches on large surfaces stay small.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: usize,
    reached: HashMap<u32, Reached>,
}

impl ShortestPathTree {
    pub(crate) fn new(source: usize, reached: HashMap<u32, Reached>) -> Self {
        Self { source, reached }
    }

    /// The search source.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Number of reached vertices, including the source.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.reached.len()
    }

    /// Whether nothing was reached.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reached.is_empty()
    }

    /// Whether `vertex` was reached.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn contains(&self, vertex: usize) -> bool {
        self.reached.contains_key(&(vertex as u32))
    }

    /// Path length to `vertex` as computed by the search.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn distance(&self, vertex: usize) -> Option<f64> {
        self.reached.get(&(vertex as u32)).map(|r| r.distance)
    }

    /// Previous vertex on the path to `vertex`; `None` for the source and
    /// for unreached vertices.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn predecessor(&self, vertex: usize) -> Option<usize> {
        if vertex == self.source {
            return None;
        }
        self.reached
            .get(&(vertex as u32))
            .map(|r| r.predecessor as usize)
    }

    /// Iterate over `(vertex, distance)` for every reached vertex.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.reached
            .iter()
            .map(|(&v, r)| (v as usize, r.distance))
    }

    /// Vertex chain from the source to `vertex`, both ends included.
    #[must_use]
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        if !self.contains(vertex) {
            return None;
        }
        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(prev) = self.predecessor(current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Start recovering path lengths by summation along recovered paths.
    ///
    /// The returned helper memoises the length of every path prefix it
    /// walks. Prefixes are only shared between paths of this tree, so the
    /// memo lives exactly as long as the borrow of the tree.
    #[must_use]
    pub fn prefix_lengths<'a>(&'a self, positions: &'a [Point3<f64>]) -> PrefixLengths<'a> {
        PrefixLengths {
            tree: self,
            positions,
            memo: HashMap::new(),
        }
    }
}

/// Memoised path lengths along one [`ShortestPathTree`].
#[derive(Debug)]
pub struct PrefixLengths<'a> {
    tree: &'a ShortestPathTree,
    positions: &'a [Point3<f64>],
    memo: HashMap<usize, f64>,
}

impl PrefixLengths<'_> {
    /// Length of the tree path to `vertex`: the sum of Euclidean hop lengths.
    ///
    /// Walks predecessors until a memoised prefix (or the source) is found,
    /// then unwinds, recording every intermediate prefix length.
    #[must_use]
    pub fn length_to(&mut self, vertex: usize) -> Option<f64> {
        if !self.tree.contains(vertex) {
            return None;
        }
        if let Some(&len) = self.memo.get(&vertex) {
            return Some(len);
        }

        let mut pending = Vec::new();
        let mut current = vertex;
        let mut length = loop {
            if let Some(&len) = self.memo.get(&current) {
                break len;
            }
            match self.tree.predecessor(current) {
                Some(prev) => {
                    pending.push(current);
                    current = prev;
                }
                None => {
                    self.memo.insert(current, 0.0);
                    break 0.0;
                }
            }
        };

        let mut prev = current;
        while let Some(v) = pending.pop() {
            length += (self.positions[v] - self.positions[prev]).norm();
            self.memo.insert(v, length);
            prev = v;
        }

        Some(length)
    }

    /// Number of memoised prefixes.
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }
}
