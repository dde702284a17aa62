//! Graph search over cortical surfaces.
//!
//! This crate provides the graph machinery shared by the surface analyses:
//!
//! - **Adjacency graph** - Vertices linked to every vertex they share a triangle with
//! - **n-ring neighbourhoods** - Breadth-first expansion by hop count
//! - **Dijkstra shortest paths** - Path lengths in world units with a distance cutoff
//! - **Path-length recovery** - Summation along recovered paths with prefix memoisation
//!
//! # Algorithm
//!
//! Shortest paths run Dijkstra's algorithm on the surface edge graph with
//! Euclidean edge weights. This gives exact distances **along edges**, an
//! approximation of the true geodesic that tightens with mesh density.
//!
//! # Example
//!
//! ```
//! use cortex_geodesic::{GeodesicSolver, SurfaceGraph};
//! use cortex_types::{Point3, Surface};
//!
//! let surface = Surface::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(2.0, 0.0, 0.0),
//!         Point3::new(0.5, 0.5, 0.0),
//!     ],
//!     vec![[0, 1, 3], [1, 2, 3]],
//! );
//!
//! let graph = SurfaceGraph::from_surface(&surface).unwrap();
//! assert!(graph.is_symmetric());
//!
//! let solver = GeodesicSolver::new(&graph, &surface.vertices).unwrap();
//! let tree = solver.shortest_paths(0, f64::INFINITY).unwrap();
//! assert!((tree.distance(2).unwrap() - 2.0).abs() < 1e-10);
//! assert_eq!(tree.path_to(2).unwrap(), vec![0, 1, 2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod dijkstra;
mod error;
mod ring;
mod tree;

pub use adjacency::SurfaceGraph;
pub use dijkstra::GeodesicSolver;
pub use error::{GeodesicError, GeodesicResult};
pub use ring::RingWalker;
pub use tree::{PrefixLengths, Reached, ShortestPathTree};
