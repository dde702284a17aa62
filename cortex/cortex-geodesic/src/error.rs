//! Error types for graph construction and geodesic search.

use cortex_types::TypesError;
use thiserror::Error;

/// Result type for geodesic operations.
pub type GeodesicResult<T> = Result<T, GeodesicError>;

/// Errors that can occur while building graphs or searching paths.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeodesicError {
    /// Invalid vertex index.
    #[error("invalid vertex index: {index} (graph has {vertex_count} vertices)")]
    InvalidVertex {
        /// The invalid index.
        index: usize,
        /// Total number of vertices in the graph.
        vertex_count: usize,
    },

    /// Positions do not cover the graph's vertices.
    #[error("graph has {graph} vertices but {positions} positions were supplied")]
    PositionCountMismatch {
        /// Graph vertex count.
        graph: usize,
        /// Number of positions supplied.
        positions: usize,
    },

    /// The source surface failed validation.
    #[error(transparent)]
    Surface(#[from] TypesError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeodesicError::InvalidVertex {
            index: 9,
            vertex_count: 4,
        };
        assert!(format!("{err}").contains("invalid vertex index: 9"));

        let err = GeodesicError::PositionCountMismatch {
            graph: 4,
            positions: 3,
        };
        assert!(format!("{err}").contains("3 positions"));
    }
}
