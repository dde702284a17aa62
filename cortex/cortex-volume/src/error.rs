//! Error types for voxel-space analyses.

use cortex_types::TypesError;
use thiserror::Error;

/// Result type for voxel-space operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur while building distance fields or ROI masks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VolumeError {
    /// Both hemispheres have no vertices to index.
    #[error("surface has no vertices")]
    EmptySurface,

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Merged index of the vertex.
        vertex: usize,
    },

    /// Too many distinct vertices share one coordinate of the index frame
    /// for the KD-tree to separate them.
    #[error("{shared} distinct vertices share one coordinate on index axis {axis}")]
    DegenerateVertexLayout {
        /// Axis of the index frame.
        axis: usize,
        /// Number of vertices sharing the coordinate.
        shared: usize,
    },

    /// A requested ROI is not in the store.
    #[error("ROI '{name}' not found")]
    RoiNotFound {
        /// The missing ROI name.
        name: String,
    },

    /// An ROI was requested twice, or stored twice.
    #[error("ROI '{name}' given more than once")]
    DuplicateRoi {
        /// The repeated ROI name.
        name: String,
    },

    /// An overlap policy string was not recognised.
    #[error("unsupported overlap policy '{policy}' (expected 'cut' or 'split')")]
    UnsupportedOverlapPolicy {
        /// The rejected policy.
        policy: String,
    },

    /// A vertex index is outside its index space.
    #[error("invalid vertex index {index} (index space has {vertex_count} vertices)")]
    InvalidVertexIndex {
        /// The invalid index.
        index: usize,
        /// Size of the index space.
        vertex_count: usize,
    },

    /// The valid-vertex list is not a sorted, unique subset of the full space.
    #[error("invalid vertex index map: {0}")]
    InvalidIndexMap(String),

    /// The index map and distance field describe different vertex spaces.
    #[error("index map covers {index_map} vertices but the distance field indexes {field}")]
    VertexSpaceMismatch {
        /// Full vertex count of the index map.
        index_map: usize,
        /// Vertex count indexed by the distance field.
        field: usize,
    },

    /// Surface or grid validation failed.
    #[error(transparent)]
    Types(#[from] TypesError),
}

impl VolumeError {
    /// Create an ROI-not-found error.
    #[must_use]
    pub fn roi_not_found(name: impl Into<String>) -> Self {
        Self::RoiNotFound { name: name.into() }
    }

    /// Create an invalid index map error.
    #[must_use]
    pub fn invalid_index_map(details: impl Into<String>) -> Self {
        Self::InvalidIndexMap(details.into())
    }
}
