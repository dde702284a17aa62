//! Error types for surface and grid construction.

use thiserror::Error;

/// Result type for type-level validation.
pub type TypesResult<T> = Result<T, TypesError>;

/// Errors raised while building or validating surfaces and voxel grids.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TypesError {
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} (surface has {vertex_count} vertices)")]
    VertexIndexOutOfRange {
        /// Triangle position in the triangle list.
        triangle: usize,
        /// The offending vertex index.
        index: u32,
        /// Number of vertices in the surface.
        vertex_count: usize,
    },

    /// Fiducial and flat surfaces of one hemisphere disagree on vertex count.
    #[error("fiducial surface has {fiducial} vertices but flat surface has {flat}")]
    VertexCountMismatch {
        /// Fiducial vertex count.
        fiducial: usize,
        /// Flat vertex count.
        flat: usize,
    },

    /// Raw coordinate or index buffers could not be split into triples.
    #[error("invalid raw buffer: {0}")]
    InvalidBuffer(String),

    /// A grid shape has the wrong number of axes or mismatches its data.
    #[error("invalid grid shape: {0}")]
    InvalidShape(String),

    /// The voxel transform has no inverse.
    #[error("voxel transform is singular")]
    SingularTransform,
}

impl TypesError {
    /// Create an invalid shape error.
    #[must_use]
    pub fn invalid_shape(details: impl Into<String>) -> Self {
        Self::InvalidShape(details.into())
    }

    /// Create an invalid buffer error.
    #[must_use]
    pub fn invalid_buffer(details: impl Into<String>) -> Self {
        Self::InvalidBuffer(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TypesError::VertexIndexOutOfRange {
            triangle: 4,
            index: 12,
            vertex_count: 10,
        };
        let msg = format!("{err}");
        assert!(msg.contains("triangle 4"));
        assert!(msg.contains("vertex 12"));

        let err = TypesError::VertexCountMismatch {
            fiducial: 10,
            flat: 9,
        };
        assert!(format!("{err}").contains("flat surface has 9"));

        let err = TypesError::invalid_shape("expected 3 axes");
        assert!(format!("{err}").contains("expected 3 axes"));
    }
}
