//! Error types for curvature estimation and smoothing.

use cortex_geodesic::GeodesicError;
use cortex_types::TypesError;
use thiserror::Error;

/// Result type for curvature operations.
pub type CurvatureResult<T> = Result<T, CurvatureError>;

/// Errors that can occur while estimating or smoothing curvature.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CurvatureError {
    /// Raw curvature does not have one value per vertex.
    #[error("curvature has {values} values but the surface has {vertices} vertices")]
    LengthMismatch {
        /// Number of curvature values.
        values: usize,
        /// Number of surface vertices.
        vertices: usize,
    },

    /// Smoothing parameters are out of range.
    #[error("invalid smoothing parameters: {0}")]
    InvalidParams(String),

    /// Building the surface graph failed.
    #[error(transparent)]
    Geodesic(#[from] GeodesicError),

    /// Surface validation failed.
    #[error(transparent)]
    Surface(#[from] TypesError),
}
