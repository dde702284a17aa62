//! Error types for flatmap distortion.

use cortex_geodesic::GeodesicError;
use cortex_types::TypesError;
use thiserror::Error;

/// Result type for distortion operations.
pub type DistortionResult<T> = Result<T, DistortionError>;

/// Errors that can occur while measuring flatmap distortion.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DistortionError {
    /// A distortion kind string was not recognised.
    #[error("unsupported distortion kind '{kind}' (expected 'areal' or 'metric')")]
    UnsupportedKind {
        /// The rejected kind.
        kind: String,
    },

    /// Building the flat surface graph failed.
    #[error(transparent)]
    Geodesic(#[from] GeodesicError),

    /// Surface validation failed.
    #[error(transparent)]
    Surface(#[from] TypesError),
}
