//! Error types for Tissot indicatrix sampling.

use cortex_geodesic::GeodesicError;
use thiserror::Error;

/// Result type for Tissot sampling.
pub type TissotResult<T> = Result<T, TissotError>;

/// Errors that can occur while sampling geodesic discs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TissotError {
    /// Sampling parameters are out of range.
    #[error("invalid Tissot parameters: {0}")]
    InvalidParams(String),

    /// Building the surface graph or a path search failed.
    #[error(transparent)]
    Geodesic(#[from] GeodesicError),
}
