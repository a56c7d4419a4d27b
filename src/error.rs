//! Error types of the spectral transform engine.
use thiserror::Error;

/// Errors that can occur while setting up or running a spherical transform.
#[derive(Error, Debug)]
pub enum SphereError {
    /// Truncation order outside of `[2, nlon / 2]`.
    #[error("invalid truncation {truncation}, must lie within [2, {max}]")]
    InvalidTruncation {
        /// Requested truncation
        truncation: usize,
        /// Largest admissible truncation (`nlon / 2`)
        max: usize,
    },

    /// A transform was requested before a truncation was chosen.
    #[error("truncation not set, choose one before transforming")]
    TruncationNotSet,

    /// Extents of the input do not match the engine.
    #[error("dimension mismatch in {axis}: got {found}, expected {expected}")]
    DimensionMismatch {
        /// Name of the offending axis
        axis: &'static str,
        /// Extent required by the engine
        expected: usize,
        /// Extent of the input
        found: usize,
    },

    /// Grid does not cover the whole sphere or is not periodic in longitude.
    #[error("grid is not a global domain: {0}")]
    NonGlobalDomain(String),

    /// Configuration value out of range.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// Reshaping of an intermediate array failed.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Worker pool could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SphereError {
    /// Create a NonGlobalDomain error.
    pub fn non_global(msg: impl Into<String>) -> Self {
        Self::NonGlobalDomain(msg.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a DimensionMismatch error.
    pub fn mismatch(axis: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            axis,
            expected,
            found,
        }
    }
}

/// Result type for spectral transform operations.
pub type Result<T> = std::result::Result<T, SphereError>;
