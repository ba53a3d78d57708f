//! # Error Types
//!
//! Structured error types for block_core. The two validation variants map
//! one-to-one onto the messages shown to the person filling in the form;
//! the remaining variants come from reading input and settings files.
//!
//! ## Example
//!
//! ```rust
//! use block_core::errors::{EstimateError, CalcResult};
//!
//! fn check_height(wall_height_m: f64) -> CalcResult<()> {
//!     if wall_height_m <= 0.0 {
//!         return Err(EstimateError::invalid_geometry(10.0, wall_height_m));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_height(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for block_core operations
pub type CalcResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// Perimeter or wall height is not positive
    #[error("Perimeter and wall height must be greater than 0.")]
    InvalidGeometry { perimeter_m: f64, wall_height_m: f64 },

    /// Block length or block height is not positive
    #[error("Block dimensions must be greater than 0.")]
    InvalidBlockSize { block_length_m: f64, block_height_m: f64 },

    /// A field violates a form constraint (negative, out of range, empty)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file written by an incompatible version
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EstimateError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(perimeter_m: f64, wall_height_m: f64) -> Self {
        EstimateError::InvalidGeometry {
            perimeter_m,
            wall_height_m,
        }
    }

    /// Create an InvalidBlockSize error
    pub fn invalid_block_size(block_length_m: f64, block_height_m: f64) -> Self {
        EstimateError::InvalidBlockSize {
            block_length_m,
            block_height_m,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for the two estimator validation failures.
    ///
    /// The user fixes these by correcting the form and resubmitting.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EstimateError::InvalidGeometry { .. } | EstimateError::InvalidBlockSize { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            EstimateError::InvalidBlockSize { .. } => "INVALID_BLOCK_SIZE",
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(err: serde_json::Error) -> Self {
        EstimateError::SerializationError {
            reason: err.to_string(),
        }
    }
}
