// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for generator models.

use std::fmt;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Model error types.
#[derive(Debug)]
pub enum Error {
    /// Model configuration error (missing signals, length mismatch,
    /// unsupported cutoff, ill-defined drift)
    Config(String),
    /// Input validation error
    Validation(ValidationError),
    /// Linear algebra error
    Linalg(String),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Linalg(msg) => write!(f, "Linear algebra error: {}", msg),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(e: ndarray::ShapeError) -> Self {
        Error::Linalg(e.to_string())
    }
}

impl From<ndarray_linalg::error::LinalgError> for Error {
    fn from(e: ndarray_linalg::error::LinalgError) -> Self {
        Error::Linalg(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Validation errors.
#[derive(Debug)]
pub enum ValidationError {
    /// Field validation failed
    Field { field: String, message: String },
    /// Array shape does not match what the operation requires
    Shape {
        what: String,
        expected: String,
        actual: String,
    },
    /// Operator expected to be anti-Hermitian (largest deviation attached)
    NotAntiHermitian(f64),
    /// Operator expected to be Hermitian (largest deviation attached)
    NotHermitian(f64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Field { field, message } => {
                write!(f, "Field '{}': {}", field, message)
            }
            ValidationError::Shape {
                what,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Shape mismatch for {}: expected {}, got {}",
                    what, expected, actual
                )
            }
            ValidationError::NotAntiHermitian(dev) => {
                write!(f, "Operator is not anti-Hermitian (max |A† + A| = {:.3e})", dev)
            }
            ValidationError::NotHermitian(dev) => {
                write!(f, "Operator is not Hermitian (max |A† - A| = {:.3e})", dev)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
