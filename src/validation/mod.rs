// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for operators, frames, and model settings.

use ndarray::{Array3, ArrayView2};
use num_complex::Complex64;

use crate::error::{Error, Result, ValidationError};
use crate::linalg::{anti_hermitian_deviation, hermitian_deviation};

/// Validate that a matrix is square with dimension `dim` (any dimension if `None`).
pub fn validate_square(
    what: &str,
    m: &ArrayView2<'_, Complex64>,
    dim: Option<usize>,
) -> Result<()> {
    let (rows, cols) = m.dim();
    let expected = dim.unwrap_or(rows);
    if rows != cols || rows != expected {
        return Err(ValidationError::Shape {
            what: what.into(),
            expected: format!("({}, {})", expected, expected),
            actual: format!("({}, {})", rows, cols),
        }
        .into());
    }
    Ok(())
}

/// Validate an operator stack of shape (k, n, n).
pub fn validate_operator_stack(operators: &Array3<Complex64>) -> Result<()> {
    let (k, rows, cols) = operators.dim();
    if k == 0 {
        return Err(ValidationError::Field {
            field: "operators".into(),
            message: "at least one operator is required".into(),
        }
        .into());
    }
    if rows != cols {
        return Err(ValidationError::Shape {
            what: "operators".into(),
            expected: format!("({}, n, n)", k),
            actual: format!("({}, {}, {})", k, rows, cols),
        }
        .into());
    }
    Ok(())
}

/// Validate that a matrix is Hermitian to within `atol`.
pub fn validate_hermitian(m: &ArrayView2<'_, Complex64>, atol: f64) -> Result<()> {
    validate_square("Hermitian operator", m, None)?;
    let dev = hermitian_deviation(m);
    if dev > atol {
        return Err(ValidationError::NotHermitian(dev).into());
    }
    Ok(())
}

/// Validate that a matrix is anti-Hermitian to within `atol`.
pub fn validate_anti_hermitian(m: &ArrayView2<'_, Complex64>, atol: f64) -> Result<()> {
    validate_square("anti-Hermitian operator", m, None)?;
    let dev = anti_hermitian_deviation(m);
    if dev > atol {
        return Err(ValidationError::NotAntiHermitian(dev).into());
    }
    Ok(())
}

/// Validate a cutoff frequency: absent, or finite and non-negative.
pub fn validate_cutoff_freq(cutoff_freq: Option<f64>) -> Result<()> {
    match cutoff_freq {
        Some(freq) if !freq.is_finite() || freq < 0.0 => Err(Error::Config(format!(
            "cutoff_freq must be a finite non-negative number, got {}",
            freq
        ))),
        _ => Ok(()),
    }
}

/// Validate that a channel count matches the operator count.
pub fn validate_channel_count(what: &str, channels: usize, operators: usize) -> Result<()> {
    if channels != operators {
        return Err(Error::Config(format!(
            "{} has {} channels but the model has {} operators",
            what, channels, operators
        )));
    }
    Ok(())
}
