// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! States and operators that generators act on.
//!
//! ODE solvers evolve either a state vector `y` (shape `n`) or a matrix of
//! stacked states / a propagator (shape `n × m`). Both are `Operand`s.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{Result, ValidationError};

/// Something a square `n × n` matrix can multiply from the left or right.
pub trait Operand: Sized + Clone {
    /// Length of the axis contracted by a left multiplication.
    fn leading_dim(&self) -> usize;

    /// Length of the axis contracted by a right multiplication.
    fn trailing_dim(&self) -> usize;

    /// `m @ self`
    fn left_mul(&self, m: &Array2<Complex64>) -> Result<Self>;

    /// `self @ m`
    fn right_mul(&self, m: &Array2<Complex64>) -> Result<Self>;

    /// Multiply row `i` (entry `i` for vectors) by `factors[i]`.
    fn scale_rows(&mut self, factors: &Array1<Complex64>);
}

fn check(what: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ValidationError::Shape {
            what: what.into(),
            expected: format!("contracted dimension {}", expected),
            actual: format!("{}", actual),
        }
        .into());
    }
    Ok(())
}

impl Operand for Array1<Complex64> {
    fn leading_dim(&self) -> usize {
        self.len()
    }

    fn trailing_dim(&self) -> usize {
        self.len()
    }

    fn left_mul(&self, m: &Array2<Complex64>) -> Result<Self> {
        check("left multiplication", m.ncols(), self.len())?;
        Ok(m.dot(self))
    }

    fn right_mul(&self, m: &Array2<Complex64>) -> Result<Self> {
        check("right multiplication", m.nrows(), self.len())?;
        Ok(self.dot(m))
    }

    fn scale_rows(&mut self, factors: &Array1<Complex64>) {
        *self *= factors;
    }
}

impl Operand for Array2<Complex64> {
    fn leading_dim(&self) -> usize {
        self.nrows()
    }

    fn trailing_dim(&self) -> usize {
        self.ncols()
    }

    fn left_mul(&self, m: &Array2<Complex64>) -> Result<Self> {
        check("left multiplication", m.ncols(), self.nrows())?;
        Ok(m.dot(self))
    }

    fn right_mul(&self, m: &Array2<Complex64>) -> Result<Self> {
        check("right multiplication", m.nrows(), self.ncols())?;
        Ok(self.dot(m))
    }

    fn scale_rows(&mut self, factors: &Array1<Complex64>) {
        for (mut row, f) in self.rows_mut().into_iter().zip(factors.iter()) {
            row *= *f;
        }
    }
}
