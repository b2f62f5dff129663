// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities for model tests.

use ndarray::{array, Array1, Array2};
use num_complex::Complex64;

/// Shorthand complex constructor.
pub fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

pub fn pauli_x() -> Array2<Complex64> {
    array![[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]
}

pub fn pauli_y() -> Array2<Complex64> {
    array![[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]
}

pub fn pauli_z() -> Array2<Complex64> {
    array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]]
}

/// σ⁻ = |0⟩⟨1|
pub fn sigma_minus() -> Array2<Complex64> {
    array![[c(0.0, 0.0), c(1.0, 0.0)], [c(0.0, 0.0), c(0.0, 0.0)]]
}

/// ρ = |+⟩⟨+| = ½(I + σx)
pub fn plus_state() -> Array2<Complex64> {
    array![[c(0.5, 0.0), c(0.5, 0.0)], [c(0.5, 0.0), c(0.5, 0.0)]]
}

/// A non-trivial 2×2 matrix with no special structure.
pub fn generic_matrix() -> Array2<Complex64> {
    array![[c(0.3, -1.2), c(2.0, 0.5)], [c(-0.7, 0.1), c(1.1, 0.9)]]
}

pub fn generic_vector() -> Array1<Complex64> {
    array![c(0.6, 0.2), c(-0.4, 1.3)]
}

/// Check matrix equality within an absolute tolerance.
pub fn assert_matrix_close(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) {
    assert_eq!(a.shape(), b.shape());
    for ((i, j), val) in a.indexed_iter() {
        let diff = (val - b[[i, j]]).norm();
        assert!(
            diff < tol,
            "Mismatch at ({}, {}): {:?} vs {:?} (diff={})",
            i,
            j,
            val,
            b[[i, j]],
            diff
        );
    }
}

/// Check vector equality within an absolute tolerance.
pub fn assert_vector_close(a: &Array1<Complex64>, b: &Array1<Complex64>, tol: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (x - y).norm() < tol,
            "Mismatch at {}: {:?} vs {:?}",
            i,
            x,
            y
        );
    }
}
