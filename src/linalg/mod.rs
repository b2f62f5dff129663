// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dense complex linear algebra used by frames and models.
//!
//! Everything here operates on `ndarray` arrays of `Complex64`. Hermitian
//! eigendecomposition is delegated to `ndarray-linalg` at its call site.

pub mod operand;

pub use operand::Operand;

use ndarray::{Array2, Array3, ArrayView2, Axis};
use num_complex::Complex64;

use crate::error::{Result, ValidationError};

/// Conjugate transpose (dagger) of a matrix.
pub fn dagger(m: &ArrayView2<'_, Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

/// Complex identity matrix of dimension `n`.
pub fn identity(n: usize) -> Array2<Complex64> {
    Array2::from_diag_elem(n, Complex64::new(1.0, 0.0))
}

/// Kronecker product A ⊗ B.
pub fn kron(a: &ArrayView2<'_, Complex64>, b: &ArrayView2<'_, Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    let mut out = Array2::zeros((ar * br, ac * bc));
    for ((i, j), &aij) in a.indexed_iter() {
        if aij == Complex64::new(0.0, 0.0) {
            continue;
        }
        out.slice_mut(ndarray::s![i * br..(i + 1) * br, j * bc..(j + 1) * bc])
            .assign(&b.mapv(|z| aij * z));
    }
    out
}

/// Stack equally-shaped square matrices into a (k, n, n) array.
pub fn stack_operators(operators: &[Array2<Complex64>]) -> Result<Array3<Complex64>> {
    let Some(first) = operators.first() else {
        return Err(ValidationError::Field {
            field: "operators".into(),
            message: "at least one operator is required".into(),
        }
        .into());
    };
    let n = first.nrows();
    for op in operators {
        if op.dim() != (n, n) {
            return Err(ValidationError::Shape {
                what: "operator".into(),
                expected: format!("({}, {})", n, n),
                actual: format!("{:?}", op.dim()),
            }
            .into());
        }
    }
    let views: Vec<_> = operators.iter().map(|op| op.view()).collect();
    Ok(ndarray::stack(Axis(0), &views)?)
}

/// Largest entry of |A† − A| (zero for Hermitian A).
pub fn hermitian_deviation(m: &ArrayView2<'_, Complex64>) -> f64 {
    max_abs_entry(m, |a, b| a.conj() - b)
}

/// Largest entry of |A† + A| (zero for anti-Hermitian A).
pub fn anti_hermitian_deviation(m: &ArrayView2<'_, Complex64>) -> f64 {
    max_abs_entry(m, |a, b| a.conj() + b)
}

/// max_{i,j} |f(m[j,i], m[i,j])|
fn max_abs_entry<F>(m: &ArrayView2<'_, Complex64>, f: F) -> f64
where
    F: Fn(Complex64, Complex64) -> Complex64,
{
    let mut dev = 0.0f64;
    for ((i, j), &mij) in m.indexed_iter() {
        dev = dev.max(f(m[[j, i]], mij).norm());
    }
    dev
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_matrix_close, c, pauli_x, pauli_y, pauli_z};

    #[test]
    fn test_dagger() {
        let mut m = Array2::zeros((2, 2));
        m[[0, 1]] = Complex64::new(1.0, 2.0);
        m[[1, 0]] = Complex64::new(3.0, 4.0);
        let dag = dagger(&m.view());
        assert_eq!(dag[[0, 1]], Complex64::new(3.0, -4.0));
        assert_eq!(dag[[1, 0]], Complex64::new(1.0, -2.0));
    }

    #[test]
    fn test_kron_with_identity() {
        let x = pauli_x();
        let k = kron(&identity(2).view(), &x.view());
        // I ⊗ X is block diagonal with X blocks
        assert_matrix_close(&k.slice(ndarray::s![0..2, 0..2]).to_owned(), &x, 1e-15);
        assert_matrix_close(&k.slice(ndarray::s![2..4, 2..4]).to_owned(), &x, 1e-15);
        assert_eq!(k[[0, 2]], c(0.0, 0.0));
    }

    #[test]
    fn test_kron_mixed_product() {
        // (A⊗B)(C⊗D) = AC ⊗ BD
        let (x, y, z) = (pauli_x(), pauli_y(), pauli_z());
        let lhs = kron(&x.view(), &y.view()).dot(&kron(&z.view(), &x.view()));
        let rhs = kron(&x.dot(&z).view(), &y.dot(&x).view());
        assert_matrix_close(&lhs, &rhs, 1e-14);
    }

    #[test]
    fn test_stack_operators() {
        let ops = stack_operators(&[pauli_x(), pauli_z()]).unwrap();
        assert_eq!(ops.dim(), (2, 2, 2));
        assert_eq!(ops[[1, 1, 1]], c(-1.0, 0.0));
    }

    #[test]
    fn test_stack_operators_rejects_mixed_shapes() {
        let err = stack_operators(&[pauli_x(), identity(3)]).unwrap_err();
        assert!(err.to_string().contains("Shape mismatch"));
        assert!(stack_operators(&[]).is_err());
    }

    #[test]
    fn test_hermiticity_deviation() {
        assert_eq!(hermitian_deviation(&pauli_y().view()), 0.0);
        let anti = pauli_y().mapv(|z| z * c(0.0, 1.0));
        assert_eq!(anti_hermitian_deviation(&anti.view()), 0.0);
        assert!(hermitian_deviation(&anti.view()) > 1.0);
    }
}
