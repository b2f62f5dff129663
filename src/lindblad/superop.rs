// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Superoperators on column-stacked density matrices.
//!
//! With vec(ρ) stacking the columns of ρ, vec(A ρ B) = (Bᵀ ⊗ A) vec(ρ), so
//!
//!   vec([A, ρ])  = (I ⊗ A − Aᵀ ⊗ I) vec(ρ)
//!   vec(D[L](ρ)) = (L̄ ⊗ L − ½ (I ⊗ L†L + (L†L)ᵀ ⊗ I)) vec(ρ)

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{Result, ValidationError};
use crate::linalg::{dagger, identity, kron};

/// Superoperator of ρ ↦ [A, ρ].
pub fn vec_commutator(a: &Array2<Complex64>) -> Array2<Complex64> {
    let id = identity(a.nrows());
    kron(&id.view(), &a.view()) - kron(&a.t(), &id.view())
}

/// Superoperator of ρ ↦ L ρ L† − ½{L†L, ρ}.
pub fn vec_dissipator(l: &Array2<Complex64>) -> Array2<Complex64> {
    let id = identity(l.nrows());
    let l_dag_l = dagger(&l.view()).dot(l);
    let jump = kron(&l.mapv(|z| z.conj()).view(), &l.view());
    let anti = kron(&id.view(), &l_dag_l.view()) + kron(&l_dag_l.t(), &id.view());
    jump - anti * Complex64::new(0.5, 0.0)
}

/// Stack the columns of a matrix into a vector.
pub fn vectorize(rho: &Array2<Complex64>) -> Array1<Complex64> {
    rho.t().iter().copied().collect()
}

/// Inverse of [`vectorize`] for an n² vector.
pub fn unvectorize(v: &Array1<Complex64>) -> Result<Array2<Complex64>> {
    let n = (v.len() as f64).sqrt().round() as usize;
    if n * n != v.len() {
        return Err(ValidationError::Shape {
            what: "vectorized density matrix".into(),
            expected: "length n²".into(),
            actual: format!("{}", v.len()),
        }
        .into());
    }
    Ok(Array2::from_shape_fn((n, n), |(i, j)| v[j * n + i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lindblad::dissipator::dissipator;
    use crate::lindblad::CollapseOperator;
    use crate::test_utils::{
        assert_matrix_close, assert_vector_close, c, generic_matrix, pauli_y, sigma_minus,
    };
    use ndarray::array;

    #[test]
    fn test_vectorize_stacks_columns() {
        let m = array![[c(1.0, 0.0), c(2.0, 0.0)], [c(3.0, 0.0), c(4.0, 0.0)]];
        let v = vectorize(&m);
        assert_eq!(v.to_vec(), vec![c(1.0, 0.0), c(3.0, 0.0), c(2.0, 0.0), c(4.0, 0.0)]);
        assert_matrix_close(&unvectorize(&v).unwrap(), &m, 1e-15);
    }

    #[test]
    fn test_unvectorize_rejects_non_square_length() {
        assert!(unvectorize(&Array1::zeros(3)).is_err());
    }

    #[test]
    fn test_vec_commutator_matches_commutator() {
        let a = pauli_y();
        let rho = generic_matrix();
        let direct = a.dot(&rho) - rho.dot(&a);
        let vectorized = vec_commutator(&a).dot(&vectorize(&rho));
        assert_vector_close(&vectorized, &vectorize(&direct), 1e-14);
    }

    #[test]
    fn test_vec_dissipator_matches_dissipator() {
        let l = sigma_minus() + generic_matrix().mapv(|z| z * 0.3);
        let rho = generic_matrix();
        let op = CollapseOperator::new(l.clone(), 1.0, "L").unwrap();
        let direct = dissipator(&op, &rho);
        let vectorized = vec_dissipator(&l).dot(&vectorize(&rho));
        assert_vector_close(&vectorized, &vectorize(&direct), 1e-13);
    }
}
