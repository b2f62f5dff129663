// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Direct (matrix-form) evaluation of the Lindblad master equation.
//!
//! Ref: Breuer & Petruccione, "The Theory of Open Quantum Systems" (2002), Ch. 3.

use ndarray::Array2;
use num_complex::Complex64;

use super::types::CollapseOperator;
use crate::error::{Result, ValidationError};
use crate::linalg::dagger;

/// D[L](ρ) = γ (L ρ L† − ½ L†L ρ − ½ ρ L†L)
pub fn dissipator(op: &CollapseOperator, rho: &Array2<Complex64>) -> Array2<Complex64> {
    if op.rate == 0.0 {
        return Array2::zeros(rho.raw_dim());
    }

    let l = &op.matrix;
    let l_dag = dagger(&l.view());
    let l_dag_l = l_dag.dot(l);

    let jump = l.dot(rho).dot(&l_dag);
    let anti = l_dag_l.dot(rho) + rho.dot(&l_dag_l);

    (jump - anti * Complex64::new(0.5, 0.0)) * Complex64::new(op.rate, 0.0)
}

/// dρ/dt = -i[H, ρ] + Σ_k D[L_k](ρ)
///
/// Collapse operators must act on the full Hilbert space of `rho`.
pub fn lindblad_rhs(
    hamiltonian: &Array2<Complex64>,
    collapse_ops: &[CollapseOperator],
    rho: &Array2<Complex64>,
) -> Result<Array2<Complex64>> {
    let n = rho.nrows();
    if hamiltonian.dim() != (n, n) {
        return Err(shape_error("hamiltonian", n, hamiltonian.dim()));
    }

    let commutator = hamiltonian.dot(rho) - rho.dot(hamiltonian);
    let mut total = commutator * Complex64::new(0.0, -1.0);
    for op in collapse_ops {
        if op.matrix.dim() != (n, n) {
            return Err(shape_error(&op.label, n, op.matrix.dim()));
        }
        total += &dissipator(op, rho);
    }
    Ok(total)
}

fn shape_error(what: &str, n: usize, actual: (usize, usize)) -> crate::error::Error {
    ValidationError::Shape {
        what: what.into(),
        expected: format!("({}, {})", n, n),
        actual: format!("{:?}", actual),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{c, plus_state, pauli_z, sigma_minus};
    use approx::assert_relative_eq;

    fn projector(i: usize) -> Array2<Complex64> {
        let mut m = Array2::zeros((2, 2));
        m[[i, i]] = c(1.0, 0.0);
        m
    }

    fn damping(rate: f64) -> CollapseOperator {
        CollapseOperator::new(sigma_minus(), rate, "T1").unwrap()
    }

    #[test]
    fn test_ground_state_is_fixed_point() {
        let d = dissipator(&damping(1e6), &projector(0));
        assert!(d.iter().all(|z| z.norm() < 1e-15));
    }

    #[test]
    fn test_excited_state_decays() {
        let gamma = 1e6;
        let d = dissipator(&damping(gamma), &projector(1));
        assert_relative_eq!(d[[0, 0]].re, gamma, epsilon = 1.0);
        assert_relative_eq!(d[[1, 1]].re, -gamma, epsilon = 1.0);
    }

    #[test]
    fn test_dissipator_is_traceless() {
        let d = dissipator(&damping(2e4), &plus_state());
        let trace = d[[0, 0]] + d[[1, 1]];
        assert_relative_eq!(trace.norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_dephasing_decays_coherences() {
        let op = CollapseOperator::new(pauli_z().mapv(|z| z * 0.5), 1e6, "Tphi").unwrap();
        let d = dissipator(&op, &plus_state());
        assert_relative_eq!(d[[0, 0]].re, 0.0, epsilon = 1e-10);
        assert_relative_eq!(d[[1, 1]].re, 0.0, epsilon = 1e-10);
        // D[σz/2](ρ)_01 = -γ/2 ρ_01
        assert_relative_eq!(d[[0, 1]].re, -0.25e6, epsilon = 1e-6);
    }

    #[test]
    fn test_rhs_commuting_hamiltonian_is_stationary() {
        let h = pauli_z().mapv(|z| z * 5e8);
        let drho = lindblad_rhs(&h, &[], &projector(1)).unwrap();
        assert!(drho.iter().all(|z| z.norm() < 1e-6));
    }

    #[test]
    fn test_rhs_rejects_mismatched_operators() {
        let big = CollapseOperator::new(Array2::zeros((3, 3)), 1.0, "q0q1").unwrap();
        assert!(lindblad_rhs(&pauli_z(), &[big], &plus_state()).is_err());
        assert!(lindblad_rhs(&Array2::zeros((3, 3)), &[], &plus_state()).is_err());
    }
}
