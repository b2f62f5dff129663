// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hamiltonian models for closed-system (Schrödinger) dynamics.
//!
//!   dψ/dt = -i H(t) ψ,   H(t) = Σ_j Re(s_j(t)) H_j
//!
//! The generator is stored as operators -i H_j so evaluation returns -i H(t).

use ndarray::{Array2, Array3, Axis};
use num_complex::Complex64;

use super::{Generator, GeneratorModel};
use crate::config::NumericsConfig;
use crate::error::Result;
use crate::frame::Frame;
use crate::linalg::stack_operators;
use crate::signals::{SignalInput, VectorSignal};
use crate::validation::validate_hermitian;

#[derive(Debug, Clone)]
pub struct HamiltonianModel {
    hamiltonian_operators: Array3<Complex64>,
    model: GeneratorModel,
}

impl HamiltonianModel {
    /// Build from Hermitian operators H_j.
    pub fn new(hamiltonian_operators: &[Array2<Complex64>]) -> Result<Self> {
        Self::new_with(hamiltonian_operators, NumericsConfig::default())
    }

    /// Build with explicit tolerances for the Hermiticity check.
    pub fn new_with(
        hamiltonian_operators: &[Array2<Complex64>],
        numerics: NumericsConfig,
    ) -> Result<Self> {
        let stack = stack_operators(hamiltonian_operators)?;
        for h in stack.axis_iter(Axis(0)) {
            validate_hermitian(&h, numerics.hermitian_atol)?;
        }
        let generator_ops = stack.mapv(|z| z * Complex64::new(0.0, -1.0));
        Ok(Self {
            hamiltonian_operators: stack,
            model: GeneratorModel::new(generator_ops)?.with_numerics(numerics),
        })
    }

    /// Set the signals, one per Hamiltonian operator.
    pub fn with_signals(mut self, signals: impl Into<SignalInput>) -> Result<Self> {
        self.model.set_signals(signals)?;
        Ok(self)
    }

    /// Set the rotating frame.
    pub fn with_frame(mut self, frame: Frame) -> Result<Self> {
        self.model.set_frame(frame)?;
        Ok(self)
    }

    /// Set the rotating-wave cutoff frequency.
    pub fn with_cutoff_freq(mut self, cutoff_freq: f64) -> Result<Self> {
        self.model.set_cutoff_freq(Some(cutoff_freq))?;
        Ok(self)
    }

    /// The Hermitian operators H_j, shape (k, n, n).
    pub fn hamiltonian_operators(&self) -> &Array3<Complex64> {
        &self.hamiltonian_operators
    }

    /// The current signals, if set.
    pub fn signals(&self) -> Option<&VectorSignal> {
        self.model.signals()
    }

    /// Replace the signals, one per operator.
    pub fn set_signals(&mut self, signals: impl Into<SignalInput>) -> Result<()> {
        self.model.set_signals(signals)
    }

    /// Remove the signals.
    pub fn clear_signals(&mut self) {
        self.model.clear_signals();
    }

    /// The underlying generator model (operators -i H_j).
    pub fn generator_model(&self) -> &GeneratorModel {
        &self.model
    }

    /// Hilbert-space dimension n.
    pub fn dim(&self) -> usize {
        self.model.dim()
    }
}

impl Generator for HamiltonianModel {
    fn frame(&self) -> &Frame {
        self.model.frame()
    }

    fn set_frame(&mut self, frame: Frame) -> Result<()> {
        self.model.set_frame(frame)
    }

    fn cutoff_freq(&self) -> Option<f64> {
        self.model.cutoff_freq()
    }

    fn set_cutoff_freq(&mut self, cutoff_freq: Option<f64>) -> Result<()> {
        self.model.set_cutoff_freq(cutoff_freq)
    }

    fn evaluate(&self, t: f64, in_frame_basis: bool) -> Result<Array2<Complex64>> {
        self.model.evaluate(t, in_frame_basis)
    }

    fn drift(&self) -> Result<Option<Array2<Complex64>>> {
        self.model.drift()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use crate::signals::Signal;
    use crate::test_utils::{assert_matrix_close, c, generic_matrix, pauli_x, pauli_z};

    #[test]
    fn test_evaluate_is_minus_i_h() {
        let model = HamiltonianModel::new(&[pauli_z(), pauli_x()])
            .unwrap()
            .with_signals(vec![Signal::constant(0.5), Signal::constant(2.0)])
            .unwrap();
        let h = pauli_z().mapv(|z| z * 0.5) + pauli_x().mapv(|z| z * 2.0);
        let expected = h.mapv(|z| z * c(0.0, -1.0));
        assert_matrix_close(&model.evaluate(3.0, false).unwrap(), &expected, 1e-14);
        assert_matrix_close(&model.drift().unwrap().unwrap(), &expected, 1e-14);
    }

    #[test]
    fn test_rejects_non_hermitian() {
        let err = HamiltonianModel::new(&[generic_matrix()]).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NotHermitian(_))
        ));
    }

    #[test]
    fn test_accessors() {
        let model = HamiltonianModel::new(&[pauli_x()]).unwrap();
        assert_eq!(model.dim(), 2);
        assert!(model.signals().is_none());
        assert_matrix_close(
            &model.hamiltonian_operators().index_axis(Axis(0), 0).to_owned(),
            &pauli_x(),
            1e-15,
        );
        assert_eq!(model.generator_model().operators()[[0, 0, 1]], c(0.0, -1.0));
    }

    #[test]
    fn test_frame_and_cutoff_delegate() {
        let frame = Frame::from_matrix(pauli_z().mapv(|z| z * c(0.0, -1.0))).unwrap();
        let mut model = HamiltonianModel::new(&[pauli_x()])
            .unwrap()
            .with_signals(vec![Signal::constant(1.0)])
            .unwrap()
            .with_frame(frame)
            .unwrap()
            .with_cutoff_freq(4.0)
            .unwrap();
        assert!(!model.frame().is_trivial());
        assert_eq!(model.cutoff_freq(), Some(4.0));
        model.set_cutoff_freq(None).unwrap();
        assert_eq!(model.generator_model().cutoff_freq(), None);
    }
}
