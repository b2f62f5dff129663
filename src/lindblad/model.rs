// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Vectorized Lindblad generator model.
//!
//! The master equation
//!
//!   dρ/dt = -i[H(t), ρ] + Σ_j Re(s_j(t)) D[L_j](ρ)
//!
//! is linear in ρ, so with vec(ρ) column-stacked it becomes
//! d vec(ρ)/dt = G(t) vec(ρ) on an n²-dimensional space. G(t) is a
//! [`GeneratorModel`] whose first k_H channels are -i·vec_commutator(H_i)
//! and whose remaining k_L channels are vec_dissipator(L_j).

use ndarray::{Array1, Array2, Array3, Axis};
use num_complex::Complex64;

use super::superop::{vec_commutator, vec_dissipator};
use super::types::CollapseOperator;
use crate::config::NumericsConfig;
use crate::error::{Error, Result, ValidationError};
use crate::frame::Frame;
use crate::linalg::stack_operators;
use crate::models::{Generator, GeneratorModel, HamiltonianModel};
use crate::signals::{SignalInput, VectorSignal};
use crate::validation::validate_channel_count;

/// A Lindblad master equation as a generator on vectorized density matrices.
#[derive(Debug, Clone)]
pub struct LindbladModel {
    hamiltonian_operators: Array3<Complex64>,
    noise_operators: Option<Array3<Complex64>>,
    model: GeneratorModel,
}

impl LindbladModel {
    /// Build from Hamiltonian operators/signals and optional noise operators/signals.
    ///
    /// Noise operators without noise signals get a constant unit signal per
    /// channel. Noise signals without noise operators are ignored.
    pub fn new(
        hamiltonian_operators: &[Array2<Complex64>],
        hamiltonian_signals: impl Into<SignalInput>,
        noise_operators: Option<&[Array2<Complex64>]>,
        noise_signals: Option<SignalInput>,
    ) -> Result<Self> {
        let h_ops = stack_operators(hamiltonian_operators)?;
        let n = h_ops.dim().1;

        let l_ops = match noise_operators {
            Some(ops) => {
                let stack = stack_operators(ops)?;
                if stack.dim().1 != n {
                    return Err(ValidationError::Shape {
                        what: "noise operators".into(),
                        expected: format!("({}, {})", n, n),
                        actual: format!("({}, {})", stack.dim().1, stack.dim().2),
                    }
                    .into());
                }
                Some(stack)
            }
            None => None,
        };

        let signals = combine_signals(
            hamiltonian_signals.into().into_vector_signal(),
            h_ops.dim().0,
            l_ops.as_ref().map(|ops| ops.dim().0),
            noise_signals,
        )?;

        let superops = vectorized_operators(&h_ops, l_ops.as_ref())?;
        let model = GeneratorModel::new(superops)?.with_signals(signals)?;

        tracing::debug!(
            dim = n,
            hamiltonian_channels = h_ops.dim().0,
            noise_channels = l_ops.as_ref().map_or(0, |ops| ops.dim().0),
            "Built Lindblad model"
        );

        Ok(Self {
            hamiltonian_operators: h_ops,
            noise_operators: l_ops,
            model,
        })
    }

    /// Build from the operators and signals of a Hamiltonian model.
    pub fn from_hamiltonian(
        hamiltonian: &HamiltonianModel,
        noise_operators: Option<&[Array2<Complex64>]>,
        noise_signals: Option<SignalInput>,
    ) -> Result<Self> {
        let signals = hamiltonian.signals().cloned().ok_or_else(|| {
            Error::Config("Hamiltonian model has no signals to build a Lindblad model from".into())
        })?;
        let operators: Vec<_> = hamiltonian
            .hamiltonian_operators()
            .axis_iter(Axis(0))
            .map(|h| h.to_owned())
            .collect();
        Self::new(&operators, signals, noise_operators, noise_signals)
    }

    /// Build with collapse operators as noise channels, each driven by a
    /// constant signal equal to its rate.
    pub fn from_collapse_operators(
        hamiltonian_operators: &[Array2<Complex64>],
        hamiltonian_signals: impl Into<SignalInput>,
        collapse_operators: &[CollapseOperator],
    ) -> Result<Self> {
        if collapse_operators.is_empty() {
            return Self::new(hamiltonian_operators, hamiltonian_signals, None, None);
        }
        let matrices: Vec<_> = collapse_operators.iter().map(|op| op.matrix.clone()).collect();
        let rates: Array1<Complex64> = collapse_operators
            .iter()
            .map(|op| Complex64::new(op.rate, 0.0))
            .collect();
        Self::new(
            hamiltonian_operators,
            hamiltonian_signals,
            Some(matrices.as_slice()),
            Some(VectorSignal::constant(rates).into()),
        )
    }

    /// Override numerical tolerances.
    pub fn with_numerics(mut self, numerics: NumericsConfig) -> Self {
        self.model = self.model.with_numerics(numerics);
        self
    }

    /// Replace Hamiltonian and noise signals together.
    pub fn set_signals(
        &mut self,
        hamiltonian_signals: impl Into<SignalInput>,
        noise_signals: Option<SignalInput>,
    ) -> Result<()> {
        let signals = combine_signals(
            hamiltonian_signals.into().into_vector_signal(),
            self.hamiltonian_operators.dim().0,
            self.noise_operators.as_ref().map(|ops| ops.dim().0),
            noise_signals,
        )?;
        self.model.set_signals(signals)
    }

    /// Hermitian operators H_i, shape (k_H, n, n).
    pub fn hamiltonian_operators(&self) -> &Array3<Complex64> {
        &self.hamiltonian_operators
    }

    /// Jump operators L_j, shape (k_L, n, n).
    pub fn noise_operators(&self) -> Option<&Array3<Complex64>> {
        self.noise_operators.as_ref()
    }

    /// Combined signals: Hamiltonian channels, then noise channels.
    pub fn signals(&self) -> Option<&VectorSignal> {
        self.model.signals()
    }

    /// The underlying n²-dimensional generator model.
    pub fn generator_model(&self) -> &GeneratorModel {
        &self.model
    }

    /// Density-matrix dimension n.
    pub fn dim(&self) -> usize {
        self.hamiltonian_operators.dim().1
    }
}

impl Generator for LindbladModel {
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

fn combine_signals(
    hamiltonian_signals: VectorSignal,
    num_hamiltonian: usize,
    num_noise: Option<usize>,
    noise_signals: Option<SignalInput>,
) -> Result<VectorSignal> {
    validate_channel_count("Hamiltonian signals", hamiltonian_signals.len(), num_hamiltonian)?;

    let Some(num_noise) = num_noise else {
        if noise_signals.is_some() {
            tracing::warn!("Noise signals given without noise operators; ignoring them");
        }
        return Ok(hamiltonian_signals);
    };

    let noise_signals = match noise_signals {
        Some(signals) => signals.into_vector_signal(),
        None => VectorSignal::constant(Array1::from_elem(num_noise, Complex64::new(1.0, 0.0))),
    };
    validate_channel_count("noise signals", noise_signals.len(), num_noise)?;

    Ok(hamiltonian_signals.concat(&noise_signals))
}

fn vectorized_operators(
    hamiltonian_operators: &Array3<Complex64>,
    noise_operators: Option<&Array3<Complex64>>,
) -> Result<Array3<Complex64>> {
    let minus_i = Complex64::new(0.0, -1.0);
    let mut superops: Vec<Array2<Complex64>> = hamiltonian_operators
        .axis_iter(Axis(0))
        .map(|h| vec_commutator(&h.to_owned()) * minus_i)
        .collect();
    if let Some(noise) = noise_operators {
        superops.extend(
            noise
                .axis_iter(Axis(0))
                .map(|l| vec_dissipator(&l.to_owned())),
        );
    }
    stack_operators(&superops)
}
