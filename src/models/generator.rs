// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operator/signal generator model.
//!
//! G(t) = Σ_j Re(s_j(t)) O_j, evaluated in a rotating frame F. With complex
//! channel values s_j(t) the frame-basis generator is
//!
//!   ½ Σ_j (s_j A⁺_j + s̄_j A⁻_j)
//!
//! where (A⁺, A⁻) are the frame-basis operators split by the cutoff. The
//! split depends on the operators, frame, cutoff and carrier frequencies; it
//! is built lazily on first use and dropped whenever any of those change.

use std::sync::OnceLock;

use ndarray::{Array1, Array2, Array3};
use num_complex::Complex64;

use super::Generator;
use crate::config::NumericsConfig;
use crate::error::{Error, Result, ValidationError};
use crate::frame::Frame;
use crate::linalg::stack_operators;
use crate::signals::{SignalInput, VectorSignal};
use crate::validation::{validate_channel_count, validate_cutoff_freq, validate_operator_stack};

/// Cutoff-split frame-basis operators, each flattened to shape (k, n²).
#[derive(Debug, Clone)]
struct CutoffOperators {
    plus: Array2<Complex64>,
    minus: Array2<Complex64>,
}

/// A generator given as a linear combination of operators with signal coefficients.
#[derive(Debug, Clone)]
pub struct GeneratorModel {
    operators: Array3<Complex64>,
    signals: Option<VectorSignal>,
    frame: Frame,
    cutoff_freq: Option<f64>,
    numerics: NumericsConfig,
    cutoff_ops: OnceLock<CutoffOperators>,
}

impl GeneratorModel {
    /// Create a model from a (k, n, n) operator stack, with no signals,
    /// trivial frame and no cutoff.
    pub fn new(operators: Array3<Complex64>) -> Result<Self> {
        validate_operator_stack(&operators)?;
        Ok(Self {
            operators,
            signals: None,
            frame: Frame::identity(),
            cutoff_freq: None,
            numerics: NumericsConfig::default(),
            cutoff_ops: OnceLock::new(),
        })
    }

    /// Create a model from a list of equally-shaped square operators.
    pub fn from_operators(operators: &[Array2<Complex64>]) -> Result<Self> {
        Self::new(stack_operators(operators)?)
    }

    /// Builder form of [`GeneratorModel::set_signals`].
    pub fn with_signals(mut self, signals: impl Into<SignalInput>) -> Result<Self> {
        self.set_signals(signals)?;
        Ok(self)
    }

    /// Builder form of [`Generator::set_frame`].
    pub fn with_frame(mut self, frame: Frame) -> Result<Self> {
        self.set_frame(frame)?;
        Ok(self)
    }

    /// Builder form of [`Generator::set_cutoff_freq`].
    pub fn with_cutoff_freq(mut self, cutoff_freq: f64) -> Result<Self> {
        self.set_cutoff_freq(Some(cutoff_freq))?;
        Ok(self)
    }

    /// Override numerical tolerances.
    pub fn with_numerics(mut self, numerics: NumericsConfig) -> Self {
        self.numerics = numerics;
        self
    }

    /// The (k, n, n) operator stack.
    pub fn operators(&self) -> &Array3<Complex64> {
        &self.operators
    }

    /// Number of operators (channels).
    pub fn num_operators(&self) -> usize {
        self.operators.dim().0
    }

    /// Operator dimension n.
    pub fn dim(&self) -> usize {
        self.operators.dim().1
    }

    /// The current signals, if set.
    pub fn signals(&self) -> Option<&VectorSignal> {
        self.signals.as_ref()
    }

    /// Numerical tolerances in use.
    pub fn numerics(&self) -> &NumericsConfig {
        &self.numerics
    }

    /// Replace the signals, one per operator.
    ///
    /// With a cutoff active, a change of carrier frequencies drops the
    /// cutoff split.
    pub fn set_signals(&mut self, signals: impl Into<SignalInput>) -> Result<()> {
        let signals = signals.into().into_vector_signal();
        validate_channel_count("signals", signals.len(), self.num_operators())?;

        if self.cutoff_freq.is_some() {
            let new_freqs = signals.carrier_freqs().to_vec();
            let unchanged = self.signals.as_ref().is_some_and(|prev| {
                let prev_freqs = prev.carrier_freqs().to_vec();
                self.numerics.carrier_freqs_close(&new_freqs, &prev_freqs)
            });
            if !unchanged {
                self.reset_internal_ops();
            }
        }
        self.signals = Some(signals);
        Ok(())
    }

    /// Remove the signals; evaluation fails until new ones are set.
    pub fn clear_signals(&mut self) {
        self.signals = None;
    }

    fn require_signals(&self) -> Result<&VectorSignal> {
        self.signals
            .as_ref()
            .ok_or_else(|| Error::Config("GeneratorModel cannot be evaluated without signals".into()))
    }

    fn reset_internal_ops(&mut self) {
        if self.cutoff_ops.take().is_some() {
            tracing::debug!(
                num_operators = self.num_operators(),
                "Invalidated cutoff operator cache"
            );
        }
    }

    fn cutoff_operators(&self) -> Result<&CutoffOperators> {
        if let Some(ops) = self.cutoff_ops.get() {
            return Ok(ops);
        }

        let (k, n, _) = self.operators.dim();
        let carrier_freqs = match &self.signals {
            Some(signals) => signals.carrier_freqs().clone(),
            None => Array1::zeros(k),
        };
        let (plus, minus) = self.frame.operators_into_frame_basis_with_cutoff(
            &self.operators,
            self.cutoff_freq,
            &carrier_freqs,
        )?;
        let ops = CutoffOperators {
            plus: plus.into_shape((k, n * n))?,
            minus: minus.into_shape((k, n * n))?,
        };

        tracing::debug!(
            num_operators = k,
            dim = n,
            cutoff_freq = ?self.cutoff_freq,
            "Built cutoff operator cache"
        );
        Ok(self.cutoff_ops.get_or_init(|| ops))
    }

    /// ½ (c · A⁺ + c̄ · A⁻) in the frame basis.
    fn combine(&self, coeffs: &Array1<Complex64>) -> Result<Array2<Complex64>> {
        let ops = self.cutoff_operators()?;
        let n = self.dim();
        let conj = coeffs.mapv(|z| z.conj());
        let flat = (coeffs.dot(&ops.plus) + conj.dot(&ops.minus)) * Complex64::new(0.5, 0.0);
        Ok(flat.into_shape((n, n))?)
    }
}

impl Generator for GeneratorModel {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn set_frame(&mut self, frame: Frame) -> Result<()> {
        if let Some(dim) = frame.dim() {
            if dim != self.dim() {
                return Err(ValidationError::Shape {
                    what: "frame".into(),
                    expected: format!("dimension {}", self.dim()),
                    actual: format!("{}", dim),
                }
                .into());
            }
        }
        tracing::debug!(trivial = frame.is_trivial(), "Setting rotating frame");
        self.frame = frame;
        self.reset_internal_ops();
        Ok(())
    }

    fn cutoff_freq(&self) -> Option<f64> {
        self.cutoff_freq
    }

    fn set_cutoff_freq(&mut self, cutoff_freq: Option<f64>) -> Result<()> {
        validate_cutoff_freq(cutoff_freq)?;
        if cutoff_freq != self.cutoff_freq {
            self.cutoff_freq = cutoff_freq;
            self.reset_internal_ops();
        }
        Ok(())
    }

    fn evaluate(&self, t: f64, in_frame_basis: bool) -> Result<Array2<Complex64>> {
        let sig_vals = self.require_signals()?.value(t)?;
        let op_in_frame_basis = self.combine(&sig_vals)?;
        self.frame
            .generator_into_frame(t, &op_in_frame_basis.view(), true, in_frame_basis)
    }

    fn drift(&self) -> Result<Option<Array2<Complex64>>> {
        if !self.frame.is_trivial() {
            return Err(Error::Config(
                "drift is undefined when a non-trivial rotating frame is set".into(),
            ));
        }
        let drift_array = self.require_signals()?.drift_array().clone();
        Ok(Some(self.combine(&drift_array)?))
    }
}
