// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time-dependent generator models.
//!
//! A generator model evaluates G(t) for the linear ODE dy/dt = G(t) y(t),
//! optionally in a rotating frame. Two families implement [`Generator`]:
//!
//! - [`GeneratorModel`]: G(t) = Σ_j Re(s_j(t)) O_j for a fixed operator stack
//!   and a signal set, with an optional rotating-wave frequency cutoff.
//! - [`CallableGenerator`]: G(t) supplied directly as a function of time.
//!
//! [`HamiltonianModel`] wraps a `GeneratorModel` for Schrödinger dynamics.

pub mod callable;
pub mod generator;
pub mod hamiltonian;

pub use callable::CallableGenerator;
pub use generator::GeneratorModel;
pub use hamiltonian::HamiltonianModel;

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::Result;
use crate::frame::Frame;
use crate::linalg::Operand;

/// The interface an ODE solver uses to drive a model.
pub trait Generator {
    /// The rotating frame (trivial by default).
    fn frame(&self) -> &Frame;

    /// Replace the rotating frame.
    fn set_frame(&mut self, frame: Frame) -> Result<()>;

    /// The rotating-wave cutoff frequency, if any.
    fn cutoff_freq(&self) -> Option<f64>;

    /// Replace the cutoff frequency.
    fn set_cutoff_freq(&mut self, cutoff_freq: Option<f64>) -> Result<()>;

    /// G(t) in the rotating frame, in the frame basis if `in_frame_basis`.
    fn evaluate(&self, t: f64, in_frame_basis: bool) -> Result<Array2<Complex64>>;

    /// The time-independent part of the generator, if defined.
    fn drift(&self) -> Result<Option<Array2<Complex64>>>;

    /// G(t) y
    fn lmult<Y: Operand>(&self, t: f64, y: &Y, in_frame_basis: bool) -> Result<Y>
    where
        Self: Sized,
    {
        y.left_mul(&self.evaluate(t, in_frame_basis)?)
    }

    /// y G(t)
    fn rmult<Y: Operand>(&self, t: f64, y: &Y, in_frame_basis: bool) -> Result<Y>
    where
        Self: Sized,
    {
        y.right_mul(&self.evaluate(t, in_frame_basis)?)
    }

    /// ODE right-hand side: G(t) when `y` is absent, G(t) y otherwise.
    fn call(
        &self,
        t: f64,
        y: Option<&Array2<Complex64>>,
        in_frame_basis: bool,
    ) -> Result<Array2<Complex64>>
    where
        Self: Sized,
    {
        match y {
            Some(y) => self.lmult(t, y, in_frame_basis),
            None => self.evaluate(t, in_frame_basis),
        }
    }
}
