// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Generator supplied directly as a function of time.

use std::fmt;
use std::sync::Arc;

use ndarray::Array2;
use num_complex::Complex64;

use super::Generator;
use crate::error::{Error, Result, ValidationError};
use crate::frame::Frame;
use crate::validation::validate_square;

type GeneratorFn = Arc<dyn Fn(f64) -> Array2<Complex64> + Send + Sync>;

/// A generator G(t) given as a closure.
///
/// Frames are supported; frequency cutoffs are not, since G(t) has no
/// operator/signal decomposition to filter.
#[derive(Clone)]
pub struct CallableGenerator {
    generator: GeneratorFn,
    frame: Frame,
    drift: Option<Array2<Complex64>>,
}

impl CallableGenerator {
    /// Wrap a closure returning G(t) in the lab frame.
    pub fn new<F>(generator: F) -> Self
    where
        F: Fn(f64) -> Array2<Complex64> + Send + Sync + 'static,
    {
        Self {
            generator: Arc::new(generator),
            frame: Frame::identity(),
            drift: None,
        }
    }

    /// Attach a fixed drift matrix, returned as-is by [`Generator::drift`].
    pub fn with_drift(mut self, drift: Array2<Complex64>) -> Result<Self> {
        validate_square("drift", &drift.view(), self.frame.dim())?;
        self.drift = Some(drift);
        Ok(self)
    }

    /// Builder form of [`Generator::set_frame`].
    pub fn with_frame(mut self, frame: Frame) -> Result<Self> {
        self.set_frame(frame)?;
        Ok(self)
    }
}

impl Generator for CallableGenerator {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn set_frame(&mut self, frame: Frame) -> Result<()> {
        if let (Some(dim), Some(drift)) = (frame.dim(), &self.drift) {
            if drift.nrows() != dim {
                return Err(ValidationError::Shape {
                    what: "frame".into(),
                    expected: format!("dimension {}", drift.nrows()),
                    actual: format!("{}", dim),
                }
                .into());
            }
        }
        self.frame = frame;
        Ok(())
    }

    fn cutoff_freq(&self) -> Option<f64> {
        None
    }

    fn set_cutoff_freq(&mut self, cutoff_freq: Option<f64>) -> Result<()> {
        match cutoff_freq {
            None => Ok(()),
            Some(_) => Err(Error::Config(
                "CallableGenerator does not support a cutoff frequency".into(),
            )),
        }
    }

    fn evaluate(&self, t: f64, in_frame_basis: bool) -> Result<Array2<Complex64>> {
        let g = (self.generator)(t);
        self.frame
            .generator_into_frame(t, &g.view(), false, in_frame_basis)
    }

    fn drift(&self) -> Result<Option<Array2<Complex64>>> {
        Ok(self.drift.clone())
    }
}

impl fmt::Debug for CallableGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableGenerator")
            .field("frame", &self.frame)
            .field("drift", &self.drift)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_matrix_close, c, generic_matrix, pauli_x, pauli_z};

    fn rotating_x() -> CallableGenerator {
        CallableGenerator::new(|t| pauli_x().mapv(|z| z * c(0.0, -t.cos())))
    }

    #[test]
    fn test_evaluate_calls_function() {
        let model = rotating_x();
        let expected = pauli_x().mapv(|z| z * c(0.0, -(0.5f64).cos()));
        assert_matrix_close(&model.evaluate(0.5, false).unwrap(), &expected, 1e-15);
    }

    #[test]
    fn test_evaluate_in_frame() {
        let frame = Frame::from_matrix(pauli_z().mapv(|z| z * c(0.0, -1.5))).unwrap();
        let model = rotating_x().with_frame(frame.clone()).unwrap();
        let t = 0.8;
        let raw = rotating_x().evaluate(t, false).unwrap();
        let expected = frame.generator_into_frame(t, &raw.view(), false, true).unwrap();
        assert_matrix_close(&model.evaluate(t, true).unwrap(), &expected, 1e-13);
    }

    #[test]
    fn test_cutoff_unsupported() {
        let mut model = rotating_x();
        assert!(matches!(model.set_cutoff_freq(Some(1.0)), Err(Error::Config(_))));
        assert!(model.set_cutoff_freq(None).is_ok());
        assert_eq!(model.cutoff_freq(), None);
    }

    #[test]
    fn test_drift_as_given() {
        assert!(rotating_x().drift().unwrap().is_none());
        let model = rotating_x().with_drift(pauli_z()).unwrap();
        assert_matrix_close(&model.drift().unwrap().unwrap(), &pauli_z(), 1e-15);
    }

    #[test]
    fn test_lmult_rmult() {
        let model = rotating_x();
        let t = 2.1;
        let g = model.evaluate(t, false).unwrap();
        let y = generic_matrix();
        assert_matrix_close(&model.lmult(t, &y, false).unwrap(), &g.dot(&y), 1e-14);
        assert_matrix_close(&model.rmult(t, &y, false).unwrap(), &y.dot(&g), 1e-14);
        assert_matrix_close(&model.call(t, Some(&y), false).unwrap(), &g.dot(&y), 1e-14);
    }
}
