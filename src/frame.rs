// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rotating frames.
//!
//! A frame is an anti-Hermitian operator F. Entering the frame maps
//!
//!   y(t)  ↦ exp(-tF) y(t)
//!   G(t)  ↦ exp(-tF) G(t) exp(tF) − F
//!
//! F is stored through its diagonalization F = U diag(d) U† with d purely
//! imaginary, so every exp(±tF) reduces to an element-wise phase in the
//! frame basis. All `*_in_frame_basis` flags refer to that basis.
//!
//! The frequency cutoff used by generator models is also defined here:
//! in the frame basis, operator entry (a, b) of a channel with carrier ν
//! oscillates as exp(±2πiνt + (d_b − d_a)t), and entries whose frequency
//! is at or above the cutoff are dropped.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, Array3, ArrayView2, Axis};
use ndarray_linalg::{EighInto, UPLO};
use num_complex::Complex64;

use crate::config::NumericsConfig;
use crate::error::{Result, ValidationError};
use crate::linalg::{dagger, Operand};
use crate::validation::{validate_anti_hermitian, validate_square};

/// A rotating frame; the default is the trivial (identity) frame.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    data: Option<FrameData>,
}

#[derive(Debug, Clone)]
struct FrameData {
    operator: Array2<Complex64>,
    diag: Array1<Complex64>,
    /// `None` when the frame operator is already diagonal.
    basis: Option<(Array2<Complex64>, Array2<Complex64>)>,
}

impl Frame {
    /// The trivial frame (F = 0); all maps are the identity.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Frame from an anti-Hermitian matrix.
    pub fn from_matrix(operator: Array2<Complex64>) -> Result<Self> {
        Self::from_matrix_with(operator, &NumericsConfig::default())
    }

    /// Frame from an anti-Hermitian matrix, with explicit tolerances.
    pub fn from_matrix_with(operator: Array2<Complex64>, numerics: &NumericsConfig) -> Result<Self> {
        validate_anti_hermitian(&operator.view(), numerics.anti_hermitian_atol)?;

        let is_diagonal = operator
            .indexed_iter()
            .all(|((i, j), z)| i == j || *z == Complex64::new(0.0, 0.0));
        if is_diagonal {
            let diag = operator.diag().to_owned();
            return Ok(Self {
                data: Some(FrameData {
                    operator,
                    diag,
                    basis: None,
                }),
            });
        }

        // iF is Hermitian: iF = U diag(λ) U†  ⇒  F = U diag(-iλ) U†
        let i_op = operator.mapv(|z| z * Complex64::i());
        let (evals, evects): (Array1<f64>, Array2<Complex64>) = i_op.eigh_into(UPLO::Lower)?;
        let diag = evals.mapv(|lambda| Complex64::new(0.0, -lambda));
        let basis_adjoint = dagger(&evects.view());

        tracing::debug!(dim = operator.nrows(), "Diagonalized frame operator");

        Ok(Self {
            data: Some(FrameData {
                operator,
                diag,
                basis: Some((evects, basis_adjoint)),
            }),
        })
    }

    /// Frame from the diagonal of a diagonal anti-Hermitian matrix.
    pub fn from_diagonal(diag: Array1<Complex64>) -> Result<Self> {
        Self::from_diagonal_with(diag, &NumericsConfig::default())
    }

    /// Frame from a diagonal, with explicit tolerances.
    pub fn from_diagonal_with(diag: Array1<Complex64>, numerics: &NumericsConfig) -> Result<Self> {
        let dev = diag.iter().map(|z| 2.0 * z.re.abs()).fold(0.0, f64::max);
        if dev > numerics.anti_hermitian_atol {
            return Err(ValidationError::NotAntiHermitian(dev).into());
        }
        Ok(Self {
            data: Some(FrameData {
                operator: Array2::from_diag(&diag),
                diag,
                basis: None,
            }),
        })
    }

    /// Whether this is the identity frame.
    pub fn is_trivial(&self) -> bool {
        self.data.is_none()
    }

    /// The anti-Hermitian frame operator, if any.
    pub fn frame_operator(&self) -> Option<&Array2<Complex64>> {
        self.data.as_ref().map(|d| &d.operator)
    }

    /// Eigenvalues of the frame operator (purely imaginary).
    pub fn frame_diag(&self) -> Option<&Array1<Complex64>> {
        self.data.as_ref().map(|d| &d.diag)
    }

    /// Unitary U whose columns are the frame eigenvectors.
    pub fn frame_basis(&self) -> Option<Array2<Complex64>> {
        self.data.as_ref().map(|d| match &d.basis {
            Some((u, _)) => u.clone(),
            None => crate::linalg::identity(d.diag.len()),
        })
    }

    /// U†
    pub fn frame_basis_adjoint(&self) -> Option<Array2<Complex64>> {
        self.data.as_ref().map(|d| match &d.basis {
            Some((_, u_dag)) => u_dag.clone(),
            None => crate::linalg::identity(d.diag.len()),
        })
    }

    /// Operator dimension, `None` for the trivial frame.
    pub fn dim(&self) -> Option<usize> {
        self.data.as_ref().map(|d| d.diag.len())
    }

    /// U† A U
    pub fn operator_into_frame_basis(
        &self,
        op: &ArrayView2<'_, Complex64>,
    ) -> Result<Array2<Complex64>> {
        self.check_operator(op)?;
        Ok(match self.data.as_ref().and_then(|d| d.basis.as_ref()) {
            Some((u, u_dag)) => u_dag.dot(op).dot(u),
            None => op.to_owned(),
        })
    }

    /// U A U†
    pub fn operator_out_of_frame_basis(
        &self,
        op: &ArrayView2<'_, Complex64>,
    ) -> Result<Array2<Complex64>> {
        self.check_operator(op)?;
        Ok(match self.data.as_ref().and_then(|d| d.basis.as_ref()) {
            Some((u, u_dag)) => u.dot(op).dot(u_dag),
            None => op.to_owned(),
        })
    }

    /// U† y
    pub fn state_into_frame_basis<Y: Operand>(&self, y: &Y) -> Result<Y> {
        self.check_state(y)?;
        match self.data.as_ref().and_then(|d| d.basis.as_ref()) {
            Some((_, u_dag)) => y.left_mul(u_dag),
            None => Ok(y.clone()),
        }
    }

    /// U y
    pub fn state_out_of_frame_basis<Y: Operand>(&self, y: &Y) -> Result<Y> {
        self.check_state(y)?;
        match self.data.as_ref().and_then(|d| d.basis.as_ref()) {
            Some((u, _)) => y.left_mul(u),
            None => Ok(y.clone()),
        }
    }

    /// exp(-tF) y
    pub fn state_into_frame<Y: Operand>(
        &self,
        t: f64,
        y: &Y,
        y_in_frame_basis: bool,
        return_in_frame_basis: bool,
    ) -> Result<Y> {
        self.rotate_state(-t, y, y_in_frame_basis, return_in_frame_basis)
    }

    /// exp(tF) y
    pub fn state_out_of_frame<Y: Operand>(
        &self,
        t: f64,
        y: &Y,
        y_in_frame_basis: bool,
        return_in_frame_basis: bool,
    ) -> Result<Y> {
        self.rotate_state(t, y, y_in_frame_basis, return_in_frame_basis)
    }

    fn rotate_state<Y: Operand>(
        &self,
        t: f64,
        y: &Y,
        y_in_frame_basis: bool,
        return_in_frame_basis: bool,
    ) -> Result<Y> {
        let Some(data) = &self.data else {
            return Ok(y.clone());
        };
        let mut out = if y_in_frame_basis {
            self.check_state(y)?;
            y.clone()
        } else {
            self.state_into_frame_basis(y)?
        };
        out.scale_rows(&data.diag.mapv(|d| (d * t).exp()));
        if return_in_frame_basis {
            Ok(out)
        } else {
            self.state_out_of_frame_basis(&out)
        }
    }

    /// exp(-tF) A exp(tF)
    pub fn operator_into_frame(
        &self,
        t: f64,
        op: &ArrayView2<'_, Complex64>,
        op_in_frame_basis: bool,
        return_in_frame_basis: bool,
    ) -> Result<Array2<Complex64>> {
        self.conjugate(-t, op, op_in_frame_basis, return_in_frame_basis, None)
    }

    /// exp(tF) A exp(-tF)
    pub fn operator_out_of_frame(
        &self,
        t: f64,
        op: &ArrayView2<'_, Complex64>,
        op_in_frame_basis: bool,
        return_in_frame_basis: bool,
    ) -> Result<Array2<Complex64>> {
        self.conjugate(t, op, op_in_frame_basis, return_in_frame_basis, None)
    }

    /// exp(-tF) G exp(tF) − F
    pub fn generator_into_frame(
        &self,
        t: f64,
        op: &ArrayView2<'_, Complex64>,
        op_in_frame_basis: bool,
        return_in_frame_basis: bool,
    ) -> Result<Array2<Complex64>> {
        self.conjugate(-t, op, op_in_frame_basis, return_in_frame_basis, Some(-1.0))
    }

    /// exp(tF) G exp(-tF) + F
    pub fn generator_out_of_frame(
        &self,
        t: f64,
        op: &ArrayView2<'_, Complex64>,
        op_in_frame_basis: bool,
        return_in_frame_basis: bool,
    ) -> Result<Array2<Complex64>> {
        self.conjugate(t, op, op_in_frame_basis, return_in_frame_basis, Some(1.0))
    }

    /// exp(sF) A exp(-sF) (+ sign·F), computed entry-wise in the frame basis:
    /// entry (a, b) picks up exp(s(d_a − d_b)).
    fn conjugate(
        &self,
        s: f64,
        op: &ArrayView2<'_, Complex64>,
        op_in_frame_basis: bool,
        return_in_frame_basis: bool,
        add_frame: Option<f64>,
    ) -> Result<Array2<Complex64>> {
        let Some(data) = &self.data else {
            self.check_operator(op)?;
            return Ok(op.to_owned());
        };

        let mut out = if op_in_frame_basis {
            self.check_operator(op)?;
            op.to_owned()
        } else {
            self.operator_into_frame_basis(op)?
        };

        let exp_plus = data.diag.mapv(|d| (d * s).exp());
        let exp_minus = data.diag.mapv(|d| (-d * s).exp());
        for ((a, b), z) in out.indexed_iter_mut() {
            *z *= exp_plus[a] * exp_minus[b];
        }
        if let Some(sign) = add_frame {
            for (a, d) in data.diag.iter().enumerate() {
                out[[a, a]] += *d * sign;
            }
        }

        if return_in_frame_basis {
            Ok(out)
        } else {
            self.operator_out_of_frame_basis(&out.view())
        }
    }

    /// Split operators into the frame basis with a frequency cutoff.
    ///
    /// Returns (A⁺, A⁻), each of shape (k, n, n), such that for complex
    /// channel values s the cutoff-filtered generator in the frame basis is
    ///
    ///   ½ Σ_j (s_j A⁺_j + s̄_j A⁻_j).
    ///
    /// Entry (a, b) of A⁺_j survives iff |2πiν_j + d_b − d_a| / 2π < cutoff,
    /// and of A⁻_j iff |−2πiν_j + d_b − d_a| / 2π < cutoff. Without a cutoff
    /// both halves are the full frame-basis operators.
    pub fn operators_into_frame_basis_with_cutoff(
        &self,
        operators: &Array3<Complex64>,
        cutoff_freq: Option<f64>,
        carrier_freqs: &Array1<f64>,
    ) -> Result<(Array3<Complex64>, Array3<Complex64>)> {
        let (k, n, _) = operators.dim();
        if carrier_freqs.len() != k {
            return Err(ValidationError::Shape {
                what: "carrier_freqs".into(),
                expected: format!("{}", k),
                actual: format!("{}", carrier_freqs.len()),
            }
            .into());
        }

        let mut in_basis = Array3::zeros((k, n, n));
        for (j, op) in operators.axis_iter(Axis(0)).enumerate() {
            in_basis
                .index_axis_mut(Axis(0), j)
                .assign(&self.operator_into_frame_basis(&op)?);
        }

        let Some(cutoff) = cutoff_freq else {
            return Ok((in_basis.clone(), in_basis));
        };

        let zeros = Array1::zeros(n);
        let diag = self.frame_diag().unwrap_or(&zeros);

        let mut plus = in_basis.clone();
        let mut minus = in_basis;
        for j in 0..k {
            let w = Complex64::new(0.0, 2.0 * PI * carrier_freqs[j]);
            for a in 0..n {
                for b in 0..n {
                    let diff = diag[b] - diag[a];
                    if (w + diff).norm() / (2.0 * PI) >= cutoff {
                        plus[[j, a, b]] = Complex64::new(0.0, 0.0);
                    }
                    if (-w + diff).norm() / (2.0 * PI) >= cutoff {
                        minus[[j, a, b]] = Complex64::new(0.0, 0.0);
                    }
                }
            }
        }
        Ok((plus, minus))
    }

    fn check_operator(&self, op: &ArrayView2<'_, Complex64>) -> Result<()> {
        validate_square("operator", op, self.dim())
    }

    fn check_state<Y: Operand>(&self, y: &Y) -> Result<()> {
        match self.dim() {
            Some(n) if y.leading_dim() != n => Err(ValidationError::Shape {
                what: "state".into(),
                expected: format!("leading dimension {}", n),
                actual: format!("{}", y.leading_dim()),
            }
            .into()),
            _ => Ok(()),
        }
    }
}
