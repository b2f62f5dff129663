// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Collapse operators for Lindblad models.
//!
//! Ref: Lindblad (1976), Commun. Math. Phys. 48, 119.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{Result, ValidationError};

/// A dissipation channel D[L](ρ) = γ (L ρ L† − ½{L†L, ρ}).
///
/// Superconducting-qubit channels:
///   - amplitude damping (T1): L = σ⁻, γ = 1/T1
///   - pure dephasing (T_φ):   L = σz/2, γ = 1/T_φ = 1/T2 − 1/(2T1)
#[derive(Debug, Clone)]
pub struct CollapseOperator {
    /// Jump operator L (d × d).
    pub matrix: Array2<Complex64>,
    /// Rate γ in Hz.
    pub rate: f64,
    /// Provenance label, e.g. "T1_q0".
    pub label: String,
}

impl CollapseOperator {
    /// Validated collapse operator: square matrix, finite non-negative rate.
    pub fn new(matrix: Array2<Complex64>, rate: f64, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if matrix.nrows() != matrix.ncols() {
            return Err(ValidationError::Shape {
                what: format!("collapse operator '{}'", label),
                expected: "square matrix".into(),
                actual: format!("{:?}", matrix.dim()),
            }
            .into());
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(field_error(format!(
                "collapse operator '{}' has invalid rate {:.2e}",
                label, rate
            )));
        }
        Ok(Self {
            matrix,
            rate,
            label,
        })
    }

    /// T1 amplitude damping, `t1_us` in microseconds.
    pub fn amplitude_damping(t1_us: f64, qubit_label: &str) -> Result<Self> {
        check_positive("T1", t1_us)?;
        let rate = 1.0 / (t1_us * 1e-6);
        Self::new(sigma_minus(), rate, format!("T1_{qubit_label}"))
    }

    /// Pure dephasing from T1 and T2 (microseconds, T2 ≤ 2·T1).
    pub fn pure_dephasing(t1_us: f64, t2_us: f64, qubit_label: &str) -> Result<Self> {
        check_positive("T1", t1_us)?;
        check_positive("T2", t2_us)?;
        if t2_us > 2.0 * t1_us {
            return Err(field_error(format!(
                "T2 ({t2_us} μs) must be ≤ 2*T1 ({} μs)",
                2.0 * t1_us
            )));
        }

        let gamma_phi = 1.0 / (t2_us * 1e-6) - 1.0 / (2.0 * t1_us * 1e-6);
        // T2 = 2·T1 can round to a tiny negative rate
        let gamma_phi = gamma_phi.max(0.0);

        Self::new(sigma_z_half(), gamma_phi, format!("Tphi_{qubit_label}"))
    }

    /// Both T1 and T_φ channels for a single qubit.
    pub fn from_t1_t2(t1_us: f64, t2_us: f64, qubit_label: &str) -> Result<Vec<Self>> {
        Ok(vec![
            Self::amplitude_damping(t1_us, qubit_label)?,
            Self::pure_dephasing(t1_us, t2_us, qubit_label)?,
        ])
    }
}

/// σ⁻ = |0⟩⟨1|
fn sigma_minus() -> Array2<Complex64> {
    let mut m = Array2::zeros((2, 2));
    m[[0, 1]] = Complex64::new(1.0, 0.0);
    m
}

/// σz/2
fn sigma_z_half() -> Array2<Complex64> {
    let mut m = Array2::zeros((2, 2));
    m[[0, 0]] = Complex64::new(0.5, 0.0);
    m[[1, 1]] = Complex64::new(-0.5, 0.0);
    m
}

fn check_positive(name: &str, value_us: f64) -> Result<()> {
    if !value_us.is_finite() || value_us <= 0.0 {
        return Err(field_error(format!(
            "{name} must be positive, got {value_us} μs"
        )));
    }
    Ok(())
}

fn field_error(message: String) -> crate::error::Error {
    ValidationError::Field {
        field: "collapse_operator".into(),
        message,
    }
    .into()
}
