// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Lindblad master equation models for open quantum systems.
//!
//! Implements the Gorini–Kossakowski–Sudarshan–Lindblad (GKSL) master equation
//!
//!   dρ/dt = -i[H(t), ρ] + Σ_k γ_k(t) (L_k ρ L_k† − ½{L_k†L_k, ρ})
//!
//! as a linear generator on column-stacked density matrices, so that the
//! same frame and cutoff machinery as closed-system models applies.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use num_complex::Complex64;
//! use qubit_os_dynamics::lindblad::{superop::vectorize, CollapseOperator, LindbladModel};
//! use qubit_os_dynamics::models::Generator;
//! use qubit_os_dynamics::signals::Signal;
//!
//! let one = Complex64::new(1.0, 0.0);
//! let zero = Complex64::new(0.0, 0.0);
//! let z = array![[one, zero], [zero, -one]];
//!
//! let noise = CollapseOperator::from_t1_t2(50.0, 30.0, "q0").unwrap();
//! let model = LindbladModel::from_collapse_operators(&[z], vec![Signal::constant(1e6)], &noise)
//!     .unwrap();
//!
//! let rho = array![[zero, zero], [zero, one]];
//! let drho = model.lmult(0.0, &vectorize(&rho), false).unwrap();
//! assert!(drho[0].re > 0.0);
//! ```
//!
//! # References
//!
//! - Lindblad, G. (1976). Commun. Math. Phys. 48, 119.
//!   DOI: 10.1007/BF01608499
//! - Gorini, V., Kossakowski, A., & Sudarshan, E. C. G. (1976). J. Math. Phys. 17, 821.
//!   DOI: 10.1063/1.522979

pub mod dissipator;
pub mod model;
pub mod superop;
pub mod types;

pub use dissipator::{dissipator, lindblad_rhs};
pub use model::LindbladModel;
pub use superop::{unvectorize, vec_commutator, vec_dissipator, vectorize};
pub use types::CollapseOperator;
