// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! QubitOS Dynamics
//!
//! Time-dependent generator models for the linear ODE
//!
//!   dy/dt = G(t) y(t)
//!
//! built for repeated evaluation inside an ODE solver's inner loop.
//! G(t) is a signal-weighted sum of fixed operators, optionally taken into
//! a rotating frame and filtered by a rotating-wave frequency cutoff.
//! Frame diagonalization and the cutoff split are computed once and cached;
//! each evaluation is a single contraction over the channel axis.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │     ODE solver (caller): call(t, y)      │
//! ├──────────────────────────────────────────┤
//! │            Generator trait               │
//! ├───────────────┬──────────────┬───────────┤
//! │ LindbladModel │ Hamiltonian  │ Callable  │
//! │ (vectorized)  │ Model        │ Generator │
//! ├───────────────┴──────────────┤           │
//! │        GeneratorModel        │           │
//! │   (cutoff operator cache)    │           │
//! ├──────────────┬───────────────┴───────────┤
//! │   Signals    │          Frame            │
//! └──────────────┴───────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`]: The `Generator` trait and closed-system models
//! - [`lindblad`]: Vectorized Lindblad (open-system) models
//! - [`frame`]: Rotating frames and the frequency cutoff split
//! - [`signals`]: Channel signals and signal sets
//! - [`linalg`]: Dense complex linear algebra
//! - [`config`]: Configuration management
//! - [`validation`]: Input validation utilities
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod frame;
pub mod linalg;
pub mod lindblad;
pub mod models;
pub mod signals;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use frame::Frame;
pub use lindblad::LindbladModel;
pub use models::{CallableGenerator, Generator, GeneratorModel, HamiltonianModel};
pub use signals::{Signal, SignalInput, VectorSignal};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
