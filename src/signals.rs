// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time-dependent signals driving generator channels.
//!
//! A signal is a complex envelope modulated by a carrier:
//!
//!   s(t) = Re[ f(t) · exp(i(2πνt + φ)) ]
//!
//! Models keep the complex value `f(t) · exp(i(2πνt + φ))` because the
//! frequency cutoff treats the positive- and negative-frequency parts of
//! each channel separately.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{Error, Result};

/// Scalar envelope function.
pub type Envelope = Arc<dyn Fn(f64) -> Complex64 + Send + Sync>;

/// Vector-valued envelope function (one entry per channel).
pub type VectorEnvelope = Arc<dyn Fn(f64) -> Array1<Complex64> + Send + Sync>;

/// A single-channel signal descriptor.
#[derive(Clone)]
pub enum Signal {
    /// Time-independent value.
    Constant { value: Complex64 },
    /// Envelope function on a carrier.
    Modulated {
        envelope: Envelope,
        carrier_freq: f64,
        phase: f64,
    },
    /// Sampled envelope held constant over intervals of length `dt`,
    /// zero outside `[start_time, start_time + dt·len)`.
    PiecewiseConstant {
        dt: f64,
        samples: Vec<Complex64>,
        start_time: f64,
        carrier_freq: f64,
        phase: f64,
    },
}

impl Signal {
    /// Constant real signal.
    pub fn constant(value: f64) -> Self {
        Signal::Constant {
            value: Complex64::new(value, 0.0),
        }
    }

    /// Modulated signal with an arbitrary envelope.
    pub fn new<F>(envelope: F, carrier_freq: f64, phase: f64) -> Self
    where
        F: Fn(f64) -> Complex64 + Send + Sync + 'static,
    {
        Signal::Modulated {
            envelope: Arc::new(envelope),
            carrier_freq,
            phase,
        }
    }

    /// Piecewise-constant signal from samples.
    pub fn piecewise_constant(
        dt: f64,
        samples: Vec<Complex64>,
        start_time: f64,
        carrier_freq: f64,
        phase: f64,
    ) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::Config(format!(
                "piecewise-constant signal needs dt > 0, got {}",
                dt
            )));
        }
        Ok(Signal::PiecewiseConstant {
            dt,
            samples,
            start_time,
            carrier_freq,
            phase,
        })
    }

    /// Envelope value f(t).
    pub fn envelope(&self, t: f64) -> Complex64 {
        match self {
            Signal::Constant { value } => *value,
            Signal::Modulated { envelope, .. } => envelope(t),
            Signal::PiecewiseConstant {
                dt,
                samples,
                start_time,
                ..
            } => {
                let idx = ((t - start_time) / dt).floor();
                if idx < 0.0 || idx >= samples.len() as f64 {
                    Complex64::new(0.0, 0.0)
                } else {
                    samples[idx as usize]
                }
            }
        }
    }

    pub fn carrier_freq(&self) -> f64 {
        match self {
            Signal::Constant { .. } => 0.0,
            Signal::Modulated { carrier_freq, .. }
            | Signal::PiecewiseConstant { carrier_freq, .. } => *carrier_freq,
        }
    }

    pub fn phase(&self) -> f64 {
        match self {
            Signal::Constant { .. } => 0.0,
            Signal::Modulated { phase, .. } | Signal::PiecewiseConstant { phase, .. } => *phase,
        }
    }

    /// Constant part of the signal (zero unless the signal is `Constant`).
    pub fn drift(&self) -> Complex64 {
        match self {
            Signal::Constant { value } => *value,
            _ => Complex64::new(0.0, 0.0),
        }
    }

    /// f(t) · exp(i(2πνt + φ))
    pub fn complex_value(&self, t: f64) -> Complex64 {
        let arg = 2.0 * PI * self.carrier_freq() * t + self.phase();
        self.envelope(t) * Complex64::new(0.0, arg).exp()
    }

    /// Physical (real) signal value.
    pub fn value(&self, t: f64) -> f64 {
        self.complex_value(t).re
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Constant { value } => f.debug_struct("Constant").field("value", value).finish(),
            Signal::Modulated {
                carrier_freq,
                phase,
                ..
            } => f
                .debug_struct("Modulated")
                .field("carrier_freq", carrier_freq)
                .field("phase", phase)
                .finish_non_exhaustive(),
            Signal::PiecewiseConstant {
                dt,
                samples,
                start_time,
                carrier_freq,
                phase,
            } => f
                .debug_struct("PiecewiseConstant")
                .field("dt", dt)
                .field("num_samples", &samples.len())
                .field("start_time", start_time)
                .field("carrier_freq", carrier_freq)
                .field("phase", phase)
                .finish(),
        }
    }
}

/// A set of signals evaluated together, one per model channel.
#[derive(Clone)]
pub struct VectorSignal {
    envelope: VectorEnvelope,
    carrier_freqs: Array1<f64>,
    phases: Array1<f64>,
    drift_array: Array1<Complex64>,
    im_angular_freqs: Array1<Complex64>,
}

impl VectorSignal {
    /// Build from a vector envelope and per-channel carrier data.
    ///
    /// Omitted phases and drift values default to zero.
    pub fn new<F>(
        envelope: F,
        carrier_freqs: Array1<f64>,
        phases: Option<Array1<f64>>,
        drift_array: Option<Array1<Complex64>>,
    ) -> Result<Self>
    where
        F: Fn(f64) -> Array1<Complex64> + Send + Sync + 'static,
    {
        Self::from_parts(Arc::new(envelope), carrier_freqs, phases, drift_array)
    }

    fn from_parts(
        envelope: VectorEnvelope,
        carrier_freqs: Array1<f64>,
        phases: Option<Array1<f64>>,
        drift_array: Option<Array1<Complex64>>,
    ) -> Result<Self> {
        let k = carrier_freqs.len();
        let phases = phases.unwrap_or_else(|| Array1::zeros(k));
        let drift_array = drift_array.unwrap_or_else(|| Array1::zeros(k));
        if phases.len() != k || drift_array.len() != k {
            return Err(Error::Config(format!(
                "signal set vectors disagree in length: {} carrier_freqs, {} phases, {} drift values",
                k,
                phases.len(),
                drift_array.len()
            )));
        }
        let im_angular_freqs = carrier_freqs.mapv(|nu| Complex64::new(0.0, 2.0 * PI * nu));
        Ok(Self {
            envelope,
            carrier_freqs,
            phases,
            drift_array,
            im_angular_freqs,
        })
    }

    /// Collect per-channel signals into a signal set.
    pub fn from_signal_list(signals: Vec<Signal>) -> Self {
        let carrier_freqs = signals.iter().map(Signal::carrier_freq).collect();
        let phases = signals.iter().map(Signal::phase).collect();
        let drift_array = signals.iter().map(Signal::drift).collect();
        let im_angular_freqs = signals
            .iter()
            .map(|s| Complex64::new(0.0, 2.0 * PI * s.carrier_freq()))
            .collect();
        let envelope: VectorEnvelope =
            Arc::new(move |t| signals.iter().map(|s| s.envelope(t)).collect());
        Self {
            envelope,
            carrier_freqs,
            phases,
            drift_array,
            im_angular_freqs,
        }
    }

    /// Constant signals with zero frequency and phase.
    pub fn constant(values: Array1<Complex64>) -> Self {
        let k = values.len();
        let drift_array = values.clone();
        let envelope: VectorEnvelope = Arc::new(move |_| values.clone());
        Self {
            envelope,
            carrier_freqs: Array1::zeros(k),
            phases: Array1::zeros(k),
            drift_array,
            im_angular_freqs: Array1::zeros(k),
        }
    }

    /// Channel-wise concatenation: the channels of `self` followed by those of `other`.
    pub fn concat(&self, other: &VectorSignal) -> Self {
        let first = Arc::clone(&self.envelope);
        let second = Arc::clone(&other.envelope);
        let envelope: VectorEnvelope = Arc::new(move |t| {
            let mut out = first(t).to_vec();
            out.extend(second(t).iter().copied());
            Array1::from_vec(out)
        });
        Self {
            envelope,
            carrier_freqs: append(&self.carrier_freqs, &other.carrier_freqs),
            phases: append(&self.phases, &other.phases),
            drift_array: append(&self.drift_array, &other.drift_array),
            im_angular_freqs: append(&self.im_angular_freqs, &other.im_angular_freqs),
        }
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.carrier_freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carrier_freqs.is_empty()
    }

    pub fn carrier_freqs(&self) -> &Array1<f64> {
        &self.carrier_freqs
    }

    pub fn phases(&self) -> &Array1<f64> {
        &self.phases
    }

    pub fn drift_array(&self) -> &Array1<Complex64> {
        &self.drift_array
    }

    /// Envelope values at `t`, checked against the channel count.
    pub fn envelope(&self, t: f64) -> Result<Array1<Complex64>> {
        let env = (self.envelope)(t);
        if env.len() != self.len() {
            return Err(Error::Config(format!(
                "signal envelope returned {} values for {} channels",
                env.len(),
                self.len()
            )));
        }
        Ok(env)
    }

    /// Complex channel values f(t) · exp(i(2πνt + φ)).
    pub fn value(&self, t: f64) -> Result<Array1<Complex64>> {
        let mut out = self.envelope(t)?;
        for ((z, w), phi) in out
            .iter_mut()
            .zip(self.im_angular_freqs.iter())
            .zip(self.phases.iter())
        {
            *z *= (*w * t + Complex64::new(0.0, *phi)).exp();
        }
        Ok(out)
    }

    /// Physical (real) channel values.
    pub fn real_value(&self, t: f64) -> Result<Array1<f64>> {
        Ok(self.value(t)?.mapv(|z| z.re))
    }
}

impl fmt::Debug for VectorSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorSignal")
            .field("carrier_freqs", &self.carrier_freqs)
            .field("phases", &self.phases)
            .field("drift_array", &self.drift_array)
            .finish_non_exhaustive()
    }
}

fn append<T: Clone>(a: &Array1<T>, b: &Array1<T>) -> Array1<T> {
    a.iter().chain(b.iter()).cloned().collect()
}

/// Signals as accepted by model setters: a ready signal set or a list of
/// per-channel descriptors.
#[derive(Debug, Clone)]
pub enum SignalInput {
    Vector(VectorSignal),
    List(Vec<Signal>),
}

impl SignalInput {
    /// Normalize into the canonical signal-set representation.
    pub fn into_vector_signal(self) -> VectorSignal {
        match self {
            SignalInput::Vector(signals) => signals,
            SignalInput::List(list) => VectorSignal::from_signal_list(list),
        }
    }
}

impl From<VectorSignal> for SignalInput {
    fn from(signals: VectorSignal) -> Self {
        SignalInput::Vector(signals)
    }
}

impl From<Vec<Signal>> for SignalInput {
    fn from(list: Vec<Signal>) -> Self {
        SignalInput::List(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_vector_close, c};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_constant_signal() {
        let s = Signal::constant(2.5);
        assert_eq!(s.envelope(3.0), c(2.5, 0.0));
        assert_eq!(s.carrier_freq(), 0.0);
        assert_eq!(s.drift(), c(2.5, 0.0));
        assert_relative_eq!(s.value(7.0), 2.5);
    }

    #[test]
    fn test_modulated_signal_value() {
        let s = Signal::new(|t| c(t, 0.0), 2.0, PI / 2.0);
        // Re[t · exp(i(4πt + π/2))] = -t sin(4πt)
        let t = 0.1;
        assert_relative_eq!(s.value(t), -t * (4.0 * PI * t).sin(), epsilon = 1e-14);
        assert_eq!(s.drift(), c(0.0, 0.0));
    }

    #[test]
    fn test_piecewise_constant_envelope() {
        let s = Signal::piecewise_constant(0.5, vec![c(1.0, 0.0), c(2.0, 0.0)], 1.0, 0.0, 0.0)
            .unwrap();
        assert_eq!(s.envelope(0.99), c(0.0, 0.0));
        assert_eq!(s.envelope(1.0), c(1.0, 0.0));
        assert_eq!(s.envelope(1.7), c(2.0, 0.0));
        assert_eq!(s.envelope(2.0), c(0.0, 0.0));
    }

    #[test]
    fn test_piecewise_constant_rejects_bad_dt() {
        assert!(Signal::piecewise_constant(0.0, vec![], 0.0, 0.0, 0.0).is_err());
        assert!(Signal::piecewise_constant(-1.0, vec![], 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_from_signal_list() {
        let sigs = VectorSignal::from_signal_list(vec![
            Signal::constant(1.0),
            Signal::new(|_| c(0.5, 0.0), 5.0, 0.25),
        ]);
        assert_eq!(sigs.len(), 2);
        assert_eq!(sigs.carrier_freqs().to_vec(), vec![0.0, 5.0]);
        assert_eq!(sigs.phases().to_vec(), vec![0.0, 0.25]);
        assert_eq!(sigs.drift_array().to_vec(), vec![c(1.0, 0.0), c(0.0, 0.0)]);

        let t = 0.03;
        let expected = array![
            c(1.0, 0.0),
            c(0.5, 0.0) * c(0.0, 2.0 * PI * 5.0 * t + 0.25).exp()
        ];
        assert_vector_close(&sigs.value(t).unwrap(), &expected, 1e-14);
    }

    #[test]
    fn test_vector_signal_new_validates_lengths() {
        let ok = VectorSignal::new(|_| array![c(1.0, 0.0)], array![0.0], None, None);
        assert!(ok.is_ok());
        let bad = VectorSignal::new(
            |_| array![c(1.0, 0.0)],
            array![0.0],
            Some(array![0.0, 1.0]),
            None,
        );
        assert!(matches!(bad, Err(Error::Config(_))));
    }

    #[test]
    fn test_envelope_length_mismatch_is_config_error() {
        let sigs = VectorSignal::new(|_| array![c(1.0, 0.0)], array![0.0, 0.0], None, None)
            .unwrap();
        assert!(matches!(sigs.value(0.0), Err(Error::Config(_))));
    }

    #[test]
    fn test_constant_vector_signal() {
        let sigs = VectorSignal::constant(array![c(1.0, 0.0), c(3.0, 0.0)]);
        assert_eq!(sigs.drift_array().to_vec(), vec![c(1.0, 0.0), c(3.0, 0.0)]);
        assert_eq!(sigs.real_value(12.0).unwrap().to_vec(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_concat() {
        let a = VectorSignal::from_signal_list(vec![Signal::new(|t| c(t, 0.0), 1.0, 0.1)]);
        let b = VectorSignal::constant(array![c(2.0, 0.0), c(4.0, 0.0)]);
        let ab = a.concat(&b);

        assert_eq!(ab.len(), 3);
        assert_eq!(ab.carrier_freqs().to_vec(), vec![1.0, 0.0, 0.0]);
        assert_eq!(ab.phases().to_vec(), vec![0.1, 0.0, 0.0]);
        assert_eq!(
            ab.drift_array().to_vec(),
            vec![c(0.0, 0.0), c(2.0, 0.0), c(4.0, 0.0)]
        );

        let t = 0.4;
        let va = a.value(t).unwrap();
        let vb = b.value(t).unwrap();
        let vab = ab.value(t).unwrap();
        assert_relative_eq!((vab[0] - va[0]).norm(), 0.0, epsilon = 1e-14);
        assert_relative_eq!((vab[1] - vb[0]).norm(), 0.0, epsilon = 1e-14);
        assert_relative_eq!((vab[2] - vb[1]).norm(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_signal_input_normalization() {
        let input: SignalInput = vec![Signal::constant(1.0), Signal::constant(2.0)].into();
        let sigs = input.into_vector_signal();
        assert_eq!(sigs.len(), 2);
        assert_eq!(sigs.real_value(0.0).unwrap().to_vec(), vec![1.0, 2.0]);
    }
}
