//! Sinusoidal signal model
//!
//! A signal is `amplitude * sin(pulsation * t + phase)`. Parameters are
//! immutable once built; a new validation replaces the whole value.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Parameters of one sinusoid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalParameters {
    /// Peak value, never negative
    pub amplitude: f64,
    /// Angular frequency in rad/s, never negative
    pub pulsation: f64,
    /// Initial phase in radians, not wrapped
    pub phase: f64,
}

impl SignalParameters {
    pub fn new(amplitude: f64, pulsation: f64, phase: f64) -> Self {
        Self {
            amplitude,
            pulsation,
            phase,
        }
    }

    /// Instantaneous value at time `t`
    pub fn value(&self, t: f64) -> f64 {
        self.amplitude * (self.pulsation * t + self.phase).sin()
    }

    /// Period in seconds, `0.0` for a signal without pulsation
    pub fn period(&self) -> f64 {
        if self.pulsation == 0.0 {
            return 0.0;
        }
        2.0 * PI / self.pulsation
    }

    /// Sum of two sinusoids sharing the same pulsation.
    ///
    /// The phasors are added as complex numbers, which is how two currents
    /// in the same branch combine. Returns `None` when the pulsations differ,
    /// since the sum is then no longer a single sinusoid.
    pub fn add_same_pulsation(&self, other: &SignalParameters) -> Option<SignalParameters> {
        if (self.pulsation - other.pulsation).abs() > f64::EPSILON * self.pulsation.max(1.0) {
            return None;
        }

        let re = self.amplitude * self.phase.cos() + other.amplitude * other.phase.cos();
        let im = self.amplitude * self.phase.sin() + other.amplitude * other.phase.sin();

        Some(SignalParameters {
            amplitude: re.hypot(im),
            pulsation: self.pulsation,
            phase: im.atan2(re),
        })
    }
}

impl Default for SignalParameters {
    fn default() -> Self {
        Self::new(2.0, 100.0, 0.0)
    }
}

/// First reference current: i1(t) = 3 sin(314t + 5π/12)
pub fn reference_signal_1() -> SignalParameters {
    SignalParameters::new(3.0, 314.0, 5.0 * PI / 12.0)
}

/// Second reference current: i2(t) = 4 sin(314t - π/6)
pub fn reference_signal_2() -> SignalParameters {
    SignalParameters::new(4.0, 314.0, -PI / 6.0)
}
