//! Waveform sampling over the plotting window
//!
//! The window always covers three periods of the signal that defines it.
//! A signal without pulsation has no period, so a fixed fallback length
//! is used instead.

use crate::signal::SignalParameters;
use serde::Serialize;

/// Number of periods shown on the time axis
pub const PERIODS_SHOWN: f64 = 3.0;

/// Window length used when the period is zero
pub const FALLBACK_WINDOW: f64 = 0.1;

/// Intervals between curve samples (the curve has one more sample)
pub const CURVE_STEPS: usize = 600;

/// One point of a sampled curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

/// Length of the plotting window for a given period
pub fn plot_window(period: f64) -> f64 {
    let window = PERIODS_SHOWN * period;
    if window == 0.0 || window.is_nan() {
        FALLBACK_WINDOW
    } else {
        window
    }
}

/// Samples signals over a fixed window `[0, window]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSampler {
    window: f64,
    steps: usize,
}

impl WaveformSampler {
    /// Sampler over an explicit window length
    pub fn new(window: f64) -> Self {
        Self {
            window,
            steps: CURVE_STEPS,
        }
    }

    /// Sampler whose window spans three periods of `signal`
    pub fn for_signal(signal: &SignalParameters) -> Self {
        Self::new(plot_window(signal.period()))
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    /// Number of samples produced per curve
    pub fn sample_count(&self) -> usize {
        self.steps + 1
    }

    /// Time of the `i`-th sample
    pub fn time_at(&self, i: usize) -> f64 {
        (i as f64 / self.steps as f64) * self.window
    }

    /// Evenly spaced samples of `signal`, both window ends included
    pub fn sample(&self, signal: &SignalParameters) -> Vec<Sample> {
        (0..=self.steps)
            .map(|i| {
                let time = self.time_at(i);
                Sample {
                    time,
                    value: signal.value(time),
                }
            })
            .collect()
    }
}
