//! Canonical display of signal functions
//!
//! Renders parameters as `i(t) = a sin(ωt + φ)`, writing the phase as a
//! fraction of π when it is close to a multiple of π/12.

use crate::signal::SignalParameters;
use std::f64::consts::PI;

/// Phases at or below this magnitude are left out of the display
pub const PHASE_DISPLAY_THRESHOLD: f64 = 0.001;

/// Maximum distance in radians for a phase to be shown as a π fraction
pub const PI_RATIO_TOLERANCE: f64 = 0.01;

/// A recognized fraction of π and its label
#[derive(Debug, Clone)]
pub struct PiRatio {
    pub numerator: u32,
    pub denominator: u32,
    pub label: &'static str,
}

impl PiRatio {
    /// Value of the fraction in radians
    pub fn radians(&self) -> f64 {
        (self.numerator as f64 / self.denominator as f64) * PI
    }
}

lazy_static::lazy_static! {
    /// Multiples of π/12 from 0 to 2π, checked in ascending order
    pub static ref PI_RATIOS: Vec<PiRatio> = {
        let entries: [(u32, u32, &'static str); 25] = [
            (0, 1, "0"),
            (1, 12, "π/12"),
            (1, 6, "π/6"),
            (1, 4, "π/4"),
            (1, 3, "π/3"),
            (5, 12, "5π/12"),
            (1, 2, "π/2"),
            (7, 12, "7π/12"),
            (2, 3, "2π/3"),
            (3, 4, "3π/4"),
            (5, 6, "5π/6"),
            (11, 12, "11π/12"),
            (1, 1, "π"),
            (13, 12, "13π/12"),
            (7, 6, "7π/6"),
            (5, 4, "5π/4"),
            (4, 3, "4π/3"),
            (17, 12, "17π/12"),
            (3, 2, "3π/2"),
            (19, 12, "19π/12"),
            (5, 3, "5π/3"),
            (7, 4, "7π/4"),
            (11, 6, "11π/6"),
            (23, 12, "23π/12"),
            (2, 1, "2π"),
        ];
        entries
            .iter()
            .map(|&(numerator, denominator, label)| PiRatio { numerator, denominator, label })
            .collect()
    };
}

/// Format a phase as a signed π fraction (`-π/4`) or with two decimals
pub fn format_phase_with_pi(phase: f64) -> String {
    let abs_phase = phase.abs();
    let sign = if phase < 0.0 { "-" } else { "" };

    for ratio in PI_RATIOS.iter() {
        if (abs_phase - ratio.radians()).abs() < PI_RATIO_TOLERANCE {
            if ratio.label == "0" {
                return "0".to_string();
            }
            return format!("{}{}", sign, ratio.label);
        }
    }

    format_fixed(phase, 2)
}

/// Fixed-point text with `digits` decimals, exact ties rounded away from zero.
///
/// Infinite values print as `Infinity` / `-Infinity`.
pub fn format_fixed(value: f64, digits: usize) -> String {
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    // A tie at `digits` decimals is exactly an odd multiple of 2^-(digits+1)
    let halves = value.abs() * 2f64.powi(digits as i32 + 1);
    if halves % 2.0 == 1.0 {
        let scale = 10f64.powi(digits as i32);
        let rounded = (value.abs() * scale).ceil() / scale;
        return format!("{:.*}", digits, rounded.copysign(value));
    }

    format!("{:.*}", digits, value)
}

/// Shortest text for a coefficient; exponent form below 1e-6 and from 1e21
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_infinite() {
        format_fixed(value, 0)
    } else if magnitude != 0.0 && magnitude < 1e-6 {
        format!("{:e}", value)
    } else if magnitude >= 1e21 {
        format!("{:e}", value).replacen('e', "e+", 1)
    } else {
        format!("{}", value)
    }
}

/// Full display string, e.g. `i(t) = 3 sin(314t + π/6)`
pub fn format_function(amplitude: f64, pulsation: f64, phase: f64) -> String {
    let mut phase_str = String::new();

    if phase.abs() > PHASE_DISPLAY_THRESHOLD {
        let formatted = format_phase_with_pi(phase);
        if phase > 0.0 {
            phase_str = format!(" + {}", formatted);
        } else {
            phase_str = format!(" - {}", formatted.replacen('-', "", 1));
        }
    }

    format!(
        "i(t) = {} sin({}t{})",
        format_number(amplitude),
        format_number(pulsation),
        phase_str
    )
}

/// [`format_function`] for a parameter set
pub fn display_signal(signal: &SignalParameters) -> String {
    format_function(signal.amplitude, signal.pulsation, signal.phase)
}
