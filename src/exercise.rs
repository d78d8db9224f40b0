//! Vector addition exercise
//!
//! The learner adds the two reference currents with Fresnel vectors and
//! types the result. A parsed answer is compared against a fixed target;
//! the outcome is reported as [`Feedback`].

use crate::function_display::{display_signal, format_fixed};
use crate::function_parser::{parse_function, ParseError};
use crate::signal::SignalParameters;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

pub const FORMAT_HINT: &str = "Expected format: a*sin(ω*t + φ)";
pub const EXAMPLE_HINT: &str = "Example: 3*sin(314*t + pi/6)";

/// Expected answer with per-parameter tolerances (strict bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetAnswer {
    pub amplitude: f64,
    pub pulsation: f64,
    pub phase: f64,
    pub amplitude_tolerance: f64,
    pub pulsation_tolerance: f64,
    pub phase_tolerance: f64,
}

impl Default for TargetAnswer {
    fn default() -> Self {
        Self {
            amplitude: 4.3,
            pulsation: 314.0,
            phase: PI / 30.0,
            amplitude_tolerance: 0.05,
            pulsation_tolerance: 1.0,
            phase_tolerance: 0.01,
        }
    }
}

impl TargetAnswer {
    pub fn matches(&self, answer: &SignalParameters) -> bool {
        (answer.amplitude - self.amplitude).abs() < self.amplitude_tolerance
            && (answer.pulsation - self.pulsation).abs() < self.pulsation_tolerance
            && (answer.phase - self.phase).abs() < self.phase_tolerance
    }
}

/// Result of checking one answer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Feedback {
    /// Parsed and equal to the target
    Congratulations {
        signal: SignalParameters,
        display: String,
    },
    /// Parsed but not the expected sum
    Validated {
        signal: SignalParameters,
        display: String,
    },
    /// Rejected by the parser
    Error { message: String },
}

impl Feedback {
    pub fn signal(&self) -> Option<&SignalParameters> {
        match self {
            Feedback::Congratulations { signal, .. } | Feedback::Validated { signal, .. } => {
                Some(signal)
            }
            Feedback::Error { .. } => None,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Congratulations { .. })
    }

    fn from_error(error: ParseError) -> Self {
        Feedback::Error {
            message: error.to_string(),
        }
    }
}

fn write_parameters(f: &mut fmt::Formatter<'_>, signal: &SignalParameters) -> fmt::Result {
    writeln!(f, "Amplitude: a = {} A", format_fixed(signal.amplitude, 2))?;
    writeln!(f, "Pulsation: ω = {} rad/s", format_fixed(signal.pulsation, 2))?;
    write!(f, "Initial phase: φ = {} rad", format_fixed(signal.phase, 4))
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Congratulations { signal, display } => {
                writeln!(f, "🎉 Well done!")?;
                writeln!(
                    f,
                    "You correctly added the currents i1 and i2 using Fresnel vectors."
                )?;
                writeln!(f, "{}", display)?;
                write_parameters(f, signal)?;
                writeln!(f, " ≈ π/30")?;
                write!(f, "✓ Vector addition succeeded")
            }
            Feedback::Validated { signal, display } => {
                writeln!(f, "✓ Function validated")?;
                writeln!(f, "{}", display)?;
                write_parameters(f, signal)?;
                writeln!(f)?;
                write!(
                    f,
                    "Incorrect or incomplete expression. Check the amplitude and the phase."
                )
            }
            Feedback::Error { message } => {
                writeln!(f, "✗ Error")?;
                writeln!(f, "{}", message)?;
                writeln!(f, "{}", FORMAT_HINT)?;
                write!(f, "{}", EXAMPLE_HINT)
            }
        }
    }
}

/// Parse `input` and grade it against `target`
pub fn check_answer(input: &str, target: &TargetAnswer) -> Feedback {
    let signal = match parse_function(input) {
        Ok(signal) => signal,
        Err(e) => return Feedback::from_error(e),
    };

    let display = display_signal(&signal);
    if target.matches(&signal) {
        Feedback::Congratulations { signal, display }
    } else {
        Feedback::Validated { signal, display }
    }
}
