//! Parser for user-entered sinusoidal functions
//!
//! Accepts the constrained grammar `[a]*sin([ω]*t[±φ])`, ignoring case and
//! whitespace. The phase term may be written as a fraction of π
//! (`pi/6`, `3*π/4`), a multiple of π (`2pi`) or plain radians (`0.5`).

use crate::signal::SignalParameters;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, eof, map, map_res, opt, recognize},
    sequence::{pair, tuple},
    IResult,
};
use std::f64::consts::PI;
use std::fmt;
use std::panic;
use tracing::debug;

/// Largest accepted |amplitude|
pub const MAX_AMPLITUDE: f64 = 20.0;

/// Largest accepted |pulsation| in rad/s
pub const MAX_PULSATION: f64 = 1000.0;

/// Reasons a function can be rejected, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Input does not match `a*sin(ω*t + φ)`
    InvalidFormat,
    /// A coefficient or the phase is not a usable number
    InvalidNumber,
    /// |amplitude| above [`MAX_AMPLITUDE`]
    AmplitudeOutOfRange,
    /// |pulsation| above [`MAX_PULSATION`]
    PulsationOutOfRange,
    /// Unexpected failure while analyzing the input
    Internal,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidFormat => write!(f, "Invalid format. Use format: a*sin(ω*t + φ)"),
            ParseError::InvalidNumber => write!(f, "Invalid numeric values"),
            ParseError::AmplitudeOutOfRange => write!(f, "Amplitude must be less than 20"),
            ParseError::PulsationOutOfRange => {
                write!(f, "Pulsation must be less than 1000 rad/s")
            }
            ParseError::Internal => write!(f, "Error while analyzing the function"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type for function parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// Matched pieces of a function, still as text
#[derive(Debug, PartialEq)]
struct RawFunction<'a> {
    amplitude: &'a str,
    pulsation: &'a str,
    phase: Option<&'a str>,
}

/// Optionally signed decimal coefficient; may be empty, `+`, `-` or `.`
fn coefficient(input: &str) -> IResult<&str, &str> {
    recognize(tuple((opt(one_of("+-")), digit0, opt(char('.')), digit0)))(input)
}

/// Unsigned decimal, possibly empty
fn unsigned_coefficient(input: &str) -> IResult<&str, &str> {
    recognize(tuple((digit0, opt(char('.')), digit0)))(input)
}

/// Signed phase term: everything between the sign and the closing paren
fn phase_term(input: &str) -> IResult<&str, &str> {
    recognize(pair(one_of("+-"), take_till1(|c: char| c == ')')))(input)
}

fn sin_function(input: &str) -> IResult<&str, RawFunction<'_>> {
    let (input, amplitude) = coefficient(input)?;
    let (input, _) = opt(char('*'))(input)?;
    let (input, _) = tag("sin(")(input)?;
    let (input, pulsation) = coefficient(input)?;
    let (input, _) = opt(char('*'))(input)?;
    let (input, _) = char('t')(input)?;
    let (input, phase) = opt(phase_term)(input)?;
    let (input, _) = char(')')(input)?;
    let (input, _) = eof(input)?;

    Ok((
        input,
        RawFunction {
            amplitude,
            pulsation,
            phase,
        },
    ))
}

/// `[a][*]π/b` with an integer or decimal denominator
fn pi_fraction(input: &str) -> IResult<&str, (&str, f64)> {
    let denominator = map_res(
        recognize(tuple((digit1, opt(char('.')), digit0))),
        |s: &str| s.parse::<f64>(),
    );
    all_consuming(map(
        tuple((
            unsigned_coefficient,
            opt(char('*')),
            char('π'),
            char('/'),
            denominator,
        )),
        |(numerator, _, _, _, denominator)| (numerator, denominator),
    ))(input)
}

/// `[a][*]π`
fn pi_multiple(input: &str) -> IResult<&str, &str> {
    all_consuming(map(
        tuple((unsigned_coefficient, opt(char('*')), char('π'))),
        |(coefficient, _, _)| coefficient,
    ))(input)
}

/// Leading decimal numeral, trailing text ignored (`1.5x` reads as 1.5)
fn leading_float(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Numeric value of a coefficient; an empty or `+` coefficient means 1
fn coefficient_value(raw: &str) -> f64 {
    match raw {
        "" | "+" => 1.0,
        "-" => -1.0,
        _ => raw.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Coefficient in front of π, defaulting to 1 when omitted
fn pi_coefficient_value(raw: &str) -> f64 {
    if raw.is_empty() {
        1.0
    } else {
        raw.parse::<f64>().unwrap_or(f64::NAN)
    }
}

/// Evaluate a phase term such as `+pi/6`, `-2π` or `+0.5` in radians.
///
/// Returns NaN when the term is none of the accepted shapes.
pub fn evaluate_phase(phase: &str) -> f64 {
    let phase: String = phase.chars().filter(|c| !c.is_whitespace()).collect();

    let (sign, rest) = if let Some(rest) = phase.strip_prefix('+') {
        (1.0, rest)
    } else if let Some(rest) = phase.strip_prefix('-') {
        (-1.0, rest)
    } else {
        (1.0, phase.as_str())
    };

    let rest = rest.replace("pi", "π");

    if let Ok((_, (numerator, denominator))) = pi_fraction(&rest) {
        return sign * (pi_coefficient_value(numerator) * PI / denominator);
    }

    if let Ok((_, coefficient)) = pi_multiple(&rest) {
        return sign * pi_coefficient_value(coefficient) * PI;
    }

    match leading_float(&rest) {
        Ok((_, value)) => sign * value,
        Err(_) => f64::NAN,
    }
}

fn parse_cleaned(cleaned: &str) -> ParseResult<SignalParameters> {
    let (_, raw) = sin_function(cleaned).map_err(|_| ParseError::InvalidFormat)?;

    let amplitude = coefficient_value(raw.amplitude);
    let pulsation = coefficient_value(raw.pulsation);
    let phase = raw.phase.map(evaluate_phase).unwrap_or(0.0);

    if amplitude.is_nan() || pulsation.is_nan() || phase.is_nan() {
        return Err(ParseError::InvalidNumber);
    }

    if amplitude.abs() > MAX_AMPLITUDE {
        return Err(ParseError::AmplitudeOutOfRange);
    }

    if pulsation.abs() > MAX_PULSATION {
        return Err(ParseError::PulsationOutOfRange);
    }

    // Signs of amplitude and pulsation are dropped; the phase keeps its sign
    Ok(SignalParameters::new(amplitude.abs(), pulsation.abs(), phase))
}

/// Parse a function like `3*sin(314*t + pi/6)` into signal parameters
pub fn parse_function(input: &str) -> ParseResult<SignalParameters> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let result =
        panic::catch_unwind(|| parse_cleaned(&cleaned)).unwrap_or(Err(ParseError::Internal));

    match &result {
        Ok(params) => debug!(
            "Parsed {:?}: a={} ω={} φ={}",
            input, params.amplitude, params.pulsation, params.phase
        ),
        Err(e) => debug!("Rejected {:?}: {}", input, e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_coefficient() {
        assert_eq!(coefficient("3.5*sin"), Ok(("*sin", "3.5")));
        assert_eq!(coefficient("-sin"), Ok(("sin", "-")));
        assert_eq!(coefficient("sin"), Ok(("sin", "")));
        assert_eq!(coefficient("+.5t"), Ok(("t", "+.5")));
    }

    #[test]
    fn test_sin_function_pieces() {
        let (rest, raw) = sin_function("3*sin(314*t+π/6)").unwrap();
        assert_eq!(rest, "");
        assert_eq!(
            raw,
            RawFunction {
                amplitude: "3",
                pulsation: "314",
                phase: Some("+π/6"),
            }
        );

        let (_, raw) = sin_function("sin(t)").unwrap();
        assert_eq!(raw.amplitude, "");
        assert_eq!(raw.pulsation, "");
        assert_eq!(raw.phase, None);
    }

    #[test]
    fn test_sin_function_rejects_trailing_text() {
        assert!(sin_function("sin(t)+1").is_err());
        assert!(sin_function("sin(t))").is_err());
        assert!(sin_function("sin(t+)").is_err());
        assert!(sin_function("cos(t)").is_err());
    }

    #[test]
    fn test_coefficient_value() {
        assert_eq!(coefficient_value(""), 1.0);
        assert_eq!(coefficient_value("+"), 1.0);
        assert_eq!(coefficient_value("-"), -1.0);
        assert_eq!(coefficient_value("-2.5"), -2.5);
        assert_eq!(coefficient_value("5."), 5.0);
        assert!(coefficient_value(".").is_nan());
        assert!(coefficient_value("-.").is_nan());
    }

    #[test]
    fn test_evaluate_phase_fractions() {
        assert!(approx(evaluate_phase("+pi/6"), PI / 6.0));
        assert!(approx(evaluate_phase("-π/4"), -PI / 4.0));
        assert!(approx(evaluate_phase("+3*pi/4"), 3.0 * PI / 4.0));
        assert!(approx(evaluate_phase("+5π/12"), 5.0 * PI / 12.0));
        assert!(approx(evaluate_phase("+pi/2.5"), PI / 2.5));
    }

    #[test]
    fn test_evaluate_phase_multiples() {
        assert!(approx(evaluate_phase("+pi"), PI));
        assert!(approx(evaluate_phase("-2pi"), -2.0 * PI));
        assert!(approx(evaluate_phase("+0.5*π"), 0.5 * PI));
    }

    #[test]
    fn test_evaluate_phase_radians() {
        assert!(approx(evaluate_phase("+0.25"), 0.25));
        assert!(approx(evaluate_phase("-1.5"), -1.5));
        assert!(approx(evaluate_phase("+1e-1"), 0.1));
        assert!(approx(evaluate_phase("+1.5x"), 1.5));
        assert!(approx(evaluate_phase("--1"), 1.0));
    }

    #[test]
    fn test_evaluate_phase_invalid() {
        assert!(evaluate_phase("+abc").is_nan());
        assert!(evaluate_phase("+π/").is_nan());
        assert!(evaluate_phase("+.*pi").is_nan());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ParseError::InvalidFormat.to_string(),
            "Invalid format. Use format: a*sin(ω*t + φ)"
        );
        assert_eq!(ParseError::InvalidNumber.to_string(), "Invalid numeric values");
        assert_eq!(
            ParseError::AmplitudeOutOfRange.to_string(),
            "Amplitude must be less than 20"
        );
        assert_eq!(
            ParseError::PulsationOutOfRange.to_string(),
            "Pulsation must be less than 1000 rad/s"
        );
        assert_eq!(
            ParseError::Internal.to_string(),
            "Error while analyzing the function"
        );
    }

    #[test]
    fn test_parse_simplest() {
        let params = parse_function("sin(t)").unwrap();
        assert_eq!(params, SignalParameters::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_full() {
        let params = parse_function("3*sin(314*t + pi/6)").unwrap();
        assert_eq!(params.amplitude, 3.0);
        assert_eq!(params.pulsation, 314.0);
        assert!((params.phase - 0.5236).abs() < 1e-4);
    }

    #[test]
    fn test_parse_signs() {
        let params = parse_function("-2*sin(-5*t-pi/4)").unwrap();
        assert_eq!(params.amplitude, 2.0);
        assert_eq!(params.pulsation, 5.0);
        assert!(approx(params.phase, -PI / 4.0));

        let params = parse_function("-sin(-t)").unwrap();
        assert_eq!(params.amplitude, 1.0);
        assert_eq!(params.pulsation, 1.0);
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        let params = parse_function("  4.3 * SIN ( 314 * T + PI / 30 ) ").unwrap();
        assert_eq!(params.amplitude, 4.3);
        assert_eq!(params.pulsation, 314.0);
        assert!(approx(params.phase, PI / 30.0));
    }

    #[test]
    fn test_parse_without_stars() {
        let params = parse_function("3sin(314t+2π)").unwrap();
        assert_eq!(params.amplitude, 3.0);
        assert_eq!(params.pulsation, 314.0);
        assert!(approx(params.phase, 2.0 * PI));
    }

    #[test]
    fn test_parse_invalid_format() {
        assert_eq!(parse_function("foo"), Err(ParseError::InvalidFormat));
        assert_eq!(parse_function(""), Err(ParseError::InvalidFormat));
        assert_eq!(parse_function("3*cos(t)"), Err(ParseError::InvalidFormat));
        assert_eq!(parse_function("sin(2*x)"), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn test_parse_invalid_numbers() {
        assert_eq!(parse_function(".*sin(t)"), Err(ParseError::InvalidNumber));
        assert_eq!(parse_function("sin(.t)"), Err(ParseError::InvalidNumber));
        assert_eq!(parse_function("sin(t+abc)"), Err(ParseError::InvalidNumber));
    }

    #[test]
    fn test_parse_infinite_phase_accepted() {
        let params = parse_function("sin(t+pi/0)").unwrap();
        assert_eq!(params.phase, f64::INFINITY);
        assert_eq!((params.amplitude, params.pulsation), (1.0, 1.0));

        let params = parse_function("sin(t+1e999)").unwrap();
        assert_eq!(params.phase, f64::INFINITY);

        let params = parse_function("sin(t-pi/0)").unwrap();
        assert_eq!(params.phase, f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_amplitude_bounds() {
        assert!(parse_function("20*sin(t)").is_ok());
        assert!(parse_function("-20*sin(t)").is_ok());
        assert_eq!(
            parse_function("20.01*sin(t)"),
            Err(ParseError::AmplitudeOutOfRange)
        );
        assert_eq!(
            parse_function("21*sin(t)"),
            Err(ParseError::AmplitudeOutOfRange)
        );
    }

    #[test]
    fn test_parse_pulsation_bounds() {
        assert!(parse_function("sin(1000*t)").is_ok());
        assert_eq!(
            parse_function("sin(1001*t)"),
            Err(ParseError::PulsationOutOfRange)
        );
        assert_eq!(
            parse_function("sin(-1000.5*t)"),
            Err(ParseError::PulsationOutOfRange)
        );
    }

    #[test]
    fn test_number_check_precedes_range_checks() {
        // Out-of-range amplitude but invalid phase: the number check wins
        assert_eq!(
            parse_function("50*sin(t+xyz)"),
            Err(ParseError::InvalidNumber)
        );
        // Both ranges exceeded: amplitude is reported first
        assert_eq!(
            parse_function("50*sin(5000*t)"),
            Err(ParseError::AmplitudeOutOfRange)
        );
    }
}
