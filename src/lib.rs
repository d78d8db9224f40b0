//! # Fresnel - sinusoidal signals and their phasors
//!
//! Fresnel is the computational side of a teaching visualization: two
//! sinusoidal currents drawn both as time-domain curves and as rotating
//! Fresnel vectors, plus an exercise where the learner types the sum of the
//! two currents as `a*sin(ω*t + φ)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use fresnel::function_parser::parse_function;
//! use fresnel::function_display::display_signal;
//! use fresnel::waveform::WaveformSampler;
//!
//! let signal = parse_function("3*sin(314*t + pi/6)").unwrap();
//! assert_eq!(display_signal(&signal), "i(t) = 3 sin(314t + π/6)");
//!
//! // Three periods, 601 samples
//! let samples = WaveformSampler::for_signal(&signal).sample(&signal);
//! assert_eq!(samples.len(), 601);
//! ```
//!
//! ## Architecture
//!
//! - [`signal`] - signal parameters, value and period
//! - [`function_parser`] - text to parameters, with a fixed error vocabulary
//! - [`function_display`] - parameters to `i(t) = a sin(ωt + φ)`
//! - [`waveform`] / [`phasor`] - sampling and vector geometry
//! - [`temporal_graph`] / [`fresnel_diagram`] - canvas layouts
//! - [`animation`] - clock and frame driver
//! - [`exercise`] / [`scene`] - answer checking and what is on screen
//! - [`config`] - TOML configuration
//!
//! Everything except [`animation::AnimationDriver`] is a pure function of
//! the parameters and a time value.

pub mod animation;
pub mod config;
pub mod exercise;
pub mod fresnel_diagram;
pub mod function_display;
pub mod function_parser;
pub mod phasor;
pub mod scene;
pub mod signal;
pub mod temporal_graph;
pub mod waveform;
