//! Phasor (Fresnel vector) geometry
//!
//! A signal `a sin(ωt + φ)` is drawn as a vector of length `a * scale`
//! rotating at ω around the diagram centre. Screen y grows downwards, so the
//! vertical component is negated.

use crate::signal::SignalParameters;
use serde::Serialize;
use std::f64::consts::PI;

/// Pixels per unit of amplitude on the reference diagram
pub const DEFAULT_SCALE: f64 = 50.0;

/// Length of the arrowhead sides
pub const ARROW_LENGTH: f64 = 15.0;

/// Half opening angle of the arrowhead
pub const ARROW_ANGLE: f64 = PI / 6.0;

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position of a phasor at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhasorState {
    pub tip_x: f64,
    pub tip_y: f64,
    /// Radius of the circle described by the tip
    pub radius: f64,
    /// Instantaneous phase `ωt + φ` in radians
    pub angle: f64,
}

impl PhasorState {
    pub fn tip(&self) -> Point {
        Point::new(self.tip_x, self.tip_y)
    }
}

/// Phasor of `signal` at time `t` around `center`
pub fn phasor_at(signal: &SignalParameters, t: f64, center: Point, scale: f64) -> PhasorState {
    let angle = signal.pulsation * t + signal.phase;
    let radius = signal.amplitude * scale;

    PhasorState {
        tip_x: center.x + radius * angle.cos(),
        tip_y: center.y - radius * angle.sin(),
        radius,
        angle,
    }
}

/// The two back corners of an arrowhead pointing from `from` to `tip`
pub fn arrowhead(from: Point, tip: Point) -> [Point; 2] {
    let direction = (tip.y - from.y).atan2(tip.x - from.x);

    [
        Point::new(
            tip.x - ARROW_LENGTH * (direction - ARROW_ANGLE).cos(),
            tip.y - ARROW_LENGTH * (direction - ARROW_ANGLE).sin(),
        ),
        Point::new(
            tip.x - ARROW_LENGTH * (direction + ARROW_ANGLE).cos(),
            tip.y - ARROW_LENGTH * (direction + ARROW_ANGLE).sin(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point { x: 250.0, y: 250.0 };

    #[test]
    fn test_tip_at_phase_origin() {
        let signal = SignalParameters::new(1.0, 0.0, 0.0);
        let state = phasor_at(&signal, 0.0, CENTER, DEFAULT_SCALE);

        assert_eq!(state.tip_x, CENTER.x + DEFAULT_SCALE);
        assert_eq!(state.tip_y, CENTER.y);
        assert_eq!(state.radius, 50.0);
        assert_eq!(state.angle, 0.0);
    }

    #[test]
    fn test_positive_phase_points_up() {
        let signal = SignalParameters::new(2.0, 0.0, PI / 2.0);
        let state = phasor_at(&signal, 0.0, CENTER, 10.0);

        assert!((state.tip_x - CENTER.x).abs() < 1e-9);
        assert!((state.tip_y - (CENTER.y - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_with_time() {
        let signal = SignalParameters::new(1.0, 314.0, 0.0);
        let t = PI / 314.0;
        let state = phasor_at(&signal, t, CENTER, DEFAULT_SCALE);

        assert!((state.angle - PI).abs() < 1e-12);
        assert!((state.tip_x - (CENTER.x - 50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_scale_is_injectable() {
        let signal = SignalParameters::new(3.0, 0.0, 0.0);
        let state = phasor_at(&signal, 0.0, Point::new(0.0, 0.0), 20.0);
        assert_eq!(state.radius, 60.0);
        assert_eq!(state.tip(), Point::new(60.0, 0.0));
    }

    #[test]
    fn test_vertical_projection_matches_value() {
        // The tip height above the centre is the instantaneous value
        let signal = SignalParameters::new(4.0, 314.0, -PI / 6.0);
        for i in 0..10 {
            let t = i as f64 * 0.001;
            let state = phasor_at(&signal, t, CENTER, 1.0);
            assert!(((CENTER.y - state.tip_y) - signal.value(t)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_arrowhead_symmetric_about_shaft() {
        let [left, right] = arrowhead(Point::new(0.0, 0.0), Point::new(100.0, 0.0));

        assert!((left.x - right.x).abs() < 1e-9);
        assert!((left.y + right.y).abs() < 1e-9);
        assert!((left.x - (100.0 - ARROW_LENGTH * ARROW_ANGLE.cos())).abs() < 1e-9);
    }
}
