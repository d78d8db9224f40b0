//! Time-domain graph layout
//!
//! Maps signal samples onto a canvas of fixed size: vertical axis on the
//! left, time axis along the bottom, one gridline per period. All curves
//! share the time scale of the first active signal.

use crate::function_display::format_fixed;
use crate::phasor::Point;
use crate::signal::SignalParameters;
use crate::waveform::{plot_window, WaveformSampler, PERIODS_SHOWN};
use serde::Serialize;

/// Smallest amplitude the vertical axis covers
pub const MIN_AXIS_AMPLITUDE: f64 = 5.0;

/// A text label anchored at a canvas position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub at: Point,
}

/// Vertical gridline at a multiple of the period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gridline {
    pub x: f64,
    pub label: String,
}

/// Pixel scales shared by every curve of a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotScales {
    /// Pixels per unit of signal value
    pub y_scale: f64,
    /// Pixels per second
    pub time_scale: f64,
}

/// Axis polyline and labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    /// Top of the vertical axis, origin, end of the time axis
    pub polyline: [Point; 3],
    pub labels: Vec<Label>,
}

/// Everything needed to draw one frame of the time-domain graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalLayout {
    pub axes: Axes,
    pub gridlines: Vec<Gridline>,
    pub curves: Vec<Vec<Point>>,
    /// Marker of each signal at the current time, `None` when off-canvas
    pub current_points: Vec<Option<Point>>,
}

/// Canvas geometry of the time-domain graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalGraph {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for TemporalGraph {
    fn default() -> Self {
        Self::new(800.0, 400.0, 50.0)
    }
}

/// Largest amplitude among `signals`, never below [`MIN_AXIS_AMPLITUDE`]
pub fn max_amplitude(signals: &[SignalParameters]) -> f64 {
    signals
        .iter()
        .map(|s| s.amplitude)
        .fold(MIN_AXIS_AMPLITUDE, f64::max)
}

impl TemporalGraph {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn scales(&self, max_amplitude: f64, period: f64) -> PlotScales {
        PlotScales {
            y_scale: (self.height - 2.0 * self.padding) / (2.0 * max_amplitude),
            time_scale: self.plot_width() / plot_window(period),
        }
    }

    /// Canvas position of value `value` at time `t`
    pub fn project(&self, t: f64, value: f64, scales: &PlotScales) -> Point {
        Point::new(
            self.padding + t * scales.time_scale,
            self.center_y() - value * scales.y_scale,
        )
    }

    pub fn axes(&self, max_amplitude: f64) -> Axes {
        let p = self.padding;
        let label_x = p - 10.0;

        Axes {
            polyline: [
                Point::new(p, p),
                Point::new(p, self.height - p),
                Point::new(self.width - p, self.height - p),
            ],
            labels: vec![
                Label {
                    text: "t (s)".to_string(),
                    at: Point::new(self.width - p + 20.0, self.height - p + 5.0),
                },
                Label {
                    text: "i (A)".to_string(),
                    at: Point::new(15.0, self.center_y()),
                },
                Label {
                    text: format_fixed(max_amplitude, 1),
                    at: Point::new(label_x, p + 5.0),
                },
                Label {
                    text: "0".to_string(),
                    at: Point::new(label_x, self.center_y() + 5.0),
                },
                Label {
                    text: format_fixed(-max_amplitude, 1),
                    at: Point::new(label_x, self.height - p + 5.0),
                },
            ],
        }
    }

    /// One gridline per period from 0 to three periods; none without a period
    pub fn gridlines(&self, period: f64) -> Vec<Gridline> {
        if period <= 0.0 {
            return Vec::new();
        }

        let time_scale = self.plot_width() / (PERIODS_SHOWN * period);
        (0..=3)
            .map(|i| {
                let t = i as f64 * period;
                Gridline {
                    x: self.padding + t * time_scale,
                    label: format_fixed(t, 4),
                }
            })
            .filter(|line| line.x <= self.width - self.padding)
            .collect()
    }

    pub fn curve(
        &self,
        signal: &SignalParameters,
        sampler: &WaveformSampler,
        scales: &PlotScales,
    ) -> Vec<Point> {
        sampler
            .sample(signal)
            .iter()
            .map(|s| self.project(s.time, s.value, scales))
            .collect()
    }

    /// Marker at `time`, hidden once it leaves the plotted area or has no value
    pub fn current_point(
        &self,
        signal: &SignalParameters,
        time: f64,
        scales: &PlotScales,
    ) -> Option<Point> {
        let point = self.project(time, signal.value(time), scales);
        if point.y.is_finite() && point.x >= self.padding && point.x <= self.width - self.padding {
            Some(point)
        } else {
            None
        }
    }

    /// Lay out a frame; the first signal sets the time axis for all curves
    pub fn layout(&self, signals: &[SignalParameters], time: f64) -> Option<TemporalLayout> {
        let first = signals.first()?;
        let period = first.period();
        let max_amp = max_amplitude(signals);
        let scales = self.scales(max_amp, period);
        let sampler = WaveformSampler::new(plot_window(period));

        Some(TemporalLayout {
            axes: self.axes(max_amp),
            gridlines: self.gridlines(period),
            curves: signals
                .iter()
                .map(|s| self.curve(s, &sampler, &scales))
                .collect(),
            current_points: signals
                .iter()
                .map(|s| self.current_point(s, time, &scales))
                .collect(),
        })
    }
}
