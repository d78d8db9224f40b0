//! Fresnel diagram layout
//!
//! Real axis horizontal ("phase origin"), imaginary axis vertical, every
//! active signal drawn as a dashed circle plus a rotating arrow.

use crate::phasor::{arrowhead, phasor_at, PhasorState, Point, DEFAULT_SCALE};
use crate::signal::SignalParameters;
use crate::temporal_graph::Label;
use serde::Serialize;

/// Distance of the axes' ends from the canvas border
const AXIS_MARGIN: f64 = 50.0;

/// Radius of the dot marking the vector tip
pub const TIP_DOT_RADIUS: f64 = 6.0;

/// Straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Both axes with their arrowheads and captions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramAxes {
    pub real: Segment,
    pub imaginary: Segment,
    /// Arrowhead strokes at the positive end of each axis
    pub arrow_strokes: Vec<Segment>,
    pub labels: Vec<Label>,
}

/// One signal's circle and vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhasorDrawing {
    pub state: PhasorState,
    pub arrowhead: [Point; 2],
    pub tip_dot_radius: f64,
}

/// Everything needed to draw one frame of the diagram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramLayout {
    pub center: Point,
    pub axes: DiagramAxes,
    pub phasors: Vec<PhasorDrawing>,
}

/// Canvas geometry of the Fresnel diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FresnelDiagram {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl Default for FresnelDiagram {
    fn default() -> Self {
        Self::new(500.0, 500.0, DEFAULT_SCALE)
    }
}

impl FresnelDiagram {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn axes(&self) -> DiagramAxes {
        let c = self.center();
        let right = Point::new(self.width - AXIS_MARGIN, c.y);
        let top = Point::new(c.x, AXIS_MARGIN);

        let stroke = |from: Point, dx: f64, dy: f64| Segment {
            from,
            to: Point::new(from.x + dx, from.y + dy),
        };

        DiagramAxes {
            real: Segment {
                from: Point::new(AXIS_MARGIN, c.y),
                to: right,
            },
            imaginary: Segment {
                from: top,
                to: Point::new(c.x, self.height - AXIS_MARGIN),
            },
            arrow_strokes: vec![
                stroke(right, -10.0, -5.0),
                stroke(right, -10.0, 5.0),
                stroke(top, -5.0, 10.0),
                stroke(top, 5.0, 10.0),
            ],
            labels: vec![
                Label {
                    text: "Phase origin".to_string(),
                    at: Point::new(self.width - 60.0, c.y - 15.0),
                },
                Label {
                    text: "Imaginary axis".to_string(),
                    at: Point::new(c.x + 20.0, 40.0),
                },
            ],
        }
    }

    pub fn phasor(&self, signal: &SignalParameters, time: f64) -> PhasorDrawing {
        let center = self.center();
        let state = phasor_at(signal, time, center, self.scale);

        PhasorDrawing {
            state,
            arrowhead: arrowhead(center, state.tip()),
            tip_dot_radius: TIP_DOT_RADIUS,
        }
    }

    pub fn layout(&self, signals: &[SignalParameters], time: f64) -> Option<DiagramLayout> {
        if signals.is_empty() {
            return None;
        }

        Some(DiagramLayout {
            center: self.center(),
            axes: self.axes(),
            phasors: signals.iter().map(|s| self.phasor(s, time)).collect(),
        })
    }
}
