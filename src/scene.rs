//! Scene state shared by both canvases
//!
//! Owns which signals are shown (the reference currents and the learner's
//! validated function) and assembles the data a renderer needs for one
//! frame. Nothing here draws; a frame is plain data.

use crate::config::FresnelConfig;
use crate::exercise::{check_answer, Feedback, TargetAnswer};
use crate::fresnel_diagram::{DiagramLayout, FresnelDiagram};
use crate::signal::SignalParameters;
use crate::temporal_graph::{TemporalGraph, TemporalLayout};
use serde::Serialize;
use tracing::{debug, info};

/// Signal parameters tagged with how to draw them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoredSignal {
    pub label: String,
    /// Opaque to the math; passed through to the renderer
    pub color: String,
    pub params: SignalParameters,
}

impl ColoredSignal {
    pub fn new(label: &str, color: &str, params: SignalParameters) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
            params,
        }
    }
}

/// Data for one render of both canvases; layouts are `None` when nothing is shown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: f64,
    pub signals: Vec<ColoredSignal>,
    pub temporal: Option<TemporalLayout>,
    pub diagram: Option<DiagramLayout>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

pub struct Scene {
    references: Vec<ColoredSignal>,
    visible: Vec<bool>,
    custom: Option<ColoredSignal>,
    show_custom: bool,
    custom_color: String,
    target: TargetAnswer,
    temporal_graph: TemporalGraph,
    fresnel_diagram: FresnelDiagram,
}

impl Scene {
    pub fn new(references: Vec<ColoredSignal>, custom_color: &str, target: TargetAnswer) -> Self {
        let visible = vec![false; references.len()];
        Self {
            references,
            visible,
            custom: None,
            show_custom: false,
            custom_color: custom_color.to_string(),
            target,
            temporal_graph: TemporalGraph::default(),
            fresnel_diagram: FresnelDiagram::default(),
        }
    }

    /// Scene with the configured signals, target and canvas sizes
    pub fn from_config(config: &FresnelConfig) -> crate::config::ConfigResult<Self> {
        let mut scene = Self::new(
            config.reference_signals()?,
            &config.custom_color,
            config.exercise,
        );
        scene.temporal_graph = config.temporal_graph();
        scene.fresnel_diagram = config.fresnel_diagram();
        Ok(scene)
    }

    pub fn references(&self) -> &[ColoredSignal] {
        &self.references
    }

    /// Signal whose period drives the animation loop
    pub fn reference_signal(&self) -> Option<&SignalParameters> {
        self.references.first().map(|s| &s.params)
    }

    pub fn custom_signal(&self) -> Option<&ColoredSignal> {
        self.custom.as_ref()
    }

    /// Flip visibility of reference `index`; `None` if there is no such signal
    pub fn toggle_reference(&mut self, index: usize) -> Option<bool> {
        let shown = self.visible.get_mut(index)?;
        *shown = !*shown;
        debug!(
            "Reference {} is now {}",
            self.references[index].label,
            if *shown { "shown" } else { "hidden" }
        );
        Some(*shown)
    }

    pub fn is_reference_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Check a learner's function.
    ///
    /// A parsed function replaces the custom signal and becomes the only one
    /// shown. A rejected one leaves the scene as it was.
    pub fn validate(&mut self, input: &str) -> Feedback {
        let feedback = check_answer(input, &self.target);

        if let Some(params) = feedback.signal() {
            self.custom = Some(ColoredSignal::new("custom", &self.custom_color, *params));
            self.show_custom = true;
            self.visible.iter_mut().for_each(|shown| *shown = false);
            info!(
                "Custom signal set, correct answer: {}",
                feedback.is_correct()
            );
        }

        feedback
    }

    /// Shown signals: references in order, then the custom one
    pub fn active_signals(&self) -> Vec<ColoredSignal> {
        let mut active: Vec<ColoredSignal> = self
            .references
            .iter()
            .zip(&self.visible)
            .filter(|(_, shown)| **shown)
            .map(|(signal, _)| signal.clone())
            .collect();

        if self.show_custom {
            if let Some(custom) = &self.custom {
                active.push(custom.clone());
            }
        }

        active
    }

    pub fn frame(&self, time: f64) -> Frame {
        let signals = self.active_signals();
        let params: Vec<SignalParameters> = signals.iter().map(|s| s.params).collect();

        Frame {
            time,
            temporal: self.temporal_graph.layout(&params, time),
            diagram: self.fresnel_diagram.layout(&params, time),
            signals,
        }
    }
}
