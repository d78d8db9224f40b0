//! Configuration file
//!
//! TOML layout, every field optional:
//!
//! ```toml
//! custom_color = "#3498db"
//!
//! [animation]
//! time_step = 0.0005
//! frame_interval_ms = 16
//!
//! [temporal_graph]
//! width = 800.0
//! height = 400.0
//! padding = 50.0
//!
//! [fresnel_diagram]
//! width = 500.0
//! height = 500.0
//! scale = 50.0
//!
//! [exercise]
//! amplitude = 4.3
//! pulsation = 314.0
//!
//! [[signals]]
//! name = "i1"
//! function = "3*sin(314*t + 5*pi/12)"
//! color = "#e74c3c"
//! ```

use crate::exercise::TargetAnswer;
use crate::fresnel_diagram::FresnelDiagram;
use crate::function_parser::parse_function;
use crate::scene::ColoredSignal;
use crate::temporal_graph::TemporalGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid TOML for this layout
    Toml(toml::de::Error),
    /// Values parsed but make no sense
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Toml(e) => write!(f, "TOML error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub time_step: f64,
    pub frame_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time_step: 0.0005,
            frame_interval_ms: 16,
        }
    }
}

impl AnimationConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalGraphConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for TemporalGraphConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FresnelDiagramConfig {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl Default for FresnelDiagramConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            scale: 50.0,
        }
    }
}

/// A reference signal as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEntry {
    pub name: String,
    /// Same grammar as user answers, e.g. `4*sin(314*t - pi/6)`
    pub function: String,
    pub color: String,
}

fn default_signals() -> Vec<SignalEntry> {
    vec![
        SignalEntry {
            name: "i1".to_string(),
            function: "3*sin(314*t + 5*pi/12)".to_string(),
            color: "#e74c3c".to_string(),
        },
        SignalEntry {
            name: "i2".to_string(),
            function: "4*sin(314*t - pi/6)".to_string(),
            color: "#27ae60".to_string(),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FresnelConfig {
    /// Color of the learner's validated signal
    pub custom_color: String,
    pub animation: AnimationConfig,
    pub temporal_graph: TemporalGraphConfig,
    pub fresnel_diagram: FresnelDiagramConfig,
    pub exercise: TargetAnswer,
    /// Reference signals; the first one also sets the animation loop
    pub signals: Vec<SignalEntry>,
}

impl Default for FresnelConfig {
    fn default() -> Self {
        Self {
            custom_color: "#3498db".to_string(),
            animation: AnimationConfig::default(),
            temporal_graph: TemporalGraphConfig::default(),
            fresnel_diagram: FresnelDiagramConfig::default(),
            exercise: TargetAnswer::default(),
            signals: default_signals(),
        }
    }
}

fn require_positive(name: &str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

impl FresnelConfig {
    /// Parse and validate TOML content
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: FresnelConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file that must exist
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given and present, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("animation.time_step", self.animation.time_step)?;
        if self.animation.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation.frame_interval_ms must be positive".to_string(),
            ));
        }

        require_positive("temporal_graph.width", self.temporal_graph.width)?;
        require_positive("temporal_graph.height", self.temporal_graph.height)?;
        let graph = &self.temporal_graph;
        if graph.padding < 0.0 || 2.0 * graph.padding >= graph.width.min(graph.height) {
            return Err(ConfigError::Invalid(
                "temporal_graph.padding leaves no room to plot".to_string(),
            ));
        }

        require_positive("fresnel_diagram.width", self.fresnel_diagram.width)?;
        require_positive("fresnel_diagram.height", self.fresnel_diagram.height)?;
        require_positive("fresnel_diagram.scale", self.fresnel_diagram.scale)?;

        if self.signals.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one reference signal is required".to_string(),
            ));
        }
        self.reference_signals().map(|_| ())
    }

    /// Reference signals with their functions parsed
    pub fn reference_signals(&self) -> ConfigResult<Vec<ColoredSignal>> {
        self.signals
            .iter()
            .map(|entry| {
                let params = parse_function(&entry.function).map_err(|e| {
                    ConfigError::Invalid(format!("signal {}: {}", entry.name, e))
                })?;
                Ok(ColoredSignal::new(&entry.name, &entry.color, params))
            })
            .collect()
    }

    pub fn temporal_graph(&self) -> TemporalGraph {
        TemporalGraph::new(
            self.temporal_graph.width,
            self.temporal_graph.height,
            self.temporal_graph.padding,
        )
    }

    pub fn fresnel_diagram(&self) -> FresnelDiagram {
        FresnelDiagram::new(
            self.fresnel_diagram.width,
            self.fresnel_diagram.height,
            self.fresnel_diagram.scale,
        )
    }
}
