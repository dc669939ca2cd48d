//! Simulation settings
//!
//! Three presets mirror the classic arenas; any field can be overridden from
//! a JSON file.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::boundary::{Boundary, CircleBoundary, GapArc, GapEdges, SquareBoundary};
use crate::sim::collision::NudgeMode;

/// Errors from loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Built-in arena layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Circle,
    RotatingCircle,
    Square,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Circle, Preset::RotatingCircle, Preset::Square];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Circle => "circle",
            Preset::RotatingCircle => "rotating",
            Preset::Square => "square",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circle" => Some(Preset::Circle),
            "rotating" | "rotating_circle" | "rotate" => Some(Preset::RotatingCircle),
            "square" => Some(Preset::Square),
            _ => None,
        }
    }
}

/// Boundary shape and gap, in world units and degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BoundaryConfig {
    Circle {
        center: Vec2,
        radius: f32,
        gap_start_deg: f32,
        gap_end_deg: f32,
        /// Gap rotation (degrees per tick, 0 = static)
        #[serde(default)]
        rotation_deg_per_tick: f32,
    },
    Square {
        center: Vec2,
        side: f32,
        gap_width: f32,
        #[serde(default)]
        gap_edges: GapEdges,
    },
}

/// Full simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Width/height of the world the arena sits in (for renderers)
    pub world_size: Vec2,
    pub boundary: BoundaryConfig,
    pub body_radius: f32,
    /// Launch speed of every new body
    pub speed: f32,
    /// Added to vy every tick
    pub gravity: f32,
    /// Half-range of the uniform jitter added to each velocity component on a circular bounce
    pub perturbation: f32,
    /// Position correction after a circular bounce
    pub nudge: NudgeMode,
    /// How far below the top of the wall bodies spawn
    pub spawn_margin: f32,
    /// Fixed delay between ticks in the main loop
    pub tick_delay_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Circle)
    }
}

impl SimConfig {
    /// Create a configuration for one of the built-in arenas
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self {
            world_size: Vec2::new(800.0, 600.0),
            boundary: BoundaryConfig::Circle {
                center: Vec2::new(400.0, 300.0),
                radius: 200.0,
                gap_start_deg: 45.0,
                gap_end_deg: 75.0,
                rotation_deg_per_tick: 0.0,
            },
            body_radius: BODY_RADIUS,
            speed: 10.0,
            gravity: GRAVITY,
            perturbation: 0.1,
            nudge: NudgeMode::None,
            spawn_margin: SPAWN_MARGIN,
            tick_delay_ms: TICK_DELAY_MS,
        };

        match preset {
            Preset::Circle => base,
            Preset::RotatingCircle => Self {
                world_size: Vec2::new(400.0, 600.0),
                boundary: BoundaryConfig::Circle {
                    center: Vec2::new(200.0, 300.0),
                    radius: 190.0,
                    gap_start_deg: 45.0,
                    gap_end_deg: 75.0,
                    rotation_deg_per_tick: 1.0,
                },
                perturbation: 0.05,
                nudge: NudgeMode::Normal,
                ..base
            },
            Preset::Square => Self {
                boundary: BoundaryConfig::Square {
                    center: Vec2::new(400.0, 300.0),
                    side: 400.0,
                    gap_width: 60.0,
                    gap_edges: GapEdges::Both,
                },
                speed: 3.0,
                perturbation: 0.0,
                ..base
            },
        }
    }

    /// Build the runtime boundary from this configuration
    pub fn build_boundary(&self) -> Boundary {
        match self.boundary {
            BoundaryConfig::Circle {
                center,
                radius,
                gap_start_deg,
                gap_end_deg,
                rotation_deg_per_tick,
            } => Boundary::Circle(
                CircleBoundary::new(center, radius, GapArc::from_degrees(gap_start_deg, gap_end_deg))
                    .with_rotation_degrees(rotation_deg_per_tick),
            ),
            BoundaryConfig::Square {
                center,
                side,
                gap_width,
                gap_edges,
            } => Boundary::Square(SquareBoundary::new(center, side, gap_width).with_gap_edges(gap_edges)),
        }
    }

    /// Check that the configuration describes a runnable arena
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(msg: String) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg))
        }

        if !(self.body_radius.is_finite() && self.body_radius > 0.0) {
            return invalid(format!("body_radius must be positive, got {}", self.body_radius));
        }
        for (name, value) in [
            ("speed", self.speed),
            ("gravity", self.gravity),
            ("perturbation", self.perturbation),
            ("spawn_margin", self.spawn_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} must be finite and non-negative, got {value}"));
            }
        }

        // A freshly spawned body must fit inside the wall
        let needed = self.body_radius.max(self.spawn_margin);
        match self.boundary {
            BoundaryConfig::Circle {
                radius,
                gap_start_deg,
                gap_end_deg,
                rotation_deg_per_tick,
                ..
            } => {
                if !(radius.is_finite() && radius > needed) {
                    return invalid(format!("circle radius {radius} cannot hold a body of radius {needed}"));
                }
                if !(gap_start_deg.is_finite() && gap_end_deg.is_finite() && rotation_deg_per_tick.is_finite()) {
                    return invalid("gap angles must be finite".to_string());
                }
                let width = (gap_end_deg - gap_start_deg).rem_euclid(360.0);
                if width <= 0.0 {
                    return invalid(format!(
                        "gap {gap_start_deg}..{gap_end_deg} degrees has no opening"
                    ));
                }
            }
            BoundaryConfig::Square { side, gap_width, .. } => {
                if !(side.is_finite() && side / 2.0 > needed) {
                    return invalid(format!("square side {side} cannot hold a body of radius {needed}"));
                }
                if !(gap_width.is_finite() && gap_width > 0.0 && gap_width <= side) {
                    return invalid(format!("gap width {gap_width} must be in (0, {side}]"));
                }
            }
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}
