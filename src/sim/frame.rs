//! Per-tick snapshot handed to renderers
//!
//! Renderers only read; nothing flows back into the simulation.

use glam::Vec2;
use serde::Serialize;

use super::body::Body;
use super::boundary::{Boundary, GapEdges};

/// Current boundary geometry, gap resolved to concrete bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BoundaryView {
    Circle {
        center: Vec2,
        radius: f32,
        /// Gap bounds in radians ([0, 2π), end may be below start when wrapped)
        gap_start: f32,
        gap_end: f32,
        gap_start_deg: f32,
        gap_end_deg: f32,
    },
    Square {
        center: Vec2,
        side: f32,
        gap_start_x: f32,
        gap_end_x: f32,
        gap_edges: GapEdges,
    },
}

impl From<&Boundary> for BoundaryView {
    fn from(boundary: &Boundary) -> Self {
        match boundary {
            Boundary::Circle(c) => BoundaryView::Circle {
                center: c.center,
                radius: c.radius,
                gap_start: c.gap.start,
                gap_end: c.gap.end(),
                gap_start_deg: c.gap.start.to_degrees(),
                gap_end_deg: c.gap.end().to_degrees(),
            },
            Boundary::Square(s) => BoundaryView::Square {
                center: s.center,
                side: s.side,
                gap_start_x: s.gap_start_x,
                gap_end_x: s.gap_end_x,
                gap_edges: s.gap_edges,
            },
        }
    }
}

/// Everything needed to draw one tick
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub tick: u64,
    pub population: usize,
    pub escapes: u64,
    pub boundary: BoundaryView,
    pub bodies: &'a [Body],
}

impl<'a> Frame<'a> {
    pub fn new(tick: u64, escapes: u64, boundary: &Boundary, bodies: &'a [Body]) -> Self {
        Self {
            tick,
            population: bodies.len(),
            escapes,
            boundary: BoundaryView::from(boundary),
            bodies,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Preset, SimConfig};
    use crate::sim::Simulation;

    #[test]
    fn test_frame_reports_rotated_gap() {
        let mut sim = Simulation::new(SimConfig::from_preset(Preset::RotatingCircle), 4);
        for _ in 0..10 {
            crate::sim::tick(&mut sim);
        }
        match sim.frame().boundary {
            BoundaryView::Circle {
                gap_start_deg,
                gap_end_deg,
                ..
            } => {
                assert!((gap_start_deg - 55.0).abs() < 1e-3);
                assert!((gap_end_deg - 85.0).abs() < 1e-3);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_frame_json_shape() {
        let sim = Simulation::new(SimConfig::from_preset(Preset::Square), 4);
        let json = sim.frame().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["boundary"]["shape"], "square");
        assert_eq!(value["population"], 1);
        assert_eq!(value["bodies"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["bodies"][0]["radius"], 10.0);
    }
}
