//! Arena boundary geometry
//!
//! Two shapes, one per simulation:
//! - Circle: center, radius and an angular gap (optionally rotating)
//! - Square: center, side length and a horizontal gap interval
//!
//! Angles follow screen coordinates (y down), so positive angles run
//! clockwise on screen. All angles are radians in [0, 2π).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GAP_ANGLE_EPSILON;
use crate::normalize_angle;

/// Angular opening in a circular wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapArc {
    /// Start angle (radians, [0, 2π))
    pub start: f32,
    /// Angular width (radians, never changes after construction)
    width: f32,
}

impl GapArc {
    pub fn new(start: f32, width: f32) -> Self {
        Self {
            start: normalize_angle(start),
            width,
        }
    }

    /// Gap from start/end angles in degrees (end may wrap past 360)
    pub fn from_degrees(start_deg: f32, end_deg: f32) -> Self {
        let width_deg = (end_deg - start_deg).rem_euclid(360.0);
        Self::new(start_deg.to_radians(), width_deg.to_radians())
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// End angle (handles wraparound)
    pub fn end(&self) -> f32 {
        normalize_angle(self.start + self.width)
    }

    /// Check if an angle lies in [start, end], inclusive, across 0/2π
    pub fn contains_angle(&self, theta: f32) -> bool {
        let offset = normalize_angle(theta - self.start);
        // An angle a hair below start wraps to just under 2π
        offset <= self.width + GAP_ANGLE_EPSILON
            || offset >= std::f32::consts::TAU - GAP_ANGLE_EPSILON
    }

    /// Move the gap so it opens at `start`; the width is kept
    pub fn set_start(&mut self, start: f32) {
        self.start = normalize_angle(start);
    }
}

/// Circular wall with a gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleBoundary {
    pub center: Vec2,
    pub radius: f32,
    pub gap: GapArc,
    /// Gap rotation per tick (degrees, 0 = static)
    #[serde(default)]
    pub rotation_deg_per_tick: f32,
    /// Gap start before any rotation (degrees)
    gap_origin_deg: f64,
    /// Rotation steps applied so far
    #[serde(default)]
    rotation_steps: u64,
}

impl CircleBoundary {
    pub fn new(center: Vec2, radius: f32, gap: GapArc) -> Self {
        Self {
            center,
            radius,
            gap,
            rotation_deg_per_tick: 0.0,
            gap_origin_deg: f64::from(gap.start).to_degrees(),
            rotation_steps: 0,
        }
    }

    pub fn with_rotation_degrees(mut self, deg_per_tick: f32) -> Self {
        self.rotation_deg_per_tick = deg_per_tick;
        self
    }

    /// Rotate the gap by one step
    ///
    /// The start is recomputed from the origin and the step count, so
    /// `start = (origin + n * rate) mod 360°` holds for any number of steps.
    pub fn rotate_gap(&mut self) {
        self.rotation_steps += 1;
        let deg = (self.gap_origin_deg
            + self.rotation_steps as f64 * f64::from(self.rotation_deg_per_tick))
        .rem_euclid(360.0);
        self.gap.set_start(deg.to_radians() as f32);
    }

    #[inline]
    pub fn contains(&self, pos: Vec2, body_radius: f32) -> bool {
        pos.distance(self.center) <= self.radius - body_radius
    }
}

/// Which horizontal edges the square's gap column cuts through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapEdges {
    Top,
    Bottom,
    #[default]
    Both,
}

impl GapEdges {
    pub fn includes_top(self) -> bool {
        matches!(self, GapEdges::Top | GapEdges::Both)
    }

    pub fn includes_bottom(self) -> bool {
        matches!(self, GapEdges::Bottom | GapEdges::Both)
    }
}

/// Axis-aligned square wall with a gap in its horizontal edge(s)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquareBoundary {
    pub center: Vec2,
    pub side: f32,
    /// Gap interval on the x axis, inclusive
    pub gap_start_x: f32,
    pub gap_end_x: f32,
    #[serde(default)]
    pub gap_edges: GapEdges,
}

impl SquareBoundary {
    /// Square with a gap of `gap_width` centred on the square's x
    pub fn new(center: Vec2, side: f32, gap_width: f32) -> Self {
        Self {
            center,
            side,
            gap_start_x: center.x - gap_width / 2.0,
            gap_end_x: center.x + gap_width / 2.0,
            gap_edges: GapEdges::default(),
        }
    }

    pub fn with_gap_edges(mut self, gap_edges: GapEdges) -> Self {
        self.gap_edges = gap_edges;
        self
    }

    #[inline]
    pub fn half_side(&self) -> f32 {
        self.side / 2.0
    }

    /// Allowed range for a body center on both axes, relative to center
    #[inline]
    pub fn inner_half_extent(&self, body_radius: f32) -> f32 {
        self.half_side() - body_radius
    }

    pub fn contains(&self, pos: Vec2, body_radius: f32) -> bool {
        let d = (pos - self.center).abs();
        let limit = self.inner_half_extent(body_radius);
        d.x <= limit && d.y <= limit
    }

    #[inline]
    pub fn gap_contains_x(&self, x: f32) -> bool {
        x >= self.gap_start_x && x <= self.gap_end_x
    }
}

/// The containing shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Boundary {
    Circle(CircleBoundary),
    Square(SquareBoundary),
}

impl Boundary {
    pub fn center(&self) -> Vec2 {
        match self {
            Boundary::Circle(c) => c.center,
            Boundary::Square(s) => s.center,
        }
    }

    /// Whether a body of `body_radius` at `pos` lies entirely inside
    pub fn contains(&self, pos: Vec2, body_radius: f32) -> bool {
        match self {
            Boundary::Circle(c) => c.contains(pos, body_radius),
            Boundary::Square(s) => s.contains(pos, body_radius),
        }
    }

    /// Launch point: top of the boundary, `margin` inside the wall
    pub fn spawn_point(&self, margin: f32) -> Vec2 {
        match self {
            Boundary::Circle(c) => Vec2::new(c.center.x, c.center.y - c.radius + margin),
            Boundary::Square(s) => Vec2::new(s.center.x, s.center.y - s.half_side() + margin),
        }
    }

    /// Per-tick boundary motion (rotating gap only)
    pub fn advance(&mut self) {
        if let Boundary::Circle(c) = self {
            if c.rotation_deg_per_tick != 0.0 {
                c.rotate_gap();
            }
        }
    }

    pub fn as_circle(&self) -> Option<&CircleBoundary> {
        match self {
            Boundary::Circle(c) => Some(c),
            Boundary::Square(_) => None,
        }
    }
}
