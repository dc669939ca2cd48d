//! Ball Chaos - balls bouncing inside a gapped arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, containment, reflection, escapes)
//! - `settings`: Presets and JSON configuration

pub mod settings;
pub mod sim;

pub use settings::{BoundaryConfig, ConfigError, Preset, SimConfig};
pub use sim::{Simulation, TickReport, tick};

use glam::Vec2;

/// Simulation constants (units are pixels and ticks)
pub mod consts {
    /// Downward acceleration added to vy every tick
    pub const GRAVITY: f32 = 0.1;
    /// Radius of every ball
    pub const BODY_RADIUS: f32 = 10.0;
    /// Distance below the top of the boundary where new balls appear
    pub const SPAWN_MARGIN: f32 = 10.0;
    /// Fixed delay between ticks in the main loop
    pub const TICK_DELAY_MS: u64 = 30;
    /// Bodies spawned for every escape
    pub const SPAWNS_PER_ESCAPE: usize = 2;

    /// Slack on the inclusive gap bounds (radians)
    pub const GAP_ANGLE_EPSILON: f32 = 1e-5;
    /// Denominator guard for the legacy push-out
    pub const NUDGE_EPSILON: f32 = 1e-6;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta), theta in [0, 2π)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), normalize_angle(pos.y.atan2(pos.x)))
}
