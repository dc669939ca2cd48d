//! Fixed-step simulation tick
//!
//! One tick moves every body once, resolves wall contact and replaces each
//! escaped body with two fresh ones.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::body::Body;
use super::boundary::Boundary;
use super::collision::{
    NudgeMode, circle_crossing, push_out, reflect_circle, reflect_square, square_crossing,
    square_gap_escape,
};
use super::state::Simulation;
use crate::consts::SPAWNS_PER_ESCAPE;
use crate::settings::SimConfig;

/// What happened to a body during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still inside the boundary, nothing else to do
    Contained,
    /// Hit the wall and was sent back inward (already updated in place)
    Reflected,
    /// Outside the wall but already heading back in, velocity untouched
    Inbound,
    /// Left through the gap; the body is finished
    Escaped,
}

/// Per-step physics parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    pub gravity: f32,
    /// Half-range of the uniform jitter added after a circular bounce
    pub perturbation: f32,
    pub nudge: NudgeMode,
}

impl From<&SimConfig> for StepParams {
    fn from(config: &SimConfig) -> Self {
        Self {
            gravity: config.gravity,
            perturbation: config.perturbation,
            nudge: config.nudge,
        }
    }
}

/// Audio/visual cue hooks, fire-and-forget for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    Bounce { body_id: u32 },
    Escape { body_id: u32 },
}

/// Result of one population update
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub events: Vec<SimEvent>,
    /// Bodies removed through the gap
    pub escaped: usize,
    /// Bodies created to replace them
    pub spawned: usize,
}

impl TickReport {
    /// Change in population caused by this tick
    pub fn net_change(&self) -> isize {
        self.spawned as isize - self.escaped as isize
    }

    pub fn bounces(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::Bounce { .. }))
            .count()
    }
}

/// Independent uniform jitter in [-amount, amount] on each axis
fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> Vec2 {
    if amount > 0.0 {
        Vec2::new(
            rng.random_range(-amount..=amount),
            rng.random_range(-amount..=amount),
        )
    } else {
        Vec2::ZERO
    }
}

/// Advance a single body by one tick
///
/// Gravity and Euler integration always run. A body that ends up outside its
/// allowed region escapes if it is within the gap, otherwise it bounces.
pub fn step_body<R: Rng + ?Sized>(
    body: &mut Body,
    boundary: &Boundary,
    params: &StepParams,
    rng: &mut R,
) -> StepOutcome {
    body.vel.y += params.gravity;
    body.pos += body.vel;

    if boundary.contains(body.pos, body.radius) {
        return StepOutcome::Contained;
    }

    match boundary {
        Boundary::Circle(circle) => {
            let crossing = circle_crossing(circle, body.pos);
            if circle.gap.contains_angle(crossing.angle) {
                return StepOutcome::Escaped;
            }
            let Some(reflected) = reflect_circle(body.vel, &crossing) else {
                return StepOutcome::Inbound;
            };
            // Jitter breaks up perfectly periodic orbits
            body.vel = reflected + jitter(rng, params.perturbation);
            body.pos = push_out(params.nudge, circle, body.pos, body.vel, body.radius);
            StepOutcome::Reflected
        }
        Boundary::Square(square) => {
            let crossing = square_crossing(square, body.pos, body.radius);
            if square_gap_escape(square, body.pos, crossing) {
                return StepOutcome::Escaped;
            }
            let reflected = reflect_square(body.vel, crossing);
            if reflected == body.vel {
                return StepOutcome::Inbound;
            }
            body.vel = reflected;
            StepOutcome::Reflected
        }
    }
}

/// Advance the whole simulation by one tick
///
/// The gap rotates first, then every body steps in ID order. Escaped bodies
/// are dropped by ID and two new bodies are spawned for each, so the
/// population grows by exactly one per escape. Spawned bodies do not move
/// until the next tick.
pub fn tick<R: Rng>(sim: &mut Simulation<R>) -> TickReport {
    sim.time_ticks += 1;
    sim.boundary.advance();

    let params = StepParams::from(&sim.config);
    let mut report = TickReport::default();

    let bodies = std::mem::take(&mut sim.bodies);
    let mut kept = Vec::with_capacity(bodies.len() + SPAWNS_PER_ESCAPE);

    for mut body in bodies {
        match step_body(&mut body, &sim.boundary, &params, &mut sim.rng) {
            StepOutcome::Contained | StepOutcome::Inbound => kept.push(body),
            StepOutcome::Reflected => {
                log::trace!("Body {} bounced at ({:.1}, {:.1})", body.id, body.pos.x, body.pos.y);
                report.events.push(SimEvent::Bounce { body_id: body.id });
                kept.push(body);
            }
            StepOutcome::Escaped => {
                log::debug!("Body {} escaped on tick {}", body.id, sim.time_ticks);
                report.events.push(SimEvent::Escape { body_id: body.id });
                report.escaped += 1;
            }
        }
    }

    for _ in 0..report.escaped * SPAWNS_PER_ESCAPE {
        kept.push(sim.spawn_body());
        report.spawned += 1;
    }

    sim.bodies = kept;
    sim.escapes += report.escaped as u64;
    report
}
