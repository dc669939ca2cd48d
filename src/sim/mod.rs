//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded or injected RNG only
//! - Stable iteration order (by body ID)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod boundary;
pub mod collision;
pub mod frame;
pub mod state;
pub mod tick;

pub use body::{Body, Rgb, random_velocity};
pub use boundary::{Boundary, CircleBoundary, GapArc, GapEdges, SquareBoundary};
pub use collision::{NudgeMode, reflect_velocity};
pub use frame::{BoundaryView, Frame};
pub use state::Simulation;
pub use tick::{SimEvent, StepOutcome, StepParams, TickReport, step_body, tick};
