//! Ball entity

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Display color, cosmetic only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Each channel drawn independently from [0, 255]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }
}

/// A ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at creation
    pub radius: f32,
    pub color: Rgb,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, color: Rgb) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Velocity of the given magnitude in a uniformly random direction
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}
