//! Simulation context
//!
//! Everything one arena needs lives in `Simulation`: configuration, boundary,
//! bodies and the RNG. Independent instances never share state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, Rgb, random_velocity};
use super::boundary::Boundary;
use super::frame::Frame;
use crate::settings::SimConfig;

/// One arena of bouncing balls
#[derive(Debug, Clone)]
pub struct Simulation<R = Pcg32> {
    pub config: SimConfig,
    pub boundary: Boundary,
    /// Active bodies (sorted by id)
    pub bodies: Vec<Body>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Total escapes so far
    pub escapes: u64,
    seed: u64,
    /// Random source for spawns and bounce jitter
    pub(crate) rng: R,
    next_id: u32,
}

impl Simulation<Pcg32> {
    /// Create a simulation seeded for reproducibility, with one body at the spawn point
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, seed, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation driven by an injected random source
    pub fn with_rng(config: SimConfig, seed: u64, rng: R) -> Self {
        let boundary = config.build_boundary();
        let mut sim = Self {
            config,
            boundary,
            bodies: Vec::new(),
            time_ticks: 0,
            escapes: 0,
            seed,
            rng,
            next_id: 1,
        };
        let first = sim.spawn_body();
        sim.bodies.push(first);
        log::info!(
            "Simulation started (seed {}, {} boundary)",
            seed,
            match sim.boundary {
                Boundary::Circle(_) => "circle",
                Boundary::Square(_) => "square",
            }
        );
        sim
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn population(&self) -> usize {
        self.bodies.len()
    }

    /// Allocate a new body ID
    pub fn next_body_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a body at the spawn point with a random heading and color.
    ///
    /// The body is returned, not added; the caller decides when it joins.
    pub fn spawn_body(&mut self) -> Body {
        let id = self.next_body_id();
        let pos = self.boundary.spawn_point(self.config.spawn_margin);
        let vel = random_velocity(&mut self.rng, self.config.speed);
        let color = Rgb::random(&mut self.rng);
        Body::new(id, pos, vel, self.config.body_radius, color)
    }

    /// Add a body with a chosen position and velocity, returning its ID
    pub fn insert_body(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_body_id();
        let color = Rgb::random(&mut self.rng);
        self.bodies
            .push(Body::new(id, pos, vel, self.config.body_radius, color));
        id
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Snapshot for renderers
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(self.time_ticks, self.escapes, &self.boundary, &self.bodies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Preset;

    #[test]
    fn test_new_spawns_single_body_at_top() {
        let sim = Simulation::new(SimConfig::default(), 12345);
        assert_eq!(sim.population(), 1);
        let body = &sim.bodies[0];
        assert_eq!(body.id, 1);
        assert_eq!(body.pos, Vec2::new(400.0, 110.0));
        assert_eq!(body.radius, 10.0);
        assert!((body.speed() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_body_uses_preset_speed() {
        let mut sim = Simulation::new(SimConfig::from_preset(Preset::Square), 5);
        for _ in 0..50 {
            let body = sim.spawn_body();
            assert!((body.speed() - 3.0).abs() < 1e-5);
            assert_eq!(body.pos, Vec2::new(400.0, 110.0));
        }
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut sim = Simulation::new(SimConfig::default(), 1);
        let a = sim.insert_body(Vec2::new(400.0, 300.0), Vec2::ZERO);
        let b = sim.spawn_body().id;
        let c = sim.insert_body(Vec2::new(400.0, 300.0), Vec2::ZERO);
        assert!(1 < a && a < b && b < c);
        assert!(sim.body(a).is_some());
        assert!(sim.body(b).is_none());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = Simulation::new(SimConfig::default(), 99);
        let mut b = Simulation::new(SimConfig::default(), 99);
        for _ in 0..10 {
            assert_eq!(a.spawn_body(), b.spawn_body());
        }
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn test_with_rng_accepts_any_rng() {
        let rng = rand_pcg::Pcg64::seed_from_u64(42);
        let mut sim = Simulation::with_rng(SimConfig::default(), 42, rng);
        crate::sim::tick(&mut sim);
        assert_eq!(sim.time_ticks, 1);
        assert!(sim.population() >= 1);
    }
}
