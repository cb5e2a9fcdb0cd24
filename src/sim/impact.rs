//! Impact bursts
//!
//! A cone of sparks thrown outward from where a projectile struck.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::BURST_SPREAD_DEG;

/// A single spark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    /// Direction of travel (radians)
    pub angle: f32,
    pub remaining_life: u32,
}

impl Particle {
    /// Brightness in [0, 1] for a particle with `max_life` total ticks
    pub fn intensity(&self, max_life: u32) -> f32 {
        if max_life == 0 {
            return 0.0;
        }
        self.remaining_life as f32 / max_life as f32
    }
}

/// A burst of sparks spawned at an impact point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactEffect {
    pub id: u32,
    pub origin: Vec2,
    /// World approach angle of the impact (degrees)
    pub direction_bias: i32,
    pub particles: Vec<Particle>,
    pub max_life: u32,
    pub speed: f32,
}

impl ImpactEffect {
    /// Spawn `count` sparks fanning out ±45° around the approach angle
    pub fn new<R: Rng>(
        id: u32,
        origin: Vec2,
        approach_angle: i32,
        count: u32,
        life: u32,
        speed: f32,
        rng: &mut R,
    ) -> Self {
        let base = (approach_angle as f32).to_radians();
        let spread = BURST_SPREAD_DEG.to_radians();
        let particles = (0..count)
            .map(|_| Particle {
                position: origin,
                angle: base + rng.random_range(-spread..=spread),
                remaining_life: life,
            })
            .collect();

        Self {
            id,
            origin,
            direction_bias: approach_angle,
            particles,
            max_life: life,
            speed,
        }
    }

    /// Age every spark by one frame; false once all have burnt out
    pub fn step(&mut self) -> bool {
        let mut active = 0;
        for particle in &mut self.particles {
            if particle.remaining_life == 0 {
                continue;
            }
            particle.remaining_life -= 1;
            if particle.remaining_life == 0 {
                continue;
            }
            active += 1;
            particle.position += Vec2::new(particle.angle.cos(), particle.angle.sin()) * self.speed;
        }
        active > 0
    }

    pub fn is_alive(&self) -> bool {
        self.particles.iter().any(|p| p.remaining_life > 0)
    }
}
