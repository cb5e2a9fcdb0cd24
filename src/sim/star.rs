//! Background stars

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A twinkling background star (decoration only, never collides)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub position: Vec2,
    pub phase: f32,
    pub phase_speed: f32,
}

impl Star {
    pub fn random<R: Rng>(width: f32, height: f32, rng: &mut R) -> Self {
        Self {
            position: Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height),
            phase: 0.0,
            phase_speed: rng.random::<f32>() * 0.1,
        }
    }

    /// Advance the twinkle; stars never expire
    pub fn step(&mut self) -> bool {
        self.phase += self.phase_speed;
        true
    }

    /// Current brightness in [-1, 1]
    pub fn intensity(&self) -> f32 {
        self.phase.sin()
    }
}
