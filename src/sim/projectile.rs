//! Player-fired projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gravity::{self, GravitySource};

/// A point mass flying under gravity until it hits a surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    detonated: bool,
}

impl Projectile {
    pub fn new(id: u32, position: Vec2, velocity: Vec2) -> Self {
        Self {
            id,
            position,
            velocity,
            detonated: false,
        }
    }

    /// Launch from `origin` at `angle` (radians) with the given speed
    pub fn launch(id: u32, origin: Vec2, angle: f32, speed: f32) -> Self {
        Self::new(id, origin, Vec2::new(angle.cos(), angle.sin()) * speed)
    }

    pub fn is_detonated(&self) -> bool {
        self.detonated
    }

    /// Accumulate one frame of gravity from `source`
    pub fn pull_toward(&mut self, source: &GravitySource, gravity: f32) {
        self.velocity += gravity::pull(self.position, source, gravity);
    }

    /// Move one frame; false once detonated (ready for removal)
    pub fn step(&mut self) -> bool {
        if self.detonated {
            return false;
        }
        self.position += self.velocity;
        true
    }

    /// Enter the terminal state. Returns false if already detonated.
    pub fn detonate(&mut self) -> bool {
        if self.detonated {
            return false;
        }
        self.detonated = true;
        true
    }

    /// Heading in radians
    pub fn heading(&self) -> f32 {
        self.velocity.y.atan2(self.velocity.x)
    }
}
