//! Point-mass gravity shared by bodies and projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_GRAVITY_DISTANCE;

/// Read-only snapshot of a gravitating body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravitySource {
    pub id: u32,
    pub position: Vec2,
    pub mass: f32,
}

/// Velocity change for a target at `target` pulled by `source`
///
/// Inverse-square falloff along the line from target to source. The
/// distance is floored so a target sitting on the source stays finite.
pub fn pull(target: Vec2, source: &GravitySource, gravity: f32) -> Vec2 {
    let delta = source.position - target;
    let distance = delta.length().max(MIN_GRAVITY_DISTANCE);
    let angle = delta.y.atan2(delta.x);
    let force = gravity * source.mass / (distance * distance);
    Vec2::new(angle.cos() * force, angle.sin() * force)
}
