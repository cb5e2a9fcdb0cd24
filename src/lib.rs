//! Ripple Worlds - deformable planets under bombardment
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (bodies, projectiles, impacts, collisions)
//! - `render`: Glyph instances emitted from simulation state
//! - `clock`: Fixed-step frame accumulator
//! - `settings`: Data-driven tuning, JSON load/save
//! - `web`: wasm-bindgen surface (wasm32 only)

pub mod clock;
pub mod render;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::FrameClock;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Simulation defaults
pub mod consts {
    /// Milliseconds between simulation frames
    pub const FRAME_DELAY_MS: f32 = 20.0;
    /// Maximum frames per clock advance to prevent spiral of death
    pub const MAX_FRAMES_PER_ADVANCE: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    pub const STAR_COUNT: u32 = 30;

    /// Angular distance between surface spots (degrees, must divide 360)
    pub const ANGLE_STEP_DEG: u32 = 5;
    /// Force kept by each ripple hop
    pub const RIPPLE_FACTOR: f32 = 0.9;
    /// Ripples weaker than this stop propagating
    pub const RIPPLE_CUTOFF: f32 = 0.1;
    /// Surface spring: velocity damping and pull-back stiffness
    pub const SPOT_DAMPING: f32 = 0.9;
    pub const SPOT_STIFFNESS: f32 = 0.1;
    /// Body spin (radians per frame)
    pub const ROTATION_SPEED: f32 = 0.01;

    /// Mass per unit of radius
    pub const MASS_PER_RADIUS: f32 = 20.0;
    /// Gravitational constant
    pub const GRAVITY: f32 = 10.0;
    /// Gravity distances are clamped to at least this
    pub const MIN_GRAVITY_DISTANCE: f32 = 1.0;

    /// Projectile speed at launch (units per frame)
    pub const LAUNCH_SPEED: f32 = 5.0;

    /// Impact particles
    pub const PARTICLE_SPEED: f32 = 6.0;
    pub const PARTICLE_LIFE: u32 = 20;
    /// Half-width of the burst cone (degrees)
    pub const BURST_SPREAD_DEG: f32 = 45.0;
    pub const PRIMARY_BURST: u32 = 20;
    pub const SECONDARY_BURST: u32 = 10;
    pub const PRIMARY_EXPLOSION_FORCE: f32 = 10.0;
    pub const SECONDARY_EXPLOSION_FORCE: f32 = 5.0;

    /// Default scenario
    pub const PRIMARY_RADIUS: f32 = 80.0;
    pub const MOON_RADIUS: f32 = 20.0;
    pub const MOON_SPEED: f32 = 6.0;
}

/// Wrap integer degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Wrap radians into [0, 2π)
#[inline]
pub fn wrap_radians(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Radians to the nearest whole degree
#[inline]
pub fn round_degrees(radians: f32) -> i32 {
    radians.to_degrees().round() as i32
}

/// True when `step` degrees tiles the full circle evenly
#[inline]
pub fn is_valid_angle_step(step: u32) -> bool {
    step != 0 && 360 % step == 0
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_degrees_edges() {
        assert_eq!(wrap_degrees(0), 0);
        assert_eq!(wrap_degrees(360), 0);
        assert_eq!(wrap_degrees(-1), 359);
        assert_eq!(wrap_degrees(725), 5);
        assert_eq!(wrap_degrees(-725), 355);
    }

    #[test]
    fn test_valid_angle_steps() {
        assert!(is_valid_angle_step(5));
        assert!(is_valid_angle_step(360));
        assert!(!is_valid_angle_step(0));
        assert!(!is_valid_angle_step(7));
        assert!(!is_valid_angle_step(400));
    }

    #[test]
    fn test_wrap_radians_edges() {
        assert_eq!(wrap_radians(0.0), 0.0);
        assert!((wrap_radians(-PI) - PI).abs() < 1e-5);
        assert!(wrap_radians(TAU) < 1e-5);
        assert!(wrap_radians(-1e-9) < TAU);
    }

    proptest! {
        #[test]
        fn prop_wrap_degrees_in_range_and_idempotent(a in any::<i32>()) {
            let w = wrap_degrees(a);
            prop_assert!((0..360).contains(&w));
            prop_assert_eq!(wrap_degrees(w), w);
        }

        #[test]
        fn prop_wrap_radians_in_range_and_idempotent(a in -1000.0f32..1000.0) {
            let w = wrap_radians(a);
            prop_assert!((0.0..TAU).contains(&w));
            prop_assert!((wrap_radians(w) - w).abs() < 1e-6);
        }
    }
}
