//! Deformable planetary bodies
//!
//! A body's boundary is a ring of evenly spaced spots, each a damped
//! spring holding a radial displacement. Impacts punch a spot inward and
//! queue a ripple that reaches one neighbour further per frame, losing
//! force at every hop until it falls under the cutoff.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gravity::{self, GravitySource};
use crate::consts::{SPOT_DAMPING, SPOT_STIFFNESS};
use crate::settings::Settings;
use crate::{is_valid_angle_step, polar_to_cartesian, round_degrees, wrap_degrees, wrap_radians};

/// Which way a ripple keeps travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RippleDirection {
    /// Decreasing angles only
    Left,
    /// Increasing angles only
    Right,
    /// Both neighbours (the impact spot itself)
    Both,
}

impl RippleDirection {
    fn spreads_left(self) -> bool {
        matches!(self, Self::Left | Self::Both)
    }

    fn spreads_right(self) -> bool {
        matches!(self, Self::Right | Self::Both)
    }
}

/// A propagation step waiting for the next frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleRecord {
    /// Body-local angle (degrees) of the spot that was punched
    pub angle: i32,
    /// Force the spot was punched with
    pub force: f32,
    pub direction: RippleDirection,
    /// Drain rounds this chain may still use
    pub hops_left: u32,
}

/// One angular sample of the boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Body-local angle (radians)
    pub base_angle: f32,
    /// Signed radial offset from the nominal radius
    pub displacement: f32,
    /// Rate of change of displacement
    pub velocity: f32,
}

/// Role of a body in collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Tested first, larger bursts and explosions
    Primary,
    Secondary,
}

/// How a body moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Static,
    /// Free body accelerated by the listed attractor ids
    Orbiting { velocity: Vec2, attractors: Vec<u32> },
}

/// Result of an exact surface test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub hit: bool,
    /// World-space angle from body centre to the point (degrees, [0, 360))
    pub approach_angle: i32,
    /// Distance from body centre
    pub distance: f32,
}

/// Per-body physical constants, taken from [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyTuning {
    pub angle_step_deg: u32,
    pub ripple_factor: f32,
    pub ripple_cutoff: f32,
    pub rotation_speed: f32,
    pub gravity: f32,
    pub mass_per_radius: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl BodyTuning {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            angle_step_deg: settings.angle_step_deg,
            ripple_factor: settings.ripple_factor,
            ripple_cutoff: settings.ripple_cutoff,
            rotation_speed: settings.rotation_speed,
            gravity: settings.gravity,
            mass_per_radius: settings.mass_per_radius,
        }
    }
}

/// Map every whole degree to the nearest spot of a ring spaced `step` degrees apart
///
/// Degrees exactly halfway between two spots go to the later one.
fn build_angle_lookup(step: u32) -> Vec<usize> {
    let spots = (360 / step) as usize;
    (0..360u32)
        .map(|deg| ((deg as f32 / step as f32).round() as usize) % spots)
        .collect()
}

/// A planet or moon with a deformable surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeformableBody {
    pub id: u32,
    pub kind: BodyKind,
    pub center: Vec2,
    /// Nominal (undeformed) radius
    pub radius: f32,
    pub mass: f32,
    /// Radians, [0, 2π)
    pub rotation: f32,
    pub shape: Vec<Spot>,
    /// Outer bound of the influence zone, refreshed every step
    pub max_radius: f32,
    pub motion: Motion,
    tuning: BodyTuning,
    angle_lookup: Vec<usize>,
    pending_ripples: Vec<RippleRecord>,
}

impl DeformableBody {
    /// # Panics
    ///
    /// If `tuning.angle_step_deg` is zero or does not divide 360. Settings
    /// that passed [`Settings::validate`] never trip this.
    pub fn new(id: u32, kind: BodyKind, center: Vec2, radius: f32, tuning: BodyTuning) -> Self {
        let step = tuning.angle_step_deg;
        assert!(
            is_valid_angle_step(step),
            "angle step {step} must be a non-zero divisor of 360"
        );
        let shape = (0..360)
            .step_by(step as usize)
            .map(|deg| Spot {
                base_angle: (deg as f32).to_radians(),
                displacement: 0.0,
                velocity: 0.0,
            })
            .collect();

        Self {
            id,
            kind,
            center,
            radius,
            mass: radius * tuning.mass_per_radius,
            rotation: 0.0,
            shape,
            max_radius: radius,
            motion: Motion::Static,
            tuning,
            angle_lookup: build_angle_lookup(step),
            pending_ripples: Vec::new(),
        }
    }

    /// Make the body free-moving, pulled by the given attractors
    pub fn with_orbit(mut self, velocity: Vec2, attractors: Vec<u32>) -> Self {
        self.motion = Motion::Orbiting {
            velocity,
            attractors,
        };
        self
    }

    pub fn tuning(&self) -> &BodyTuning {
        &self.tuning
    }

    /// Current rotation rounded to whole degrees
    #[inline]
    pub fn rotation_degrees(&self) -> i32 {
        round_degrees(self.rotation)
    }

    /// Spot index covering a body-local angle (any integer degrees)
    #[inline]
    pub fn spot_index(&self, angle: i32) -> usize {
        self.angle_lookup[wrap_degrees(angle) as usize]
    }

    /// Spot covering a body-local angle (any integer degrees)
    pub fn spot_at(&self, angle: i32) -> &Spot {
        &self.shape[self.spot_index(angle)]
    }

    /// Ripple records that will run on the next step
    pub fn pending_ripples(&self) -> &[RippleRecord] {
        &self.pending_ripples
    }

    /// True when no ripple is waiting to propagate
    pub fn is_quiet(&self) -> bool {
        self.pending_ripples.is_empty()
    }

    /// Hop count of a punch: `ceil(ln(cutoff / force) / ln(factor))`, at least 1
    ///
    /// Counted as steps the ripple queue stays busy. The last of those steps
    /// only finds the decayed force under the cutoff and punches nothing, so
    /// the neighbours actually reached per direction is one fewer.
    pub fn ripple_rounds(&self, force: f32) -> u32 {
        let factor = self.tuning.ripple_factor as f64;
        let cutoff = self.tuning.ripple_cutoff as f64;
        let force = force as f64;
        if !(force >= cutoff) || !(factor > 0.0 && factor < 1.0) {
            return 1;
        }
        let rounds = ((cutoff / force).ln() / factor.ln()).ceil();
        (rounds as u32).max(1)
    }

    /// Apply an inward impulse at a body-local angle and queue its ripple
    pub fn punch(&mut self, direction: RippleDirection, angle: i32, force: f32) {
        let rounds = self.ripple_rounds(force);
        self.punch_with_budget(direction, angle, force, rounds);
    }

    fn punch_with_budget(
        &mut self,
        direction: RippleDirection,
        angle: i32,
        force: f32,
        hops_left: u32,
    ) {
        let angle = wrap_degrees(angle);
        let index = self.spot_index(angle);
        self.shape[index].velocity -= force;
        self.pending_ripples.push(RippleRecord {
            angle,
            force,
            direction,
            hops_left,
        });
    }

    fn propagate(&mut self, record: RippleRecord) {
        if record.hops_left == 0 {
            return;
        }
        let force = record.force * self.tuning.ripple_factor;
        if force < self.tuning.ripple_cutoff {
            return;
        }
        let step = self.tuning.angle_step_deg as i32;
        let hops_left = record.hops_left - 1;
        if record.direction.spreads_left() {
            self.punch_with_budget(RippleDirection::Left, record.angle - step, force, hops_left);
        }
        if record.direction.spreads_right() {
            self.punch_with_budget(RippleDirection::Right, record.angle + step, force, hops_left);
        }
    }

    /// Punch the surface where something arrived from `approach_angle` (world degrees)
    pub fn explode(&mut self, approach_angle: i32, force: f32) {
        let local = wrap_degrees(approach_angle - self.rotation_degrees());
        self.punch(RippleDirection::Both, local, force);
    }

    /// Advance one frame; `sources` is the gravity snapshot for mobile bodies
    ///
    /// Always returns true: bodies are never removed.
    pub fn step(&mut self, sources: &[GravitySource]) -> bool {
        // Ripples queued last frame travel one hop
        let pending = std::mem::take(&mut self.pending_ripples);
        for record in pending {
            self.propagate(record);
        }

        let mut max_radius = f32::MIN;
        for spot in &mut self.shape {
            spot.displacement += spot.velocity;
            spot.velocity = SPOT_DAMPING * (spot.velocity + SPOT_STIFFNESS * (0.0 - spot.displacement));
            max_radius = max_radius.max(self.radius + spot.displacement);
        }
        self.max_radius = max_radius.max(self.radius);

        if let Motion::Orbiting {
            velocity,
            attractors,
        } = &mut self.motion
        {
            for source in sources.iter().filter(|s| attractors.contains(&s.id)) {
                *velocity += gravity::pull(self.center, source, self.tuning.gravity);
            }
            self.center += *velocity;
        }

        self.rotation = wrap_radians(self.rotation + self.tuning.rotation_speed);
        true
    }

    /// Cheap axis-aligned pretest against the influence zone
    pub fn is_within_influence(&self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() < self.max_radius
            && (point.y - self.center.y).abs() < self.max_radius
    }

    /// Exact test of a world-space point against the rotated, deformed boundary
    pub fn surface_hit_test(&self, point: Vec2) -> SurfaceHit {
        let delta = point - self.center;
        let distance = delta.length();
        let approach_angle = wrap_degrees(round_degrees(delta.y.atan2(delta.x)));
        let spot = self.spot_at(approach_angle - self.rotation_degrees());
        SurfaceHit {
            hit: distance < self.radius + spot.displacement,
            approach_angle,
            distance,
        }
    }

    /// Body-local position of a spot including its displacement
    pub fn surface_point(&self, spot: &Spot) -> Vec2 {
        polar_to_cartesian(self.radius + spot.displacement, spot.base_angle)
    }

    pub fn gravity_source(&self) -> GravitySource {
        GravitySource {
            id: self.id,
            position: self.center,
            mass: self.mass,
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self.motion, Motion::Orbiting { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet() -> DeformableBody {
        DeformableBody::new(1, BodyKind::Primary, Vec2::ZERO, 80.0, BodyTuning::default())
    }

    fn max_displacement(body: &DeformableBody) -> f32 {
        body.shape
            .iter()
            .map(|s| s.displacement)
            .fold(f32::MIN, f32::max)
    }

    #[test]
    fn test_shape_and_lookup() {
        let body = planet();
        assert_eq!(body.shape.len(), 72);
        assert_eq!(body.angle_lookup.len(), 360);
        assert!(body.angle_lookup.iter().all(|&i| i < body.shape.len()));

        // ±2 degrees around each spot belong to it
        assert_eq!(body.spot_index(0), 0);
        assert_eq!(body.spot_index(2), 0);
        assert_eq!(body.spot_index(358), 0);
        assert_eq!(body.spot_index(3), 1);
        assert_eq!(body.spot_index(-3), 71);
        assert_eq!(body.spot_index(722), 0);
        assert_eq!(body.mass, 1600.0);
    }

    #[test]
    fn test_lookup_follows_angle_step() {
        let tuning = BodyTuning {
            angle_step_deg: 10,
            ..BodyTuning::default()
        };
        let body = DeformableBody::new(1, BodyKind::Primary, Vec2::ZERO, 50.0, tuning);
        assert_eq!(body.shape.len(), 36);
        assert_eq!(body.spot_index(4), 0);
        assert_eq!(body.spot_index(5), 1);
        assert_eq!(body.spot_index(355), 0);
        assert_eq!(body.spot_index(354), 35);

        // Spots are evenly spaced
        for pair in body.shape.windows(2) {
            let gap = (pair[1].base_angle - pair[0].base_angle).to_degrees();
            assert!((gap - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_every_spot_reachable_for_valid_steps() {
        for step in [1, 3, 5, 8, 15, 45, 90, 360] {
            let tuning = BodyTuning {
                angle_step_deg: step,
                ..BodyTuning::default()
            };
            let body = DeformableBody::new(1, BodyKind::Primary, Vec2::ZERO, 50.0, tuning);
            let mut reached = vec![false; body.shape.len()];
            for deg in 0..360 {
                reached[body.spot_index(deg)] = true;
            }
            assert!(reached.iter().all(|&r| r), "step {step}");
        }
    }

    #[test]
    #[should_panic(expected = "non-zero divisor of 360")]
    fn test_step_not_dividing_360_is_rejected() {
        let tuning = BodyTuning {
            angle_step_deg: 7,
            ..BodyTuning::default()
        };
        DeformableBody::new(1, BodyKind::Primary, Vec2::ZERO, 50.0, tuning);
    }

    #[test]
    #[should_panic(expected = "non-zero divisor of 360")]
    fn test_step_wider_than_circle_is_rejected() {
        let tuning = BodyTuning {
            angle_step_deg: 400,
            ..BodyTuning::default()
        };
        DeformableBody::new(1, BodyKind::Primary, Vec2::ZERO, 50.0, tuning);
    }

    #[test]
    fn test_punch_is_deferred() {
        let mut body = planet();
        body.punch(RippleDirection::Both, 0, 10.0);

        assert_eq!(body.spot_at(0).velocity, -10.0);
        assert_eq!(body.spot_at(5).velocity, 0.0);
        assert_eq!(body.pending_ripples().len(), 1);

        body.step(&[]);
        // Neighbours got the decayed force this step, their ripples wait for the next
        assert!(body.spot_at(5).displacement < 0.0);
        assert!(body.spot_at(-5).displacement < 0.0);
        assert_eq!(body.spot_at(10).displacement, 0.0);
        assert_eq!(body.pending_ripples().len(), 2);
        assert!(body
            .pending_ripples()
            .iter()
            .all(|r| r.direction != RippleDirection::Both));
    }

    #[test]
    fn test_single_punch_first_step() {
        let mut body = planet();
        body.punch(RippleDirection::Both, 0, 10.0);
        body.step(&[]);

        assert!(body.spot_at(0).velocity < 0.0);
        assert!(body.max_radius >= 80.0);
    }

    #[test]
    fn test_ripple_terminates_after_expected_rounds() {
        for force in [1.0_f32, 5.0, 10.0, 37.0] {
            let mut body = planet();
            body.punch(RippleDirection::Both, 90, force);

            let expected = ((0.1_f64 / force as f64).ln() / 0.9_f64.ln()).ceil() as u32;
            assert_eq!(body.ripple_rounds(force), expected);

            let mut rounds = 0;
            while !body.is_quiet() {
                body.step(&[]);
                rounds += 1;
                assert!(rounds <= 1000, "ripple never settled");
            }
            assert_eq!(rounds, expected, "force {force}");
        }
    }

    #[test]
    fn test_one_directional_ripple_stays_on_its_side() {
        let mut body = planet();
        body.punch(RippleDirection::Right, 0, 1.0);
        body.step(&[]);
        assert!(body.spot_at(5).displacement < 0.0);
        assert_eq!(body.spot_at(-5).displacement, 0.0);
    }

    #[test]
    fn test_weak_punch_does_not_ripple() {
        let mut body = planet();
        body.punch(RippleDirection::Both, 0, 0.1);
        body.step(&[]);
        assert!(body.is_quiet());
        assert_eq!(body.spot_at(5).displacement, 0.0);
    }

    #[test]
    fn test_displacement_decays() {
        let mut body = planet();
        body.punch(RippleDirection::Both, 0, 1.0);

        let mut previous_peak = f32::MAX;
        for _ in 0..10 {
            let mut peak = 0.0_f32;
            for _ in 0..30 {
                body.step(&[]);
                peak = peak.max(body.spot_at(0).displacement.abs());
            }
            assert!(peak < previous_peak);
            previous_peak = peak;
        }
        assert!(body.spot_at(0).displacement.abs() < 1e-2);
    }

    #[test]
    fn test_max_radius_tracks_largest_displacement() {
        let mut body = planet();
        // Outward punch on one spot, inward elsewhere
        body.punch(RippleDirection::Both, 45, -4.0);
        body.punch(RippleDirection::Both, 200, 6.0);
        for _ in 0..5 {
            body.step(&[]);
            let expected = body.radius + max_displacement(&body).max(0.0);
            assert!((body.max_radius - expected).abs() < 1e-4);
            assert!(body.max_radius >= body.radius);
        }
    }

    #[test]
    fn test_rotation_wraps() {
        let mut body = planet();
        for _ in 0..700 {
            body.step(&[]);
        }
        assert!(body.rotation >= 0.0 && body.rotation < std::f32::consts::TAU);
        assert!((body.rotation - (7.0 - std::f32::consts::TAU)).abs() < 1e-3);
    }

    #[test]
    fn test_hit_test_inverts_rotation() {
        let mut body = planet();
        body.shape[0].displacement = 20.0;
        body.rotation = 30.0_f32.to_radians();

        // Spot 0 now sits at 30 degrees in world space
        let hit = body.surface_hit_test(polar_to_cartesian(90.0, 30.0_f32.to_radians()));
        assert!(hit.hit);
        assert_eq!(hit.approach_angle, 30);
        assert!((hit.distance - 90.0).abs() < 1e-3);

        // World 0 degrees is body-local 330, undeformed
        let miss = body.surface_hit_test(Vec2::new(90.0, 0.0));
        assert!(!miss.hit);
        assert_eq!(miss.approach_angle, 0);
    }

    #[test]
    fn test_hit_test_negative_angles() {
        let body = planet();
        let hit = body.surface_hit_test(Vec2::new(0.0, -50.0));
        assert!(hit.hit);
        assert_eq!(hit.approach_angle, 270);
    }

    #[test]
    fn test_explode_lands_on_unrotated_spot() {
        let mut body = planet();
        body.rotation = 90.0_f32.to_radians();
        body.explode(100, 10.0);
        assert_eq!(body.spot_at(10).velocity, -10.0);
        assert_eq!(body.pending_ripples()[0].angle, 10);
    }

    #[test]
    fn test_influence_zone_is_a_box() {
        let mut body = planet();
        body.center = Vec2::new(100.0, 100.0);
        assert!(body.is_within_influence(Vec2::new(179.0, 179.0)));
        assert!(!body.is_within_influence(Vec2::new(181.0, 100.0)));
        assert!(!body.is_within_influence(Vec2::new(100.0, 20.0)));
    }

    #[test]
    fn test_orbiting_body_is_pulled() {
        let sun = planet();
        let mut moon = DeformableBody::new(
            2,
            BodyKind::Secondary,
            Vec2::new(-300.0, 0.0),
            20.0,
            BodyTuning::default(),
        )
        .with_orbit(Vec2::new(0.0, 6.0), vec![sun.id]);

        moon.step(&[sun.gravity_source()]);
        // 10 * 1600 / 300^2 toward the sun
        let expected_vx = 10.0 * 1600.0 / (300.0 * 300.0);
        assert!((moon.center.x - (-300.0 + expected_vx)).abs() < 1e-3);
        assert!((moon.center.y - 6.0).abs() < 1e-3);

        // Sources not listed as attractors are ignored
        let mut stray = moon.clone();
        let before = stray.center;
        let other = GravitySource {
            id: 99,
            position: Vec2::ZERO,
            mass: 1.0e9,
        };
        stray.step(&[other]);
        assert!((stray.center - before - Vec2::new(expected_vx, 6.0)).length() < 1e-3);
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut body = planet();
        let source = GravitySource {
            id: 7,
            position: Vec2::new(10.0, 0.0),
            mass: 1000.0,
        };
        body.step(&[source]);
        assert_eq!(body.center, Vec2::ZERO);
        assert!(!body.is_mobile());
    }
}
