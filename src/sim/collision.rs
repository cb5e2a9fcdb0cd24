//! Projectile vs. body collision resolution
//!
//! Two-phase: the axis-aligned influence box filters candidates, then the
//! exact surface test samples the rotated, deformed boundary.

use glam::Vec2;

use super::body::{BodyKind, DeformableBody, SurfaceHit};

/// A confirmed surface hit on one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyHit {
    /// Index into the body list (0 is the primary body)
    pub body_index: usize,
    pub surface: SurfaceHit,
}

/// Find the body `point` has struck, if any
///
/// A primary body, when present, sits at `bodies[0]`. If the point is inside
/// its influence zone only the primary is tested. Otherwise secondary bodies
/// are tried in registration order and the first hit wins.
pub fn find_impact(bodies: &[DeformableBody], point: Vec2) -> Option<BodyHit> {
    let mut first_secondary = 0;
    if let Some(primary) = bodies.first().filter(|b| b.kind == BodyKind::Primary) {
        if primary.is_within_influence(point) {
            let surface = primary.surface_hit_test(point);
            return surface.hit.then_some(BodyHit {
                body_index: 0,
                surface,
            });
        }
        first_secondary = 1;
    }

    bodies
        .iter()
        .enumerate()
        .skip(first_secondary)
        .filter(|(_, body)| body.is_within_influence(point))
        .find_map(|(body_index, body)| {
            let surface = body.surface_hit_test(point);
            surface.hit.then_some(BodyHit {
                body_index,
                surface,
            })
        })
}
