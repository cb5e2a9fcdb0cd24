//! Frame tick
//!
//! Advances every entity by one frame, then resolves projectile impacts.

use glam::Vec2;

use super::body::BodyKind;
use super::collision::find_impact;
use super::impact::ImpactEffect;
use super::state::{SimEvent, SimState};

/// How a shot is aimed relative to the primary body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Aim {
    #[default]
    TowardPrimary,
    AwayFromPrimary,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire a projectile from this point
    pub fire: Option<Vec2>,
    pub aim: Aim,
}

/// Launch a projectile from `origin`, aimed relative to the primary body
///
/// Returns the projectile id, or `None` when there is no primary body to aim at.
pub fn fire(state: &mut SimState, origin: Vec2, aim: Aim) -> Option<u32> {
    let Some(primary) = state.primary() else {
        log::warn!("Fire at {origin} ignored: no primary body");
        return None;
    };
    let to_primary = primary.center - origin;
    let mut angle = to_primary.y.atan2(to_primary.x);
    if aim == Aim::AwayFromPrimary {
        angle += std::f32::consts::PI;
    }

    let velocity = Vec2::new(angle.cos(), angle.sin()) * state.settings.launch_speed;
    let id = state.spawn_projectile(origin, velocity);
    state.events.push(SimEvent::Fired { projectile: id });
    log::debug!("Projectile {id} fired from {origin}");
    Some(id)
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    if let Some(origin) = input.fire {
        fire(state, origin, input.aim);
    }

    // --- STEP ENTITIES ---
    for star in &mut state.stars {
        star.step();
    }

    // Bodies read each other's positions from before anyone moved
    let sources = state.gravity_sources();
    for body in &mut state.bodies {
        body.step(&sources);
    }

    let projectiles_before = state.projectiles.len();
    state.projectiles.retain_mut(|p| p.step());
    let effects_before = state.effects.len();
    state.effects.retain_mut(ImpactEffect::step);

    let removed = (projectiles_before - state.projectiles.len()) + (effects_before - state.effects.len());
    if removed > 0 {
        log::debug!("Tick {}: removed {} finished entities", state.time_ticks, removed);
    }

    // --- GRAVITY AND IMPACTS ---
    let gravity = state.settings.gravity;
    let sources = state.gravity_sources();
    let mut impacts = Vec::new();

    for projectile in state.projectiles.iter_mut().filter(|p| !p.is_detonated()) {
        // Pull first, even on the frame it detonates
        for source in &sources {
            projectile.pull_toward(source, gravity);
        }

        if let Some(hit) = find_impact(&state.bodies, projectile.position) {
            if projectile.detonate() {
                impacts.push((projectile.id, projectile.position, hit));
            }
        }
    }

    for (projectile, position, hit) in impacts {
        let kind = state.bodies[hit.body_index].kind;
        let (count, force) = match kind {
            BodyKind::Primary => (
                state.settings.primary_burst,
                state.settings.primary_explosion_force,
            ),
            BodyKind::Secondary => (
                state.settings.secondary_burst,
                state.settings.secondary_explosion_force,
            ),
        };

        let effect_id = state.next_entity_id();
        let effect = ImpactEffect::new(
            effect_id,
            position,
            hit.surface.approach_angle,
            count,
            state.settings.particle_life,
            state.settings.particle_speed,
            &mut state.rng,
        );
        state.effects.push(effect);

        let body = &mut state.bodies[hit.body_index];
        body.explode(hit.surface.approach_angle, force);

        log::debug!(
            "Projectile {} hit body {} at {}° (distance {:.1})",
            projectile,
            body.id,
            hit.surface.approach_angle,
            hit.surface.distance
        );
        state.events.push(SimEvent::Impact {
            projectile,
            body: body.id,
            kind,
            approach_angle: hit.surface.approach_angle,
            position,
        });
    }
}
