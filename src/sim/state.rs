//! Simulation state
//!
//! Owns every entity. Bodies are stored with the primary body first and
//! secondary bodies after it in registration order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{BodyKind, BodyTuning, DeformableBody, Motion};
use super::gravity::GravitySource;
use super::impact::ImpactEffect;
use super::projectile::Projectile;
use super::star::Star;
use crate::consts::{MOON_RADIUS, MOON_SPEED, PRIMARY_RADIUS};
use crate::settings::{Settings, SettingsError};

/// Where the default scenario puts its planet
pub const PRIMARY_CENTER: Vec2 = Vec2::new(600.0, 350.0);

/// Default moons: (centre, initial velocity)
pub const DEFAULT_MOONS: [(Vec2, Vec2); 4] = [
    (Vec2::new(300.0, 350.0), Vec2::new(0.0, MOON_SPEED)),
    (Vec2::new(900.0, 350.0), Vec2::new(0.0, -MOON_SPEED)),
    (Vec2::new(600.0, 650.0), Vec2::new(-MOON_SPEED, 0.0)),
    (Vec2::new(600.0, 0.0), Vec2::new(MOON_SPEED, 0.0)),
];

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// A projectile was launched
    Fired { projectile: u32 },
    /// A projectile struck a body
    Impact {
        projectile: u32,
        body: u32,
        kind: BodyKind,
        approach_angle: i32,
        position: Vec2,
    },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub seed: u64,
    pub settings: Settings,
    /// Primary body first, then secondaries in registration order
    pub bodies: Vec<DeformableBody>,
    pub projectiles: Vec<Projectile>,
    pub effects: Vec<ImpactEffect>,
    pub stars: Vec<Star>,
    /// Frames simulated so far
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<SimEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl SimState {
    /// An empty world with no bodies; fails if `settings` do not validate
    pub fn new(seed: u64, settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            seed,
            settings,
            bodies: Vec::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
            stars: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    /// The classic setup: a starfield, one planet and four orbiting moons
    pub fn with_default_scenario(seed: u64, settings: Settings) -> Result<Self, SettingsError> {
        let mut state = Self::new(seed, settings)?;
        let (width, height) = (state.settings.field_width, state.settings.field_height);

        for _ in 0..state.settings.star_count {
            let star = Star::random(width, height, &mut state.rng);
            state.stars.push(star);
        }

        let primary = state.insert_body(BodyKind::Primary, PRIMARY_CENTER, PRIMARY_RADIUS);
        for (center, velocity) in DEFAULT_MOONS {
            let moon = state.insert_body(BodyKind::Secondary, center, MOON_RADIUS);
            state.set_orbit(moon, velocity, vec![primary]);
        }

        log::info!(
            "Scenario ready: {} stars, {} bodies, seed {}",
            state.stars.len(),
            state.bodies.len(),
            seed
        );
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a body and return its id
    ///
    /// The primary body goes to the front of the list. A world has at most
    /// one: a second primary is refused and `None` returned.
    pub fn add_body(&mut self, kind: BodyKind, center: Vec2, radius: f32) -> Option<u32> {
        if kind == BodyKind::Primary {
            if let Some(existing) = self.primary() {
                log::warn!("Body not added: body {} is already the primary", existing.id);
                return None;
            }
        }
        Some(self.insert_body(kind, center, radius))
    }

    fn insert_body(&mut self, kind: BodyKind, center: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        let body = DeformableBody::new(id, kind, center, radius, BodyTuning::from_settings(&self.settings));
        match kind {
            BodyKind::Primary => self.bodies.insert(0, body),
            BodyKind::Secondary => self.bodies.push(body),
        }
        id
    }

    /// Turn a registered body into a free body pulled by `attractors`
    pub fn set_orbit(&mut self, body: u32, velocity: Vec2, attractors: Vec<u32>) -> bool {
        match self.bodies.iter_mut().find(|b| b.id == body) {
            Some(b) => {
                b.motion = Motion::Orbiting {
                    velocity,
                    attractors,
                };
                true
            }
            None => false,
        }
    }

    pub fn primary(&self) -> Option<&DeformableBody> {
        self.bodies
            .first()
            .filter(|b| b.kind == BodyKind::Primary)
    }

    pub fn body(&self, id: u32) -> Option<&DeformableBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Snapshot of every body's gravity
    pub fn gravity_sources(&self) -> Vec<GravitySource> {
        self.bodies.iter().map(DeformableBody::gravity_source).collect()
    }

    /// Add a projectile and return its id
    pub fn spawn_projectile(&mut self, position: Vec2, velocity: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, position, velocity));
        id
    }

    /// Projectiles that have not detonated
    pub fn flying_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| !p.is_detonated())
    }
}
