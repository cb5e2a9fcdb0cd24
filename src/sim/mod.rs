//! Frame-stepped simulation module
//!
//! All physics lives here and stays free of rendering and platform code:
//! - One `tick` per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (primary body first, then registration order)

pub mod body;
pub mod collision;
pub mod gravity;
pub mod impact;
pub mod projectile;
pub mod star;
pub mod state;
pub mod tick;

pub use body::{
    BodyKind, BodyTuning, DeformableBody, Motion, RippleDirection, RippleRecord, Spot, SurfaceHit,
};
pub use collision::{BodyHit, find_impact};
pub use gravity::GravitySource;
pub use impact::{ImpactEffect, Particle};
pub use projectile::Projectile;
pub use star::Star;
pub use state::{SimEvent, SimState};
pub use tick::{Aim, TickInput, fire, tick};
