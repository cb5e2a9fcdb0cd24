//! Simulation tuning
//!
//! Every knob defaults to the values in [`crate::consts`]. Settings are
//! stored as JSON; missing fields fall back to their defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::is_valid_angle_step;

/// Why a settings document was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "settings parse error: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    /// Degrees between surface spots (must divide 360)
    pub angle_step_deg: u32,
    /// Force retained per ripple hop, in (0, 1)
    pub ripple_factor: f32,
    /// Ripple force below which propagation stops
    pub ripple_cutoff: f32,
    /// Body spin in radians per frame
    pub rotation_speed: f32,

    // === Gravity ===
    pub gravity: f32,
    pub mass_per_radius: f32,

    // === Projectiles and impacts ===
    pub launch_speed: f32,
    pub particle_speed: f32,
    pub particle_life: u32,
    pub primary_burst: u32,
    pub secondary_burst: u32,
    pub primary_explosion_force: f32,
    pub secondary_explosion_force: f32,

    // === Frame timing ===
    pub frame_delay_ms: f32,

    // === Scenario ===
    pub star_count: u32,
    pub field_width: f32,
    pub field_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            angle_step_deg: ANGLE_STEP_DEG,
            ripple_factor: RIPPLE_FACTOR,
            ripple_cutoff: RIPPLE_CUTOFF,
            rotation_speed: ROTATION_SPEED,

            gravity: GRAVITY,
            mass_per_radius: MASS_PER_RADIUS,

            launch_speed: LAUNCH_SPEED,
            particle_speed: PARTICLE_SPEED,
            particle_life: PARTICLE_LIFE,
            primary_burst: PRIMARY_BURST,
            secondary_burst: SECONDARY_BURST,
            primary_explosion_force: PRIMARY_EXPLOSION_FORCE,
            secondary_explosion_force: SECONDARY_EXPLOSION_FORCE,

            frame_delay_ms: FRAME_DELAY_MS,

            star_count: STAR_COUNT,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).inspect_err(|e| {
            log::warn!("Settings rejected: {e}");
        })?;
        if let Err(e) = settings.validate() {
            log::warn!("Settings rejected: {e}");
            return Err(e);
        }
        log::info!("Loaded settings ({} spots per body)", settings.spot_count());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the simulation can run with these values
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });

        if !is_valid_angle_step(self.angle_step_deg) {
            return invalid("angle_step_deg", "must be a non-zero divisor of 360");
        }
        if !(self.ripple_factor > 0.0 && self.ripple_factor < 1.0) {
            return invalid("ripple_factor", "must be between 0 and 1 (exclusive)");
        }
        if !(self.ripple_cutoff > 0.0) {
            return invalid("ripple_cutoff", "must be positive");
        }
        if !(self.frame_delay_ms > 0.0) {
            return invalid("frame_delay_ms", "must be positive");
        }
        if !(self.launch_speed > 0.0) {
            return invalid("launch_speed", "must be positive");
        }
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return invalid("field_width", "field dimensions must be positive");
        }
        Ok(())
    }

    /// Number of surface spots per body
    pub fn spot_count(&self) -> usize {
        (360 / self.angle_step_deg.max(1)) as usize
    }
}
