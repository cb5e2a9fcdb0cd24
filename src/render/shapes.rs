//! Glyph generation for each entity kind

use glam::Vec2;

use super::glyph::{Glyph, GlyphKind, cmyk_to_rgba, colors};
use crate::sim::{BodyKind, DeformableBody, ImpactEffect, Projectile, Star};

/// Projectile marker size
const ARROW_SIZE: f32 = 10.0;
/// Star marker size
const STAR_SIZE: f32 = 8.0;
/// Spark size at full intensity
const SPARK_MAX_SIZE: f32 = 20.0;

/// Anything that contributes glyphs to a frame
pub trait Draw {
    fn draw(&self, out: &mut Vec<Glyph>);
}

impl Draw for DeformableBody {
    /// One dot per spot, displaced radially and spun with the body
    fn draw(&self, out: &mut Vec<Glyph>) {
        let color = match self.kind {
            BodyKind::Primary => colors::PRIMARY_BODY,
            BodyKind::Secondary => colors::SECONDARY_BODY,
        };
        let size = self.radius / 10.0;
        let spin = Vec2::from_angle(self.rotation);

        out.extend(self.shape.iter().map(|spot| {
            let world = self.center + spin.rotate(self.surface_point(spot));
            Glyph::new(
                GlyphKind::Dot,
                world.x,
                world.y,
                spot.base_angle + self.rotation,
                size,
                color,
            )
        }));
    }
}

impl Draw for Projectile {
    fn draw(&self, out: &mut Vec<Glyph>) {
        if self.is_detonated() {
            return;
        }
        out.push(Glyph::new(
            GlyphKind::Arrow,
            self.position.x,
            self.position.y,
            self.heading(),
            ARROW_SIZE,
            colors::PROJECTILE,
        ));
    }
}

impl Draw for ImpactEffect {
    /// Sparks shrink and redden as they burn out
    fn draw(&self, out: &mut Vec<Glyph>) {
        for particle in self.particles.iter().filter(|p| p.remaining_life > 0) {
            let intensity = particle.intensity(self.max_life);
            out.push(Glyph::new(
                GlyphKind::Spark,
                particle.position.x,
                particle.position.y,
                0.0,
                (intensity * SPARK_MAX_SIZE).round(),
                cmyk_to_rgba(0.0, intensity, 1.0, 0.0, intensity),
            ));
        }
    }
}

impl Draw for Star {
    fn draw(&self, out: &mut Vec<Glyph>) {
        out.push(Glyph::new(
            GlyphKind::Spark,
            self.position.x,
            self.position.y,
            0.0,
            STAR_SIZE,
            cmyk_to_rgba(0.0, 0.0, 0.0, self.intensity(), 1.0),
        ));
    }
}
