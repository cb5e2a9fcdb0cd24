//! Render pass
//!
//! Converts simulation state into glyph instances. Drawing a glyph (text,
//! sprite, SDF) is up to the host.

pub mod glyph;
pub mod shapes;

pub use glyph::{Glyph, GlyphKind, as_floats, cmyk_to_rgba, colors};
pub use shapes::Draw;

use crate::sim::SimState;

/// All glyphs for the current frame, back to front
pub fn render(state: &SimState) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(glyph_estimate(state));
    render_into(state, &mut glyphs);
    glyphs
}

/// Like [`render`], reusing an existing buffer
pub fn render_into(state: &SimState, out: &mut Vec<Glyph>) {
    out.clear();
    for star in &state.stars {
        star.draw(out);
    }
    for body in &state.bodies {
        body.draw(out);
    }
    for projectile in &state.projectiles {
        projectile.draw(out);
    }
    for effect in &state.effects {
        effect.draw(out);
    }
}

fn glyph_estimate(state: &SimState) -> usize {
    state.stars.len()
        + state.bodies.iter().map(|b| b.shape.len()).sum::<usize>()
        + state.projectiles.len()
        + state.effects.iter().map(|e| e.particles.len()).sum::<usize>()
}
