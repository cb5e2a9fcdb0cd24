//! Glyph instances for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Which marker a glyph draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    /// Surface spot ("o")
    Dot,
    /// Projectile marker ("->")
    Arrow,
    /// Spark or star ("*")
    Spark,
}

impl GlyphKind {
    pub fn as_f32(self) -> f32 {
        match self {
            Self::Dot => 0.0,
            Self::Arrow => 1.0,
            Self::Spark => 2.0,
        }
    }

    pub fn from_f32(value: f32) -> Option<Self> {
        match value as i32 {
            0 => Some(Self::Dot),
            1 => Some(Self::Arrow),
            2 => Some(Self::Spark),
            _ => None,
        }
    }
}

/// One positioned, rotated, sized and coloured marker
///
/// All-float layout so a glyph list can be handed over as a flat `f32` buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Glyph {
    pub position: [f32; 2],
    /// Radians
    pub rotation: f32,
    pub size: f32,
    pub color: [f32; 4],
    pub kind: f32,
}

impl Glyph {
    /// Floats per glyph in a flat buffer
    pub const STRIDE: usize = std::mem::size_of::<Glyph>() / std::mem::size_of::<f32>();

    pub fn new(kind: GlyphKind, x: f32, y: f32, rotation: f32, size: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            rotation,
            size,
            color,
            kind: kind.as_f32(),
        }
    }

    pub fn glyph_kind(&self) -> Option<GlyphKind> {
        GlyphKind::from_f32(self.kind)
    }
}

/// View a glyph list as one flat float buffer
pub fn as_floats(glyphs: &[Glyph]) -> &[f32] {
    bytemuck::cast_slice(glyphs)
}

/// CMYK (0-1 each) to RGBA, channels clamped to [0, 1]
pub fn cmyk_to_rgba(c: f32, m: f32, y: f32, k: f32, alpha: f32) -> [f32; 4] {
    let channel = |ink: f32| (1.0 - (ink * (1.0 - k) + k).min(1.0)).clamp(0.0, 1.0);
    [channel(c), channel(m), channel(y), alpha.clamp(0.0, 1.0)]
}

/// Colors for scene elements
pub mod colors {
    /// Green planet: CMYK(0.5, 0, 1, 0)
    pub const PRIMARY_BODY: [f32; 4] = [0.5, 1.0, 0.0, 1.0];
    pub const SECONDARY_BODY: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
