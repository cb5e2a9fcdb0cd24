//! Browser surface
//!
//! The page owns the canvas, input and `requestAnimationFrame`; it feeds
//! clicks and frame timestamps in and draws the glyph buffer that comes out.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::clock::FrameClock;
use crate::render::{Glyph, as_floats, render_into};
use crate::settings::{Settings, SettingsError};
use crate::sim::{Aim, SimState, TickInput, tick};

/// Install the panic hook and console logger (safe to call more than once)
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Console logger already installed");
    }
}

/// A running simulation driven from JavaScript
#[wasm_bindgen]
pub struct WebSimulation {
    state: SimState,
    clock: FrameClock,
    input: TickInput,
    glyphs: Vec<Glyph>,
}

#[wasm_bindgen]
impl WebSimulation {
    /// Default scenario; `settings_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, settings_json: &str) -> Result<WebSimulation, JsValue> {
        let to_js = |e: SettingsError| JsValue::from_str(&e.to_string());
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(to_js)?
        };
        let clock = FrameClock::new(settings.frame_delay_ms);
        Ok(Self {
            state: SimState::with_default_scenario(seed, settings).map_err(to_js)?,
            clock,
            input: TickInput::default(),
            glyphs: Vec::new(),
        })
    }

    /// Queue a shot from a canvas point toward the planet
    pub fn fire(&mut self, x: f32, y: f32) {
        self.input.fire = Some(Vec2::new(x, y));
        self.input.aim = Aim::TowardPrimary;
    }

    /// Queue a shot from a canvas point away from the planet
    pub fn fire_away(&mut self, x: f32, y: f32) {
        self.input.fire = Some(Vec2::new(x, y));
        self.input.aim = Aim::AwayFromPrimary;
    }

    /// Feed elapsed time; returns how many frames were simulated
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        let frames = self.clock.run(&mut self.state, elapsed_ms, &self.input);
        if frames > 0 {
            self.input.fire = None;
        }
        frames
    }

    /// Simulate exactly one frame
    pub fn tick(&mut self) {
        tick(&mut self.state, &self.input);
        self.input.fire = None;
    }

    /// Current frame as a flat buffer of `glyph_stride()` floats per glyph
    pub fn render(&mut self) -> js_sys::Float32Array {
        render_into(&self.state, &mut self.glyphs);
        js_sys::Float32Array::from(as_floats(&self.glyphs))
    }

    pub fn glyph_stride(&self) -> u32 {
        Glyph::STRIDE as u32
    }

    pub fn projectile_count(&self) -> u32 {
        self.state.projectiles.len() as u32
    }
}
