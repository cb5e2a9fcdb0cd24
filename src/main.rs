//! Ripple Worlds headless runner
//!
//! Runs the default scenario without a window: fires a volley at the
//! planet from the corners of the field and reports what happened.
//!
//! Usage: `ripple-worlds [settings.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use glam::Vec2;
    use ripple_worlds::render::render;
    use ripple_worlds::sim::{SimEvent, SimState, TickInput};
    use ripple_worlds::{FrameClock, Settings};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {path}"))?;
            Settings::from_json(&json).with_context(|| format!("loading settings from {path}"))?
        }
        None => Settings::default(),
    };
    let frames: u32 = match args.next() {
        Some(n) => n.parse().with_context(|| format!("frame count `{n}`"))?,
        None => 600,
    };

    log::info!("Ripple Worlds (headless) running {frames} frames");

    let (w, h) = (settings.field_width, settings.field_height);
    let volley = [
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(0.0, h),
        Vec2::new(w, h),
        Vec2::new(w / 2.0, 0.0),
    ];

    let mut clock = FrameClock::new(settings.frame_delay_ms);
    let frame_ms = clock.frame_ms();
    let mut state =
        SimState::with_default_scenario(0x5EED, settings).context("building default scenario")?;

    let mut fired = 0;
    let mut primary_hits = 0;
    let mut secondary_hits = 0;
    let mut peak_glyphs = 0;

    for frame in 0..frames {
        let input = TickInput {
            fire: (frame % 30 == 0).then(|| volley[(frame / 30) as usize % volley.len()]),
            ..Default::default()
        };
        clock.run(&mut state, frame_ms, &input);

        for event in &state.events {
            match event {
                SimEvent::Fired { .. } => fired += 1,
                SimEvent::Impact { kind, .. } => match kind {
                    ripple_worlds::sim::BodyKind::Primary => primary_hits += 1,
                    ripple_worlds::sim::BodyKind::Secondary => secondary_hits += 1,
                },
            }
        }
        peak_glyphs = peak_glyphs.max(render(&state).len());
    }

    let deepest_dent = state
        .primary()
        .map(|p| p.shape.iter().map(|s| s.displacement).fold(0.0_f32, f32::min))
        .unwrap_or(0.0);

    println!("frames simulated:    {}", state.time_ticks);
    println!("projectiles fired:   {fired}");
    println!("planet impacts:      {primary_hits}");
    println!("moon impacts:        {secondary_hits}");
    println!("still flying:        {}", state.flying_projectiles().count());
    println!("deepest planet dent: {deepest_dent:.2}");
    println!("peak glyphs/frame:   {peak_glyphs}");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in `ripple_worlds::web`
}
