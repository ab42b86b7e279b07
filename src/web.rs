//! Browser bindings
//!
//! Thin `wasm-bindgen` wrappers so the JavaScript game loop can drive the
//! seed map and particle system directly.

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::fx::{CanvasContext, Color, ParticleSystem, SpawnOptions, Viewport};
use crate::seed::SeedMap;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("seedfx ready");
}

/// World seed from saved settings
#[wasm_bindgen(js_name = worldSeed)]
pub fn world_seed() -> f64 {
    Settings::load().world_seed as f64
}

/// Whether the game loop should call `rain` each tick
#[wasm_bindgen(js_name = rainEnabled)]
pub fn rain_enabled() -> bool {
    Settings::load().effective_rain()
}

#[wasm_bindgen]
pub struct WebSeedMap {
    inner: SeedMap,
}

#[wasm_bindgen]
impl WebSeedMap {
    /// Seeds above 2^53 lose precision in JavaScript; only the low 32 bits matter.
    #[wasm_bindgen(constructor)]
    pub fn new(base_seed: f64) -> Self {
        Self {
            inner: SeedMap::new(js_seed(base_seed)),
        }
    }

    #[wasm_bindgen(js_name = setBaseSeed)]
    pub fn set_base_seed(&mut self, seed: f64) {
        self.inner.set_base_seed(js_seed(seed));
    }

    #[wasm_bindgen(js_name = getSeed)]
    pub fn get_seed(&mut self, x: i32, y: Option<i32>) -> u32 {
        self.inner.get_seed(x, y.unwrap_or(0))
    }
}

/// JavaScript `>>> 0` on a number
fn js_seed(seed: f64) -> u64 {
    u64::from(crate::seed::to_int32(seed) as u32)
}

#[wasm_bindgen]
pub struct WebParticles {
    inner: ParticleSystem,
}

#[wasm_bindgen]
impl WebParticles {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: ParticleSystem::new(),
        }
    }

    /// Burst of `count` particles; `speed` and `gravity` fall back to defaults
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        x: f32,
        y: f32,
        count: usize,
        r: u8,
        g: u8,
        b: u8,
        a: f32,
        speed: Option<f32>,
        gravity: Option<f32>,
    ) {
        let mut options = SpawnOptions::default();
        if let Some(speed) = speed {
            options.speed = speed;
        }
        if let Some(gravity) = gravity {
            options.gravity = gravity;
        }
        self.inner
            .create(Vec2::new(x, y), count, Color::rgba(r, g, b, a), options);
    }

    pub fn rain(&mut self, camera_x: f32, camera_y: f32, canvas_width: f32, zoom: f32) -> bool {
        let view = Viewport::new(Vec2::new(camera_x, camera_y), canvas_width, zoom);
        self.inner.rain(&view)
    }

    pub fn update(&mut self) {
        self.inner.update();
    }

    pub fn draw(&self, ctx: CanvasRenderingContext2d) {
        let mut canvas = CanvasContext::new(ctx);
        self.inner.draw(&mut canvas);
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }
}

impl Default for WebParticles {
    fn default() -> Self {
        Self::new()
    }
}
