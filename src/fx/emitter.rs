//! Spawn policies and emitter geometry

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Color;

/// Default spread of spawn velocities
pub const DEFAULT_SPEED: f32 = 4.0;
/// Default downward acceleration (units/tick²)
pub const DEFAULT_GRAVITY: f32 = 0.1;
/// Upward bias added to every spawned vertical velocity
pub const UPWARD_BIAS: f32 = 2.0;
/// Random life range in ticks, `[MIN_LIFE, MIN_LIFE + LIFE_SPREAD)`
pub const MIN_LIFE: f32 = 30.0;
pub const LIFE_SPREAD: f32 = 30.0;
/// Random radius range, `[MIN_SIZE, MIN_SIZE + SIZE_SPREAD)`
pub const MIN_SIZE: f32 = 1.0;
pub const SIZE_SPREAD: f32 = 2.0;

/// Chance that a single `rain` call spawns a drop
pub const RAIN_CHANCE: f64 = 0.5;
/// Drops appear this far above the top of the view
pub const RAIN_SPAWN_OFFSET: f32 = 10.0;

/// Kinematic overrides for a spawn request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnOptions {
    /// Width of the random velocity range on each axis
    pub speed: f32,
    pub gravity: f32,
    /// Fixed life in ticks; random when `None`
    pub life: Option<f32>,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            gravity: DEFAULT_GRAVITY,
            life: None,
        }
    }
}

impl SpawnOptions {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_life(mut self, life: f32) -> Self {
        self.life = Some(life);
        self
    }

    /// Slow, heavy drops
    pub fn rain() -> Self {
        Self {
            speed: 1.0,
            gravity: 0.5,
            life: None,
        }
    }
}

/// Horizontal strip in world space where an emitter places new particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBand {
    pub left: f32,
    pub width: f32,
    /// World y of the strip
    pub top: f32,
}

impl SpawnBand {
    /// Point at fraction `t` (0.0 - 1.0) across the band
    pub fn point_at(&self, t: f32) -> Vec2 {
        Vec2::new(self.left + t * self.width, self.top)
    }
}

/// Camera view used by the render layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// World position of the top-left corner
    pub camera: Vec2,
    /// Canvas width in pixels
    pub canvas_width: f32,
    /// Pixels per world unit, must be positive
    pub zoom: f32,
}

impl Viewport {
    pub fn new(camera: Vec2, canvas_width: f32, zoom: f32) -> Self {
        Self {
            camera,
            canvas_width,
            zoom,
        }
    }

    /// Visible width in world units
    pub fn world_width(&self) -> f32 {
        self.canvas_width / self.zoom
    }

    /// Band just above the visible area spanning its full width
    pub fn rain_band(&self) -> SpawnBand {
        SpawnBand {
            left: self.camera.x,
            width: self.world_width(),
            top: self.camera.y - RAIN_SPAWN_OFFSET,
        }
    }
}

/// Rain drop color and kinematics bundled for callers that emit manually
pub fn rain_profile() -> (Color, SpawnOptions) {
    (Color::RAIN, SpawnOptions::rain())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_band_from_viewport() {
        let view = Viewport::new(Vec2::new(100.0, 50.0), 800.0, 2.0);
        assert_eq!(view.world_width(), 400.0);
        let band = view.rain_band();
        assert_eq!(band.left, 100.0);
        assert_eq!(band.width, 400.0);
        assert_eq!(band.top, 40.0);
        assert_eq!(band.point_at(0.5), Vec2::new(300.0, 40.0));
    }

    #[test]
    fn test_options_builders() {
        let opts = SpawnOptions::default().with_speed(0.0).with_gravity(0.0).with_life(1.0);
        assert_eq!(opts.speed, 0.0);
        assert_eq!(opts.gravity, 0.0);
        assert_eq!(opts.life, Some(1.0));

        let (color, rain) = rain_profile();
        assert_eq!(color, Color::RAIN);
        assert_eq!(rain.gravity, 0.5);
        assert_eq!(rain.speed, 1.0);
    }
}
