//! Particle and color types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color handed through to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity (0.0 - 1.0)
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Translucent blue-gray used for raindrops
    pub const RAIN: Color = Color::rgba(174, 194, 224, 0.7);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for a 2D canvas `fillStyle`
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A single short-lived particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in ticks
    pub life: f32,
    /// Life at spawn, used for fading
    pub max_life: f32,
    /// Disc radius
    pub size: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32, size: f32, gravity: f32, color: Color) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            size,
            gravity,
            color,
        }
    }

    /// Advance by one tick
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.life -= 1.0;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Fade factor, 1.0 at spawn down to 0.0 at death
    pub fn alpha(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_applies_velocity_then_gravity() {
        let mut p = Particle::new(
            Vec2::new(1.0, 2.0),
            Vec2::new(0.5, -1.0),
            3.0,
            2.0,
            0.25,
            Color::WHITE,
        );
        p.step();
        assert_eq!(p.pos, Vec2::new(1.5, 1.0));
        assert_eq!(p.vel, Vec2::new(0.5, -0.75));
        assert_eq!(p.life, 2.0);
        assert_eq!(p.max_life, 3.0);

        p.step();
        assert_eq!(p.pos, Vec2::new(2.0, 0.25));
    }

    #[test]
    fn test_alpha_fades() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 4.0, 1.0, 0.0, Color::WHITE);
        assert_eq!(p.alpha(), 1.0);
        p.step();
        assert_eq!(p.alpha(), 0.75);
        p.life = -1.0;
        assert_eq!(p.alpha(), 0.0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::WHITE.to_css(), "rgb(255,255,255)");
        assert_eq!(Color::RAIN.to_css(), "rgba(174,194,224,0.7)");
        assert_eq!(Color::default(), Color::WHITE);
    }
}
