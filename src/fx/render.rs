//! Renderer seam for particle drawing
//!
//! The simulation only needs a handful of 2D canvas capabilities. Anything
//! implementing [`RenderContext`] can draw a [`ParticleSystem`](super::ParticleSystem):
//! a browser canvas, a native backend, or a recording double in tests.

use std::ops::{Deref, DerefMut};

use glam::Vec2;

use super::Color;

/// Minimal drawing surface used by the particle engine
pub trait RenderContext {
    /// Push the current drawing state (alpha, fill style)
    fn save(&mut self);
    /// Pop the state pushed by the matching [`save`](Self::save)
    fn restore(&mut self);
    /// Global transparency applied to subsequent fills
    fn set_alpha(&mut self, alpha: f32);
    fn alpha(&self) -> f32;
    /// Fill a disc of `radius` centered at `center`
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: &Color);
}

/// Restores the wrapped context when dropped, so state changes never leak
/// past the scope that made them.
pub struct SavedState<'a, C: RenderContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: RenderContext + ?Sized> SavedState<'a, C> {
    pub fn new(ctx: &'a mut C) -> Self {
        ctx.save();
        Self { ctx }
    }
}

impl<C: RenderContext + ?Sized> Deref for SavedState<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: RenderContext + ?Sized> DerefMut for SavedState<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: RenderContext + ?Sized> Drop for SavedState<'_, C> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}

/// Browser canvas adapter
#[cfg(target_arch = "wasm32")]
pub struct CanvasContext {
    inner: web_sys::CanvasRenderingContext2d,
}

#[cfg(target_arch = "wasm32")]
impl CanvasContext {
    pub fn new(inner: web_sys::CanvasRenderingContext2d) -> Self {
        Self { inner }
    }
}

#[cfg(target_arch = "wasm32")]
impl RenderContext for CanvasContext {
    fn save(&mut self) {
        self.inner.save();
    }

    fn restore(&mut self) {
        self.inner.restore();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.inner.set_global_alpha(f64::from(alpha));
    }

    fn alpha(&self) -> f32 {
        self.inner.global_alpha() as f32
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: &Color) {
        self.inner.set_fill_style_str(&color.to_css());
        self.inner.begin_path();
        // arc only fails for a negative radius
        if let Err(e) = self.inner.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius),
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("Canvas arc failed: {:?}", e);
            return;
        }
        self.inner.fill();
    }
}
