//! Particle effects
//!
//! Transient visual particles (rain, sparks) advanced once per tick:
//! - Fixed unit step per tick (position += velocity, then gravity)
//! - Injectable RNG so spawns can be replayed in tests
//! - Rendering through the [`RenderContext`] trait only

pub mod emitter;
pub mod particle;
pub mod render;
pub mod system;

pub use emitter::{SpawnBand, SpawnOptions, Viewport, rain_profile};
pub use particle::{Color, Particle};
pub use render::{RenderContext, SavedState};
pub use system::ParticleSystem;

#[cfg(target_arch = "wasm32")]
pub use render::CanvasContext;
