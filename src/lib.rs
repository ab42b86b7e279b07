//! seedfx - world seeds and particle effects for the Soleria browser RPG
//!
//! Core modules:
//! - `seed`: Deterministic per-coordinate seeds for procedural generation
//! - `fx`: Particle simulation (sparks, rain) behind a renderer-agnostic seam
//!
//! Supporting modules:
//! - `quests`: Main story quest data
//! - `assets`: Player asset consistency check
//! - `server`: Development static-file server (native only)
//! - `settings`: Persisted preferences

pub mod assets;
pub mod fx;
pub mod quests;
pub mod seed;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod settings;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use fx::{Color, Particle, ParticleSystem, RenderContext, SpawnOptions, Viewport};
pub use seed::SeedMap;
pub use settings::Settings;
