//! Particle system: spawning, per-tick update, drawing

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::emitter::{
    LIFE_SPREAD, MIN_LIFE, MIN_SIZE, RAIN_CHANCE, SIZE_SPREAD, SpawnBand, SpawnOptions,
    UPWARD_BIAS, Viewport, rain_profile,
};
use super::render::{RenderContext, SavedState};
use super::{Color, Particle};

/// Owns every live particle and the random source used to spawn them
#[derive(Debug, Clone)]
pub struct ParticleSystem<R = Pcg32> {
    particles: Vec<Particle>,
    rng: R,
}

impl ParticleSystem {
    /// System with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_rng(Pcg32::from_rng(&mut rand::rng()))
    }

    /// Reproducible system, same seed gives the same spawns
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ParticleSystem<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    /// Spawn `count` randomized particles at `pos`.
    /// A non-positive `options.life` spawns nothing.
    pub fn create(&mut self, pos: Vec2, count: usize, color: Color, options: SpawnOptions) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = self.roll(pos, color, &options);
            self.spawn(particle);
        }
    }

    /// Add a fully specified particle. Dead particles are dropped and
    /// `max_life` is raised to at least `life`.
    pub fn spawn(&mut self, mut particle: Particle) {
        if !particle.is_alive() {
            return;
        }
        particle.max_life = particle.max_life.max(particle.life);
        self.particles.push(particle);
    }

    /// Rain emitter for the current view. Call once per tick.
    pub fn rain(&mut self, viewport: &Viewport) -> bool {
        self.rain_in(&viewport.rain_band())
    }

    /// Coin-flip a single raindrop somewhere along `band`.
    /// Returns whether a drop was spawned.
    pub fn rain_in(&mut self, band: &SpawnBand) -> bool {
        if !self.rng.random_bool(RAIN_CHANCE) {
            return false;
        }
        let pos = band.point_at(self.rng.random());
        let (color, options) = rain_profile();
        let particle = self.roll(pos, color, &options);
        self.spawn(particle);
        true
    }

    /// Advance every particle one tick and drop the expired ones.
    pub fn update(&mut self) {
        // retain_mut visits each element exactly once in order, so removing
        // a particle never skips or re-steps its neighbours.
        self.particles.retain_mut(|p| {
            p.step();
            p.is_alive()
        });
    }

    /// Draw every live particle, fading with remaining life.
    /// Context state is restored before returning.
    pub fn draw<C: RenderContext + ?Sized>(&self, ctx: &mut C) {
        let mut ctx = SavedState::new(ctx);
        for p in self.particles.iter().filter(|p| p.is_alive()) {
            ctx.set_alpha(p.alpha());
            ctx.fill_disc(p.pos, p.size, &p.color);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn roll(&mut self, pos: Vec2, color: Color, options: &SpawnOptions) -> Particle {
        let vx = (self.rng.random::<f32>() - 0.5) * options.speed;
        let vy = (self.rng.random::<f32>() - 0.5) * options.speed - UPWARD_BIAS;
        let life = match options.life {
            Some(life) => life,
            None => self.draw_below(MIN_LIFE, LIFE_SPREAD),
        };
        let size = self.draw_below(MIN_SIZE, SIZE_SPREAD);
        Particle::new(pos, Vec2::new(vx, vy), life, size, options.gravity, color)
    }

    /// Uniform draw in `[min, min + spread)` for positive bounds.
    fn draw_below(&mut self, min: f32, spread: f32) -> f32 {
        let max = min + spread;
        let value = (f64::from(min) + self.rng.random::<f64>() * f64::from(spread)) as f32;
        // Narrowing to f32 can round up onto `max`
        value.min(f32::from_bits(max.to_bits() - 1))
    }
}
