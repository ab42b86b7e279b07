//! Deterministic per-coordinate seeds
//!
//! A single world seed fans out into one reproducible `u32` per `(x, y)`
//! coordinate pair (chunk, feature cell, ...). Values are memoized until the
//! base seed changes.
//!
//! The hash is evaluated with JavaScript number semantics so that worlds
//! generated by the browser build and by native tools agree bit for bit.

use std::collections::HashMap;

/// Multiplier mixed into the x axis
pub const X_MULTIPLIER: f64 = 374_761_393.0;
/// Multiplier mixed into the y axis
pub const Y_MULTIPLIER: f64 = 668_265_263.0;
/// Avalanche multiplier applied after the first fold
pub const AVALANCHE_MULTIPLIER: f64 = 1_274_126_177.0;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Reduce a double to a signed 32-bit integer the way JavaScript `ToInt32` does.
///
/// Non-finite values become 0; everything else is truncated toward zero and
/// wrapped modulo 2^32.
#[inline]
pub fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(TWO_POW_32);
    (wrapped as u64 as u32) as i32
}

/// Hash a coordinate pair under `base_seed`.
///
/// Products are formed in `f64` before reduction. The avalanche product
/// regularly exceeds 2^53, so its low bits are rounded exactly as they are in
/// the browser; `wrapping_mul` would give different seeds.
pub fn compute_seed(base_seed: u32, x: i32, y: i32) -> u32 {
    let mut h = (base_seed as i32)
        ^ to_int32(f64::from(x) * X_MULTIPLIER)
        ^ to_int32(f64::from(y) * Y_MULTIPLIER);
    h = to_int32(f64::from(h ^ (h >> 13)) * AVALANCHE_MULTIPLIER);
    h ^= h >> 16;
    h as u32
}

/// Memoizing map from coordinates to seeds
#[derive(Debug, Clone, Default)]
pub struct SeedMap {
    base_seed: u32,
    seed_cache: HashMap<(i32, i32), u32>,
}

impl SeedMap {
    /// Create a map rooted at `base_seed` (reduced modulo 2^32)
    pub fn new(base_seed: u64) -> Self {
        Self {
            base_seed: base_seed as u32,
            seed_cache: HashMap::new(),
        }
    }

    /// Current base seed
    pub fn base_seed(&self) -> u32 {
        self.base_seed
    }

    /// Replace the base seed and drop every cached value.
    ///
    /// Seeds are reduced modulo 2^32; pass negative seeds as `seed as u64`.
    pub fn set_base_seed(&mut self, seed: u64) {
        self.base_seed = seed as u32;
        log::debug!(
            "Base seed set to {} ({} cached seeds dropped)",
            self.base_seed,
            self.seed_cache.len()
        );
        self.seed_cache.clear();
    }

    /// Seed for the coordinate pair `(x, y)`
    pub fn get_seed(&mut self, x: i32, y: i32) -> u32 {
        let base_seed = self.base_seed;
        *self
            .seed_cache
            .entry((x, y))
            .or_insert_with(|| compute_seed(base_seed, x, y))
    }

    /// Seed for a one-dimensional coordinate (`y = 0`)
    pub fn get_seed_x(&mut self, x: i32) -> u32 {
        self.get_seed(x, 0)
    }

    /// Number of memoized coordinate pairs
    pub fn cached_len(&self) -> usize {
        self.seed_cache.len()
    }
}
