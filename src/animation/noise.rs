//! Seeded, stateless pseudo-randomness.
//!
//! Every value is a pure function of `(seed, index)`, so any frame can be re-rendered without
//! replaying the frames before it.

use xxhash_rust::xxh3::xxh3_64_with_seed;

const SCENE_SEED_SALT: u64 = 0x5EED_5CE4_E000_0001;

/// Derive a stable per-scene seed from scene content.
pub fn scene_seed(text: &str) -> u64 {
    xxh3_64_with_seed(text.as_bytes(), SCENE_SEED_SALT)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Uniform value in `[0, 1)` for lattice point `x`.
pub fn noise01(seed: u64, x: u64) -> f64 {
    let mut rng = Rng64::new(seed ^ x.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01()
}

/// Uniform value in `[-1, 1)` for lattice point `x`.
pub fn noise_signed(seed: u64, x: u64) -> f64 {
    noise01(seed, x) * 2.0 - 1.0
}

/// Smooth 1D value noise in `[-1, 1]`, continuous in `x`.
pub fn value_noise_1d(seed: u64, x: f64) -> f64 {
    let x = x.max(0.0);
    let i0 = x.floor();
    let t = x - i0;
    let i0u = i0 as u64;
    let a = noise_signed(seed, i0u);
    let b = noise_signed(seed, i0u + 1);
    // smoothstep keeps the derivative continuous at lattice points
    let s = t * t * (3.0 - 2.0 * t);
    a + (b - a) * s
}

#[cfg(test)]
#[path = "../../tests/unit/animation/noise.rs"]
mod tests;
