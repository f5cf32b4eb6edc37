//! Random sampling shared by weight initialization, mutation and selection
extern crate rand;
extern crate rand_xorshift;

use self::rand::{FromEntropy, Rng, SeedableRng};
use self::rand_xorshift::XorShiftRng;

/// Returns a reproducible random source
pub fn seeded(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// Returns an unseeded random source
pub fn from_entropy() -> XorShiftRng {
    XorShiftRng::from_entropy()
}

#[inline]
/// Uniform draw from `[0, 1)`
pub fn unit<R: Rng>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

#[inline]
/// Uniform draw from `[-magnitude, magnitude)`
pub fn symmetric<R: Rng>(rng: &mut R, magnitude: f32) -> f32 {
    magnitude * (unit(rng) * 2. - 1.)
}

#[inline]
/// True with probability `chance`.  Never fires at 0, always fires at 1.
pub fn coin<R: Rng>(rng: &mut R, chance: f32) -> bool {
    unit(rng) < chance
}

/// Picks a rank in `[0, size)` biased towards 0.
///
/// Draws `u` from `[0, 1)` and returns `floor(u ^ selection_factor * size)`.
/// Factors above 1 skew the draw towards the fittest ranks.
///
/// # Panics
///
/// Panics if `size` is 0: there is no rank to pick.
pub fn rank_biased_index<R: Rng>(rng: &mut R, size: usize, selection_factor: f32) -> usize {
    assert!(size > 0);
    let r = unit(rng).powf(selection_factor);
    // u^sf can round up to 1.0 in f32 when sf < 1
    ((r * size as f32).floor() as usize).min(size - 1)
}
