//! Deterministic, injectable randomness.
//!
//! Every randomized decision in the workspace (neighbour swaps, MOSA coin
//! flips, dock/station assignment, random layouts) takes an explicit
//! `&mut SimRng`.  Nothing reads a global or thread-local
//! RNG, so a run is fully reproducible from its seed.
//!
//! # Deriving streams
//!
//! [`SimRng::child`] mixes a fresh draw with an offset multiplied by the
//! 64-bit fractional golden ratio, which spreads consecutive offsets
//! uniformly across the seed space.  Use it when two subsystems should not
//! perturb each other's sequence (e.g. layout generation vs. optimization).

use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Fractional part of the golden ratio, as a 64-bit integer.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG threaded through layout generation, robot assignment, and
/// both optimizers.
///
/// Not shared across threads.  Parallel evaluation would hand each worker
/// its own stream from [`child`](Self::child).
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off a stream that no longer shares state with `self`.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let draw: u64 = self.0.r#gen();
        SimRng(SmallRng::seed_from_u64(draw ^ offset.wrapping_mul(MIXING_CONSTANT)))
    }

    /// Draw from the `Standard` distribution; `f64` lands in `[0, 1)`.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Reorder `items` uniformly at random.
    #[inline]
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }

    /// Uniform pick; `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }

    /// `amount` distinct elements of `items` in random order (all of them if
    /// `items` is shorter).
    pub fn sample<T: Copy>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.0, amount.min(items.len()))
            .copied()
            .collect()
    }
}
