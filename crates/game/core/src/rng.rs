//! Deterministic random number generation.
//!
//! The entire match must replay identically from a seed and an action script,
//! so no ambient randomness is permitted. One [`GameRng`] is seeded at match
//! construction and threaded explicitly through map generation and roster
//! randomization.

/// PCG random number generator (PCG-XSH-RR variant).
///
/// Simple, fast, 64 bits of state, and deterministic: the same seed always
/// produces the same sequence.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed, mixing it through one LCG round so
    /// that small seeds do not produce correlated early output.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// Generates the next 32-bit value (XSH-RR output permutation).
    pub fn next_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.step();
        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rotation = (old_state >> 59) as u32;
        xorshifted.rotate_right(rotation)
    }

    /// Uniform value in `[min, max]` inclusive.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + self.next_u32() % span
    }

    /// Index into a collection of `len` elements.
    pub fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }

    /// Bernoulli trial with `percent` in 0..=100.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next_u32() % 100 < percent
    }
}
