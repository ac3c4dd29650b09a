//! Seedable random stream used by the weighted selector.
//!
//! A run owns exactly one stream. Given the same seed and the same sequence
//! of draws, every platform produces the same values, which is what makes
//! offers reproducible in tests and replays.

/// Source of uniform random numbers for selection.
pub trait SelectionRng {
    /// Advance the stream and return the next 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, 1)`.
    ///
    /// Built from a single 32-bit draw, so `1.0` is never produced.
    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// PCG-XSH-RR stream (Permuted Congruential Generator).
///
/// 64 bits of state, 32 bits of output per step.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgStream {
    state: u64,
}

impl PcgStream {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a stream from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed.wrapping_add(Self::INCREMENT)),
        }
    }

    /// Resumes a stream from a state previously returned by [`Self::state`].
    pub fn from_state(state: u64) -> Self {
        Self { state }
    }

    /// Current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl SelectionRng for PcgStream {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}
