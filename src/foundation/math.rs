/// Small deterministic PRNG (splitmix64) used where the assembly needs
/// randomness that tests must be able to pin down with an explicit seed.
#[derive(Clone, Copy, Debug)]
pub struct SplitMix64(u64);

impl SplitMix64 {
    /// Construct from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Construct from the current wall clock, for one-shot CLI runs where
    /// visual variety across regenerations is the point.
    pub fn from_time() -> Self {
        Self(time_seed_nanos())
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform value in `0..bound` (`bound` must be > 0).
    pub fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        (self.next_u64() % bound as u64) as usize
    }
}

/// Nanosecond wall-clock seed; falls back to a constant if the clock is
/// before the epoch.
pub(crate) fn time_seed_nanos() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(12345)
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
