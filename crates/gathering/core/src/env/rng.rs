//! Deterministic per-unit success rolls.
//!
//! Settling the same session twice over the same interval must produce the
//! same outcome, so rolls are a pure function of a seed rather than a
//! stateful generator.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same values given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit_interval(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }

    /// True with probability `chance` (clamped to `[0, 1]`).
    fn succeeds(&self, seed: u64, chance: f64) -> bool {
        if chance >= 1.0 {
            return true;
        }
        if chance <= 0.0 {
            return false;
        }
        self.unit_interval(seed) < chance
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Seed for the roll of the `unit_index`-th unit of a session.
///
/// Mixes with a large odd constant so consecutive indices land far apart in
/// the PCG state space.
pub fn unit_seed(session_seed: u64, unit_index: u32) -> u64 {
    session_seed
        .wrapping_add(u64::from(unit_index).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .rotate_left(17)
}

/// Session seed derived from who started it and when.
pub fn session_seed(character: u64, started_at_ms: u64) -> u64 {
    character
        .wrapping_mul(0xA076_1D64_78BD_642F)
        .wrapping_add(started_at_ms)
        .rotate_left(31)
        ^ 0xE703_7ED1_A0B4_28DB
}
