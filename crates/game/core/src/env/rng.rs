//! Deterministic random numbers.
//!
//! Every roll is a pure function of a seed derived from the game seed, the
//! frame, a per-frame draw counter and a caller context, so replays reproduce
//! every drop and monster turn exactly.

pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// A byte, the unit drop rates are expressed in.
    fn next_byte(&self, seed: u64) -> u8 {
        (self.next_u32(seed) >> 24) as u8
    }

    /// Uniform value in `0..bound` (0 when `bound` is 0).
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the roll inputs into one seed.
///
/// * `game_seed` - set at game start, fixed for a replay
/// * `frame` - simulation frame of the roll
/// * `draw` - running count of rolls already taken this frame
/// * `context` - caller tag so unrelated rolls in one frame diverge
pub fn compute_seed(game_seed: u64, frame: u64, draw: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= frame.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (draw as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix64 finalizer
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
