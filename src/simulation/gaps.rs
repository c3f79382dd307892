//! Sources of obstacle gap heights.
//!
//! The arena never calls a global RNG: every gap height comes from a
//! [`GapSampler`], so two runs with the same sampler see the same field.

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x00F1_A9B1;

/// Draws the gap top height of each new obstacle.
pub trait GapSampler: std::fmt::Debug {
    /// Returns a height inside `range` (start inclusive, end exclusive).
    fn sample(&mut self, range: Range<i32>) -> i32;
}

/// Uniform gap heights from a seeded ChaCha8 stream.
///
/// ChaCha8 output is stable across platforms and crate releases, which keeps
/// scores reproducible for a given seed.
#[derive(Debug, Clone)]
pub struct SeededGaps {
    rng: ChaCha8Rng,
}

impl SeededGaps {
    /// Creates a sampler from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededGaps {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl GapSampler for SeededGaps {
    fn sample(&mut self, range: Range<i32>) -> i32 {
        self.rng.random_range(range)
    }
}

/// Replays a fixed list of heights, cycling when exhausted.
///
/// Heights outside the requested range are clamped into it.
#[derive(Debug, Clone)]
pub struct ScriptedGaps {
    heights: Vec<i32>,
    cursor: usize,
}

impl ScriptedGaps {
    /// Creates a sampler replaying `heights`. An empty list yields the
    /// range start every time.
    pub fn new(heights: Vec<i32>) -> Self {
        Self { heights, cursor: 0 }
    }
}

impl GapSampler for ScriptedGaps {
    fn sample(&mut self, range: Range<i32>) -> i32 {
        let Some(&height) = self.heights.get(self.cursor % self.heights.len().max(1)) else {
            return range.start;
        };
        self.cursor += 1;
        height.clamp(range.start, range.end - 1)
    }
}
