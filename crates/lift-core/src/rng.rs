//! Deterministic RNG for passenger traffic.
//!
//! Traffic is the only source of randomness in the workspace.  The same seed
//! always produces the same arrival stream, so simulation runs and tests are
//! reproducible.  Independent streams (one per traffic generator, say) are
//! derived with [`SimRng::child`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Floor;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG with floor-picking helpers.
///
/// Owned by the single-threaded simulation loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent stream.  Different offsets give different
    /// streams; the parent advances by one draw.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A uniformly chosen floor in `[lowest, floor_count)`.
    ///
    /// # Panics
    /// If the range is empty.
    pub fn floor_from(&mut self, lowest: u32, floor_count: u32) -> Floor {
        Floor(self.0.gen_range(lowest..floor_count))
    }

    /// A uniformly chosen floor other than `except`.
    ///
    /// # Panics
    /// If `floor_count < 2`.
    pub fn floor_other_than(&mut self, except: Floor, floor_count: u32) -> Floor {
        let pick = self.0.gen_range(0..floor_count - 1);
        if pick >= except.0 { Floor(pick + 1) } else { Floor(pick) }
    }
}
