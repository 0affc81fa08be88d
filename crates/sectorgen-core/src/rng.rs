//! Seeded random streams.
//!
//! [`SectorRng`] wraps a PCG-64 generator. Each stream is owned by exactly one
//! placer for one attempt; there is no process-wide generator state. The
//! bit-mixing of the generator itself is opaque to the rest of the crate,
//! which only relies on the small sampling surface exposed here.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::seed::derive_attempt;

/// A deterministic random stream for one content category and attempt.
#[derive(Debug, Clone)]
pub struct SectorRng {
    inner: Pcg64,
}

impl SectorRng {
    /// Create a stream directly from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Pcg64::seed_from_u64(seed),
        }
    }

    /// Create the stream for `attempt` of the category seeded by `sub_seed`.
    pub fn for_attempt(sub_seed: u64, attempt: u32) -> Self {
        Self::from_seed(derive_attempt(sub_seed, attempt))
    }

    /// A float in `[0.0, 1.0)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// A float between `lo` and `hi`.
    ///
    /// Computed as `lo + (hi - lo) * u`, so `lo == hi` returns `lo` and an
    /// inverted pair samples the same interval from the other end.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// An integer in `[lo, hi]` inclusive. Returns `lo` when `hi <= lo`.
    #[inline]
    pub fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..=hi)
    }

    /// `true` with probability `p` (clamped to `[0, 1]`).
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Pick one element uniformly. `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
