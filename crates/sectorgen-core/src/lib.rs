//! Sectorgen Core -- Deterministic building blocks for sector generation.
//!
//! This crate holds everything the placement engine needs that carries no
//! sector-layout knowledge of its own:
//!
//! - [`seed`]: stable BLAKE3-based seed derivation (base seed, named
//!   per-category sub-seeds, per-attempt stream seeds).
//! - [`rng`]: [`SectorRng`](rng::SectorRng), the seeded PCG-64 stream every
//!   placer draws from.
//! - [`geometry`]: distances and the ring / sphere-shell sampling primitives.
//! - [`theme`]: the compiled-in theme catalog.
//!
//! # Quick Start
//!
//! ```
//! use sectorgen_core::prelude::*;
//!
//! let base = derive_base("alpha-01", &SeedValue::from(42), 1, None);
//! let sub_seeds = SubSeeds::derive(base);
//!
//! let mut rng = SectorRng::for_attempt(sub_seeds.outposts, 0);
//! let point = sample_ring(&mut rng, 800.0, 2500.0);
//! assert_eq!(point[1], 0.0);
//!
//! let d = distance(point, ORIGIN);
//! assert!((800.0..=2500.0).contains(&d));
//! ```

#![deny(unsafe_code)]

pub mod geometry;
pub mod rng;
pub mod seed;
pub mod theme;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::geometry::{
        add, distance, sample_ring, sample_sphere_shell, segment_distance, Vec3, ORIGIN,
    };
    pub use crate::rng::SectorRng;
    pub use crate::seed::{derive_attempt, derive_base, derive_sub, SeedValue, SubSeeds};
    pub use crate::theme::{ThemeProfile, THEMES};
}
