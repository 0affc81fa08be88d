//! Sectorgen Engine -- Deterministic procedural sector generation.
//!
//! This crate builds on [`sectorgen_core`] (seeds, random streams, geometry,
//! themes) and [`sectorgen_manifest`] (the output data model) to turn a
//! `(sector_id, seed, difficulty, theme_hint)` tuple into a validated
//! [`SectorManifest`](sectorgen_manifest::manifest::SectorManifest).
//!
//! Identical inputs always produce an identical manifest, apart from the
//! wall-clock `generation_time_ms` field.
//!
//! # Quick Start
//!
//! ```
//! use sectorgen_engine::prelude::*;
//!
//! let generator = SectorGenerator::new(GeneratorConfig::default()).unwrap();
//! let request = SectorRequest::new("beta", 7).with_difficulty(5);
//! let manifest = generator.generate(&request);
//!
//! // Two anchor groups, six base groups, three per difficulty level.
//! assert_eq!(manifest.npc_groups.len(), 2 + 6 + 15);
//! assert_eq!(manifest.enemy_outposts.len(), 1);
//! ```

#![deny(unsafe_code)]

pub mod builder;
pub mod config;
pub mod placement;
pub mod validator;

pub use builder::{generate, BuildState, SectorGenerator, SectorManifestBuilder, SectorRequest};

/// Re-export the core crate for convenience.
pub use sectorgen_core;

/// Re-export the manifest crate for convenience.
pub use sectorgen_manifest;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while loading or checking a [`GeneratorConfig`](config::GeneratorConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for this schema.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config field `{field}` must be finite")]
    NonFinite { field: &'static str },

    #[error("config field `{field}` must be non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// A band whose `min` exceeds its `max`.
    #[error("config field `{field}` has min {min} greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("config field `{field}` must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common generator usage.
pub mod prelude {
    pub use sectorgen_core::prelude::*;
    pub use sectorgen_manifest::prelude::*;

    pub use crate::builder::{
        generate, BuildState, SectorGenerator, SectorManifestBuilder, SectorRequest,
    };
    pub use crate::config::{Band, GeneratorConfig};
    pub use crate::placement::{AttemptStreams, CandidateLayout, PlacementEngine};
    pub use crate::validator::ConstraintValidator;
    pub use crate::ConfigError;
}
