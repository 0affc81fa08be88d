//! Sectorgen Manifest -- The declarative blueprint of a generated sector.
//!
//! A [`SectorManifest`](manifest::SectorManifest) is the only output of the
//! generator. Downstream systems (world spawner, renderer) read it as an
//! immutable per-visit blueprint of plain positions, rotations, scales and
//! opaque type tags.
//!
//! # Modules
//!
//! - [`manifest`]: the data model, JSON serialization and the BLAKE3 content
//!   hash used to compare manifests for determinism.
//! - [`validation`]: the per-attempt validation record and the named
//!   constraint violations.

#![deny(unsafe_code)]

pub mod manifest;
pub mod validation;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while encoding or decoding manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest could not be converted to or from JSON.
    #[error("manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A decoded manifest is structurally inconsistent.
    #[error("malformed manifest: {details}")]
    Malformed {
        details: String,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::manifest::{
        AsteroidFieldSpec, Behavior, Faction, FieldType, HazardSpec, HazardType,
        ManifestObject, NpcGroup, ObjectDetails, ResourceNodeSpec, ResourceSource, ResourceType,
        SectorManifest, SectorMetadata,
    };
    pub use crate::validation::{AttemptResult, FallbackReason, ValidationRecord, Violation};
    pub use crate::ManifestError;
}
