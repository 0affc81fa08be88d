//! The sector manifest data model.
//!
//! [`SectorManifest`] is the aggregate root: metadata, the spawn point, the
//! placed content of the committed attempt, the [`ValidationRecord`] and a
//! timing diagnostic. Every type derives `Serialize`/`Deserialize`, and the
//! JSON shape is the manifest's external interface:
//!
//! ```text
//! {
//!   "metadata": { "sector_id", "seed", "difficulty", "theme_id", "palette", "sub_seeds" },
//!   "spawn_point": [x, y, z],
//!   "safe_zone_radius": 1000.0,
//!   "friendly_outposts": [..], "enemy_outposts": [..],
//!   "npc_groups": [..], "asteroid_fields": [..], "hazards": [..],
//!   "resource_nodes": [..], "background_elements": [..],
//!   "validation": { "attempts": { "0": { "valid", "violations" } }, "fallback"? },
//!   "generation_time_ms": 1.23
//! }
//! ```
//!
//! # Determinism
//!
//! Everything except `generation_time_ms` is a pure function of the
//! generation inputs. [`SectorManifest::content_hash`] hashes exactly that
//! part, so two manifests for the same inputs always share a hash.

use std::collections::BTreeMap;

use sectorgen_core::geometry::Vec3;
use sectorgen_core::seed::SubSeeds;
use sectorgen_core::theme::ThemeProfile;
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationRecord, Violation};
use crate::ManifestError;

// ---------------------------------------------------------------------------
// SectorMetadata
// ---------------------------------------------------------------------------

/// Inputs and derived seeds of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorMetadata {
    /// Caller-supplied sector identifier.
    pub sector_id: String,
    /// Derived base seed.
    pub seed: u64,
    /// Difficulty as supplied by the caller.
    pub difficulty: i64,
    /// Id of the selected theme.
    pub theme_id: String,
    /// Palette copied from the theme.
    pub palette: [String; 3],
    /// Per-category sub-seeds.
    pub sub_seeds: BTreeMap<String, u64>,
}

impl SectorMetadata {
    /// Assemble metadata from the derived seeds and the selected theme.
    pub fn new(
        sector_id: &str,
        seed: u64,
        difficulty: i64,
        theme: &ThemeProfile,
        sub_seeds: &SubSeeds,
    ) -> Self {
        Self {
            sector_id: sector_id.to_owned(),
            seed,
            difficulty,
            theme_id: theme.id.to_owned(),
            palette: theme.palette.map(str::to_owned),
            sub_seeds: sub_seeds.to_map(),
        }
    }
}

// ---------------------------------------------------------------------------
// ManifestObject
// ---------------------------------------------------------------------------

/// Per-kind payload of a [`ManifestObject`].
///
/// Serialized untagged, as a flat JSON map of the variant's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectDetails {
    /// A friendly outpost.
    FriendlyOutpost {
        /// Radius around the outpost where hostiles should not engage.
        safe_radius: f64,
        /// Whether the outpost is visible from spawn.
        line_of_sight: bool,
    },
    /// An enemy outpost.
    EnemyOutpost {
        /// Defensive strength, 1 to 3.
        defense_level: u8,
    },
    /// A parallax background element.
    Background {
        /// The sector palette the element is tinted with.
        palette: [String; 3],
        /// Always `true`: background elements are parallax-only.
        parallax: bool,
    },
}

/// A generic placed entity: outposts and background elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestObject {
    /// Opaque type tag (`"friendly_outpost"`, `"wireframe_planet"`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub details: ObjectDetails,
}

// ---------------------------------------------------------------------------
// NPC groups
// ---------------------------------------------------------------------------

/// NPC group allegiance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Friendly,
    Hostile,
    Neutral,
}

impl Faction {
    /// All factions in sampling order.
    pub const ALL: [Faction; 3] = [Faction::Friendly, Faction::Hostile, Faction::Neutral];
}

/// NPC group movement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    Roam,
    Escort,
    Patrol,
}

impl Behavior {
    /// All behaviors in sampling order.
    pub const ALL: [Behavior; 3] = [Behavior::Roam, Behavior::Escort, Behavior::Patrol];
}

/// A group of NPC ships anchored at a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcGroup {
    pub faction: Faction,
    pub behavior: Behavior,
    /// Anchor position of the group.
    pub position: Vec3,
    /// Three waypoints scattered around the anchor, in world coordinates.
    pub patrol_route: Vec<Vec3>,
}

// ---------------------------------------------------------------------------
// Asteroid fields
// ---------------------------------------------------------------------------

/// Asteroid field layout style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Cluster,
    Belt,
    Scatter,
}

impl FieldType {
    /// All field types in sampling order.
    pub const ALL: [FieldType; 3] = [FieldType::Cluster, FieldType::Belt, FieldType::Scatter];
}

/// An asteroid field for downstream spawners to populate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidFieldSpec {
    pub field_type: FieldType,
    pub center: Vec3,
    pub radius: f64,
    /// Fill density in `[0, 1]`.
    pub density: f64,
    /// Informational anchor count for spawners.
    pub anchors: u32,
}

// ---------------------------------------------------------------------------
// Hazards
// ---------------------------------------------------------------------------

/// Kind of environmental hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Radiation,
    GravityAnomaly,
    Minefield,
}

impl HazardType {
    /// All hazard types in sampling order.
    pub const ALL: [HazardType; 3] = [
        HazardType::Radiation,
        HazardType::GravityAnomaly,
        HazardType::Minefield,
    ];
}

/// A spherical hazard zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardSpec {
    pub hazard_type: HazardType,
    pub position: Vec3,
    pub radius: f64,
    /// Strength in `[0, 1]`.
    pub severity: f64,
}

// ---------------------------------------------------------------------------
// Resource nodes
// ---------------------------------------------------------------------------

/// Harvestable resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Water,
    Titanium,
    Tyllium,
}

impl ResourceType {
    /// All resource types in sampling order.
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Water,
        ResourceType::Titanium,
        ResourceType::Tyllium,
    ];
}

/// What a resource node was anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceSource {
    AsteroidField,
    Hazard,
    OpenSpace,
}

/// A harvestable resource deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNodeSpec {
    pub position: Vec3,
    pub resource_type: ResourceType,
    pub amount: f64,
    pub source: ResourceSource,
}

// ---------------------------------------------------------------------------
// SectorManifest
// ---------------------------------------------------------------------------

/// The complete static content blueprint of one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorManifest {
    pub metadata: SectorMetadata,
    pub spawn_point: Vec3,
    pub safe_zone_radius: f64,
    /// Always exactly one entry.
    pub friendly_outposts: Vec<ManifestObject>,
    /// Always exactly one entry.
    pub enemy_outposts: Vec<ManifestObject>,
    pub npc_groups: Vec<NpcGroup>,
    pub asteroid_fields: Vec<AsteroidFieldSpec>,
    pub hazards: Vec<HazardSpec>,
    pub resource_nodes: Vec<ResourceNodeSpec>,
    pub background_elements: Vec<ManifestObject>,
    pub validation: ValidationRecord,
    /// Wall-clock generation time. Diagnostic only; excluded from
    /// [`content_hash`](Self::content_hash).
    pub generation_time_ms: f64,
}

impl SectorManifest {
    /// Serialize to pretty-printed JSON (2-space indent).
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a manifest from JSON and check its structural shape.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Json`] for invalid JSON or a mismatched
    /// schema, and [`ManifestError::Malformed`] when the outpost lists do
    /// not hold exactly one entry each or no attempt was recorded.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: SectorManifest = serde_json::from_str(json)?;
        if manifest.friendly_outposts.len() != 1 || manifest.enemy_outposts.len() != 1 {
            return Err(ManifestError::Malformed {
                details: format!(
                    "expected one friendly and one enemy outpost, found {} and {}",
                    manifest.friendly_outposts.len(),
                    manifest.enemy_outposts.len()
                ),
            });
        }
        if manifest.validation.attempts.is_empty() {
            return Err(ManifestError::Malformed {
                details: "validation record holds no attempts".to_owned(),
            });
        }
        Ok(manifest)
    }

    /// BLAKE3 hex digest of the deterministic part of the manifest.
    ///
    /// The hash covers the canonical JSON encoding with
    /// `generation_time_ms` removed.
    pub fn content_hash(&self) -> Result<String, ManifestError> {
        let mut value = serde_json::to_value(self)?;
        if let Some(object) = value.as_object_mut() {
            object.remove("generation_time_ms");
        }
        let bytes = serde_json::to_vec(&value)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }

    /// Whether the committed layout failed validation.
    pub fn is_fallback(&self) -> bool {
        self.validation.is_fallback()
    }

    /// Index of the committed attempt.
    pub fn committed_attempt(&self) -> Option<u32> {
        self.validation.committed_attempt()
    }

    /// Violations of the committed attempt (empty unless a fallback).
    pub fn committed_violations(&self) -> &[Violation] {
        self.committed_attempt()
            .and_then(|index| self.validation.attempts.get(&index))
            .map(|result| result.violations.as_slice())
            .unwrap_or(&[])
    }

    /// The single friendly outpost.
    pub fn friendly_outpost(&self) -> Option<&ManifestObject> {
        self.friendly_outposts.first()
    }

    /// The single enemy outpost.
    pub fn enemy_outpost(&self) -> Option<&ManifestObject> {
        self.enemy_outposts.first()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use sectorgen_core::theme::THEMES;

    use super::*;
    use crate::validation::{AttemptResult, FallbackReason};

    fn outpost(kind: &str, details: ObjectDetails) -> ManifestObject {
        ManifestObject {
            kind: kind.to_owned(),
            position: [1200.0, 0.0, -300.0],
            rotation: [0.0, 45.0, 0.0],
            scale: [1.0, 1.0, 1.0],
            details,
        }
    }

    fn sample_manifest() -> SectorManifest {
        let theme = &THEMES[1];
        let sub_seeds = SubSeeds::derive(42);
        let mut validation = ValidationRecord::new();
        validation.record(0, AttemptResult::from_violations(vec![]));

        SectorManifest {
            metadata: SectorMetadata::new("alpha-01", 42, 1, theme, &sub_seeds),
            spawn_point: [0.0, 0.0, 0.0],
            safe_zone_radius: 1000.0,
            friendly_outposts: vec![outpost(
                "friendly_outpost",
                ObjectDetails::FriendlyOutpost {
                    safe_radius: 650.0,
                    line_of_sight: true,
                },
            )],
            enemy_outposts: vec![outpost(
                "enemy_outpost",
                ObjectDetails::EnemyOutpost { defense_level: 2 },
            )],
            npc_groups: vec![NpcGroup {
                faction: Faction::Hostile,
                behavior: Behavior::Patrol,
                position: [5000.0, 10.0, 5000.0],
                patrol_route: vec![[5200.0, 10.0, 5000.0]; 3],
            }],
            asteroid_fields: vec![AsteroidFieldSpec {
                field_type: FieldType::Belt,
                center: [-4000.0, 0.0, 2000.0],
                radius: 1500.0,
                density: 0.5,
                anchors: 3,
            }],
            hazards: vec![HazardSpec {
                hazard_type: HazardType::GravityAnomaly,
                position: [0.0, 0.0, 7000.0],
                radius: 900.0,
                severity: 0.4,
            }],
            resource_nodes: vec![ResourceNodeSpec {
                position: [-4100.0, 0.0, 2100.0],
                resource_type: ResourceType::Tyllium,
                amount: 300.0,
                source: ResourceSource::AsteroidField,
            }],
            background_elements: vec![ManifestObject {
                kind: "nebula_volume".to_owned(),
                position: [15000.0, 2000.0, 0.0],
                rotation: [10.0, 20.0, 30.0],
                scale: [9000.0; 3],
                details: ObjectDetails::Background {
                    palette: theme.palette.map(str::to_owned),
                    parallax: true,
                },
            }],
            validation,
            generation_time_ms: 1.5,
        }
    }

    #[test]
    fn json_uses_external_field_names() {
        let manifest = sample_manifest();
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["metadata"]["theme_id"], "nebula_drift");
        assert_eq!(value["metadata"]["palette"][0], "#A56BFF");
        assert_eq!(value["metadata"]["sub_seeds"].as_object().unwrap().len(), 7);
        assert_eq!(value["spawn_point"], serde_json::json!([0.0, 0.0, 0.0]));
        assert_eq!(value["friendly_outposts"][0]["type"], "friendly_outpost");
        assert_eq!(value["friendly_outposts"][0]["details"]["safe_radius"], 650.0);
        assert_eq!(value["friendly_outposts"][0]["details"]["line_of_sight"], true);
        assert_eq!(value["enemy_outposts"][0]["details"]["defense_level"], 2);
        assert_eq!(value["npc_groups"][0]["faction"], "hostile");
        assert_eq!(value["asteroid_fields"][0]["field_type"], "belt");
        assert_eq!(value["hazards"][0]["hazard_type"], "gravity_anomaly");
        assert_eq!(value["resource_nodes"][0]["source"], "asteroid_field");
        assert_eq!(value["background_elements"][0]["details"]["parallax"], true);
        assert_eq!(value["validation"]["attempts"]["0"]["valid"], true);
    }

    #[test]
    fn json_round_trip_preserves_typed_details() {
        let manifest = sample_manifest();
        let json = manifest.to_json().unwrap();
        let back = SectorManifest::from_json(&json).unwrap();
        assert_eq!(back, manifest);
        assert!(matches!(
            back.enemy_outposts[0].details,
            ObjectDetails::EnemyOutpost { defense_level: 2 }
        ));
        assert!(matches!(
            back.background_elements[0].details,
            ObjectDetails::Background { parallax: true, .. }
        ));
    }

    #[test]
    fn content_hash_ignores_generation_time() {
        let a = sample_manifest();
        let mut b = sample_manifest();
        b.generation_time_ms = 999.0;
        let hash = a.content_hash().unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, b.content_hash().unwrap());

        b.hazards[0].severity = 0.41;
        assert_ne!(hash, b.content_hash().unwrap());
    }

    #[test]
    fn from_json_rejects_missing_outpost() {
        let mut manifest = sample_manifest();
        manifest.enemy_outposts.clear();
        let json = serde_json::to_string(&manifest).unwrap();
        let err = SectorManifest::from_json(&json).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed { .. }));
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = SectorManifest::from_json("{\"metadata\": 3}").unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)));
    }

    #[test]
    fn fallback_accessors() {
        let mut manifest = sample_manifest();
        assert!(!manifest.is_fallback());
        assert_eq!(manifest.committed_attempt(), Some(0));
        assert!(manifest.committed_violations().is_empty());

        manifest.validation = ValidationRecord::new();
        manifest.validation.record(
            0,
            AttemptResult::from_violations(vec![Violation::OutpostSpacing]),
        );
        manifest.validation.fallback = Some(FallbackReason::MaxAttemptsReached);
        assert!(manifest.is_fallback());
        assert_eq!(manifest.committed_violations(), &[Violation::OutpostSpacing]);
        assert_eq!(manifest.friendly_outpost().unwrap().kind, "friendly_outpost");
    }
}
