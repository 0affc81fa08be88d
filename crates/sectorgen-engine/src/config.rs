//! Generator configuration.
//!
//! [`GeneratorConfig`] carries every tunable distance, range and count the
//! placers and the validator use. The `Default` values are the reference
//! sector archetype; a JSON document can override any subset of fields.
//!
//! # Example
//!
//! ```
//! use sectorgen_engine::config::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_json_str(r#"{ "max_attempts": 4 }"#).unwrap();
//! assert_eq!(config.max_attempts, 4);
//! assert_eq!(config.sector_radius, 10_000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::ConfigError;

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

/// A closed `[min, max]` interval of distances, radii or amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies in the band, both ends inclusive.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFinite { field });
        }
        if self.min < 0.0 {
            return Err(ConfigError::Negative {
                field,
                value: self.min,
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GeneratorConfig
// ---------------------------------------------------------------------------

/// Tunables of the sector archetype. All distances are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Radius of the playable sector.
    pub sector_radius: f64,
    /// No enemy presence inside this radius around spawn.
    pub spawn_safe_radius: f64,
    /// Distance band of the friendly outpost from spawn.
    pub friendly_distance: Band,
    /// Distance band of the enemy outpost from spawn. `min` is also the
    /// minimum friendly <-> enemy spacing.
    pub enemy_distance: Band,
    /// Minimum hazard distance from spawn.
    pub spawn_hazard_distance: f64,
    /// Minimum asteroid field distance from the friendly outpost.
    pub friendly_asteroid_min: f64,
    /// Minimum resource node distance from the enemy outpost.
    pub enemy_resource_min: f64,
    /// Clearance around the spawn -> friendly outpost lane.
    pub corridor_clearance: f64,
    /// Shell in which background dressing is placed.
    pub background_radius: Band,
    pub asteroid_density: Band,
    pub asteroid_radius: Band,
    pub hazard_radius: Band,
    pub resource_amount: Band,
    /// Extra NPC groups at difficulty 0.
    pub npc_base_count: u32,
    /// Extra NPC groups per difficulty level.
    pub npc_per_difficulty: u32,
    /// Hard cap on outer placement + validation attempts.
    pub max_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sector_radius: 10_000.0,
            spawn_safe_radius: 1_000.0,
            friendly_distance: Band::new(800.0, 2_500.0),
            enemy_distance: Band::new(3_000.0, 8_000.0),
            spawn_hazard_distance: 1_000.0,
            friendly_asteroid_min: 500.0,
            enemy_resource_min: 800.0,
            corridor_clearance: 800.0,
            background_radius: Band::new(12_000.0, 20_000.0),
            asteroid_density: Band::new(0.2, 0.8),
            asteroid_radius: Band::new(1_200.0, 2_600.0),
            hazard_radius: Band::new(600.0, 1_400.0),
            resource_amount: Band::new(120.0, 520.0),
            npc_base_count: 6,
            npc_per_difficulty: 3,
            max_attempts: 8,
        }
    }
}

impl GeneratorConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep their
    /// defaults. The result is validated.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is finite and non-negative, every band is
    /// ordered, and at least one attempt is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("sector_radius", self.sector_radius),
            ("spawn_safe_radius", self.spawn_safe_radius),
            ("spawn_hazard_distance", self.spawn_hazard_distance),
            ("friendly_asteroid_min", self.friendly_asteroid_min),
            ("enemy_resource_min", self.enemy_resource_min),
            ("corridor_clearance", self.corridor_clearance),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        self.friendly_distance.check("friendly_distance")?;
        self.enemy_distance.check("enemy_distance")?;
        self.background_radius.check("background_radius")?;
        self.asteroid_density.check("asteroid_density")?;
        self.asteroid_radius.check("asteroid_radius")?;
        self.hazard_radius.check("hazard_radius")?;
        self.resource_amount.check("resource_amount")?;

        if self.asteroid_density.max > 1.0 {
            return Err(ConfigError::OutOfUnitRange {
                field: "asteroid_density",
                value: self.asteroid_density.max,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }

    /// Retry budget of the enemy outpost, hazard, resource and NPC placers.
    pub(crate) fn local_retries(&self) -> u32 {
        self.max_attempts.saturating_mul(2)
    }

    /// Retry budget of the asteroid field placer.
    pub(crate) fn asteroid_retries(&self) -> u32 {
        self.max_attempts.saturating_mul(3)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
