//! Per-attempt validation results recorded in every manifest.
//!
//! The generator evaluates up to `max_attempts` candidate layouts. Each
//! evaluated attempt leaves an [`AttemptResult`] in the
//! [`ValidationRecord`], keyed by attempt index. When no attempt validates,
//! the record carries a [`FallbackReason`] and the manifest holds the last
//! attempt's layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

/// A named sector-wide constraint failure.
///
/// Serialized as its snake_case name. Per-object checks append one entry per
/// offending object, so a name may repeat within one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// The enemy outpost sits inside the spawn safe radius.
    EnemyOutpostInSpawnZone,
    /// The friendly outpost lies outside the friendly distance band.
    FriendlyOutpostDistance,
    /// The two outposts are closer than the enemy band minimum.
    OutpostSpacing,
    /// A hazard is too close to spawn.
    HazardNearSpawn,
    /// A hazard intrudes on the spawn -> friendly corridor.
    HazardBlocksCorridor,
    /// The asteroid field center intrudes on the spawn -> friendly corridor.
    AsteroidBlocksCorridor,
    /// The asteroid field center is too close to the friendly outpost.
    AsteroidNearFriendly,
    /// A resource node is too close to the enemy outpost.
    ResourceNearEnemy,
    /// No NPC group has the friendly faction.
    MissingFriendlyNpc,
    /// No NPC group has the hostile faction.
    MissingHostileNpc,
}

impl Violation {
    /// The serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Violation::EnemyOutpostInSpawnZone => "enemy_outpost_in_spawn_zone",
            Violation::FriendlyOutpostDistance => "friendly_outpost_distance",
            Violation::OutpostSpacing => "outpost_spacing",
            Violation::HazardNearSpawn => "hazard_near_spawn",
            Violation::HazardBlocksCorridor => "hazard_blocks_corridor",
            Violation::AsteroidBlocksCorridor => "asteroid_blocks_corridor",
            Violation::AsteroidNearFriendly => "asteroid_near_friendly",
            Violation::ResourceNearEnemy => "resource_near_enemy",
            Violation::MissingFriendlyNpc => "missing_friendly_npc",
            Violation::MissingHostileNpc => "missing_hostile_npc",
        }
    }
}

// ---------------------------------------------------------------------------
// FallbackReason
// ---------------------------------------------------------------------------

/// Why an invalid layout was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Every attempt up to the cap failed validation.
    MaxAttemptsReached,
}

// ---------------------------------------------------------------------------
// AttemptResult
// ---------------------------------------------------------------------------

/// The validator's verdict on one candidate layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    /// `true` iff `violations` is empty.
    pub valid: bool,
    /// Every failed check, in evaluation order.
    pub violations: Vec<Violation>,
}

impl AttemptResult {
    /// Build a result from the collected violations.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationRecord
// ---------------------------------------------------------------------------

/// Validation history of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Results keyed by attempt index (serialized as string keys).
    pub attempts: BTreeMap<u32, AttemptResult>,
    /// Set when the committed layout failed validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackReason>,
}

impl ValidationRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the result of `attempt`.
    pub fn record(&mut self, attempt: u32, result: AttemptResult) {
        self.attempts.insert(attempt, result);
    }

    /// Number of attempts evaluated.
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Whether the committed layout is a fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Index of the attempt whose layout was committed: the lowest valid
    /// attempt, otherwise the highest evaluated one.
    pub fn committed_attempt(&self) -> Option<u32> {
        self.attempts
            .iter()
            .find(|(_, result)| result.valid)
            .map(|(index, _)| *index)
            .or_else(|| self.attempts.keys().next_back().copied())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
