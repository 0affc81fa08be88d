//! Sector-wide constraint checks.
//!
//! The validator runs once per outer attempt over the full candidate layout
//! and reports every violated invariant. A layout is valid iff the list is
//! empty. Background dressing is never checked.

use sectorgen_core::geometry::{distance, segment_distance, Vec3};
use sectorgen_manifest::manifest::Faction;
use sectorgen_manifest::validation::{AttemptResult, Violation};

use crate::config::GeneratorConfig;
use crate::placement::CandidateLayout;

/// Checks candidate layouts against the configured distance invariants.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintValidator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ConstraintValidator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Evaluate `layout` relative to `spawn`.
    pub fn validate(&self, spawn: Vec3, layout: &CandidateLayout) -> AttemptResult {
        let config = self.config;
        let friendly = layout.friendly_outpost.position;
        let enemy = layout.enemy_outpost.position;
        let mut violations = Vec::new();

        if distance(spawn, enemy) < config.spawn_safe_radius {
            violations.push(Violation::EnemyOutpostInSpawnZone);
        }
        if !config.friendly_distance.contains(distance(spawn, friendly)) {
            violations.push(Violation::FriendlyOutpostDistance);
        }
        if distance(friendly, enemy) < config.enemy_distance.min {
            violations.push(Violation::OutpostSpacing);
        }

        for hazard in &layout.hazards {
            if distance(spawn, hazard.position) < config.spawn_hazard_distance {
                violations.push(Violation::HazardNearSpawn);
            }
            if segment_distance(hazard.position, spawn, friendly) < config.corridor_clearance {
                violations.push(Violation::HazardBlocksCorridor);
            }
        }

        for field in &layout.asteroid_fields {
            if segment_distance(field.center, spawn, friendly) < config.corridor_clearance {
                violations.push(Violation::AsteroidBlocksCorridor);
            }
            if distance(field.center, friendly) < config.friendly_asteroid_min {
                violations.push(Violation::AsteroidNearFriendly);
            }
        }

        for node in &layout.resource_nodes {
            if distance(node.position, enemy) < config.enemy_resource_min {
                violations.push(Violation::ResourceNearEnemy);
            }
        }

        let has_faction =
            |faction: Faction| layout.npc_groups.iter().any(|g| g.faction == faction);
        if !has_faction(Faction::Friendly) {
            violations.push(Violation::MissingFriendlyNpc);
        }
        if !has_faction(Faction::Hostile) {
            violations.push(Violation::MissingHostileNpc);
        }

        AttemptResult::from_violations(violations)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
