//! Integration tests for the sector layout invariants.
//!
//! Every invariant is recomputed here from the manifest geometry rather than
//! trusted from the recorded validation verdict.

use sectorgen_engine::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Recompute the violations of a committed manifest under `config`.
fn recompute_violations(manifest: &SectorManifest, config: &GeneratorConfig) -> Vec<Violation> {
    let spawn = manifest.spawn_point;
    let friendly = manifest.friendly_outpost().unwrap().position;
    let enemy = manifest.enemy_outpost().unwrap().position;
    let mut violations = Vec::new();

    if distance(spawn, enemy) < config.spawn_safe_radius {
        violations.push(Violation::EnemyOutpostInSpawnZone);
    }
    let d = distance(spawn, friendly);
    if d < config.friendly_distance.min || d > config.friendly_distance.max {
        violations.push(Violation::FriendlyOutpostDistance);
    }
    if distance(friendly, enemy) < config.enemy_distance.min {
        violations.push(Violation::OutpostSpacing);
    }
    for hazard in &manifest.hazards {
        if distance(spawn, hazard.position) < config.spawn_hazard_distance {
            violations.push(Violation::HazardNearSpawn);
        }
        if segment_distance(hazard.position, spawn, friendly) < config.corridor_clearance {
            violations.push(Violation::HazardBlocksCorridor);
        }
    }
    for field in &manifest.asteroid_fields {
        if segment_distance(field.center, spawn, friendly) < config.corridor_clearance {
            violations.push(Violation::AsteroidBlocksCorridor);
        }
        if distance(field.center, friendly) < config.friendly_asteroid_min {
            violations.push(Violation::AsteroidNearFriendly);
        }
    }
    for node in &manifest.resource_nodes {
        if distance(node.position, enemy) < config.enemy_resource_min {
            violations.push(Violation::ResourceNearEnemy);
        }
    }
    if !manifest.npc_groups.iter().any(|g| g.faction == Faction::Friendly) {
        violations.push(Violation::MissingFriendlyNpc);
    }
    if !manifest.npc_groups.iter().any(|g| g.faction == Faction::Hostile) {
        violations.push(Violation::MissingHostileNpc);
    }
    violations
}

// ---------------------------------------------------------------------------
// Invariants over many seeds
// ---------------------------------------------------------------------------

#[test]
fn friendly_outpost_always_within_band() {
    for seed in 0..1000 {
        let manifest = generate("band-sweep", seed, 1, None);
        let friendly = manifest.friendly_outpost().unwrap();
        let d = distance(manifest.spawn_point, friendly.position);
        assert!((800.0..=2500.0).contains(&d), "seed {seed}: distance {d}");
    }
}

#[test]
fn committed_valid_attempt_satisfies_every_invariant() {
    let config = GeneratorConfig::default();
    let mut valid_count = 0;
    for seed in 0..300 {
        let manifest = generate("invariants", seed, (seed % 6) as i64, None);
        let recomputed = recompute_violations(&manifest, &config);
        if manifest.is_fallback() {
            assert_eq!(recomputed, manifest.committed_violations(), "seed {seed}");
        } else {
            assert!(recomputed.is_empty(), "seed {seed}: {recomputed:?}");
            valid_count += 1;
        }
    }
    assert!(valid_count > 250, "only {valid_count} valid sectors");
}

#[test]
fn outposts_and_anchor_groups_always_present() {
    for seed in 0..300 {
        let manifest = generate("anchors", seed, 2, None);
        assert_eq!(manifest.friendly_outposts.len(), 1);
        assert_eq!(manifest.enemy_outposts.len(), 1);
        assert_eq!(manifest.asteroid_fields.len(), 1);
        assert!(manifest.hazards.len() <= 3);
        assert_eq!(manifest.npc_groups[0].faction, Faction::Friendly);
        assert_eq!(manifest.npc_groups[0].behavior, Behavior::Escort);
        assert_eq!(manifest.npc_groups[1].faction, Faction::Hostile);
        assert_eq!(manifest.npc_groups[1].behavior, Behavior::Patrol);
    }
}

#[test]
fn attempt_count_never_exceeds_cap() {
    for max_attempts in [1, 2, 5] {
        let config = GeneratorConfig {
            max_attempts,
            ..GeneratorConfig::default()
        };
        let generator = SectorGenerator::new(config).unwrap();
        for seed in 0..50 {
            let manifest = generator.generate(&SectorRequest::new("cap", seed));
            let count = manifest.validation.attempt_count();
            assert!(count >= 1 && count <= max_attempts as usize);
            let keys: Vec<u32> = manifest.validation.attempts.keys().copied().collect();
            assert_eq!(keys, (0..count as u32).collect::<Vec<_>>());
            // Only the last recorded attempt may be valid.
            for (index, result) in &manifest.validation.attempts {
                if *index + 1 < count as u32 {
                    assert!(!result.valid);
                }
            }
        }
    }
}

#[test]
fn background_stays_on_its_shell() {
    for seed in 0..100 {
        let manifest = generate("backdrop", seed, 1, None);
        let count = manifest.background_elements.len();
        assert!((3..=9).contains(&count), "seed {seed}: {count} elements");
        for element in &manifest.background_elements {
            let r = distance(manifest.spawn_point, element.position);
            assert!(r >= 12_000.0 - 1e-6 && r <= 20_000.0 + 1e-6);
        }
    }
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

#[test]
fn impossible_config_yields_flagged_fallback() {
    // The enemy band sits entirely inside the spawn safe zone.
    let config = GeneratorConfig {
        spawn_safe_radius: 9_000.0,
        enemy_distance: Band::new(3_000.0, 4_000.0),
        max_attempts: 4,
        ..GeneratorConfig::default()
    };
    let generator = SectorGenerator::new(config.clone()).unwrap();
    let manifest = generator.generate(&SectorRequest::new("doomed", 3).with_difficulty(2));

    assert!(manifest.is_fallback());
    assert_eq!(manifest.validation.fallback, Some(FallbackReason::MaxAttemptsReached));
    assert_eq!(manifest.validation.attempt_count(), 4);
    assert_eq!(manifest.committed_attempt(), Some(3));
    assert!(manifest
        .committed_violations()
        .contains(&Violation::EnemyOutpostInSpawnZone));
    assert_eq!(
        recompute_violations(&manifest, &config),
        manifest.committed_violations()
    );

    let json = manifest.to_json().unwrap();
    assert!(json.contains("\"fallback\": \"max_attempts_reached\""));
}

#[test]
fn valid_manifest_omits_fallback_field() {
    let manifest = (0..50)
        .map(|seed| generate("clean", seed, 1, None))
        .find(|m| !m.is_fallback())
        .expect("some seed validates");
    let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
    assert!(value["validation"].get("fallback").is_none());
    assert!(manifest.committed_violations().is_empty());
}
