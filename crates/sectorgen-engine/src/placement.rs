//! Per-category placement routines.
//!
//! The [`PlacementEngine`] produces one [`CandidateLayout`] per outer attempt.
//! Each category draws from its own [`SectorRng`] stream, derived from the
//! category sub-seed and the attempt index (see [`AttemptStreams`]).
//!
//! # Placement Order
//!
//! Later placers avoid geometry produced by earlier ones, so the order is
//! fixed:
//!
//! 1. friendly outpost
//! 2. enemy outpost (avoids spawn and the friendly outpost)
//! 3. asteroid field (avoids the friendly outpost, the corridor, the enemy)
//! 4. hazards (avoid spawn, the corridor, the enemy)
//! 5. resource node (anchored to the field, else a hazard, else open space)
//! 6. NPC groups (avoid spawn, hazards; friendlies avoid the enemy)
//! 7. background dressing (no avoidance)
//!
//! # Local Retries
//!
//! Placers reject candidates with cheap local checks and resample up to a
//! small budget. These checks only bias the layout; the sector-wide verdict
//! belongs to [`ConstraintValidator`](crate::validator::ConstraintValidator).
//! When the budget runs out, the enemy outpost keeps its last candidate, the
//! asteroid field falls back to a wider unconstrained ring, and hazards,
//! resource nodes and extra NPC groups are skipped.

use std::f64::consts::TAU;

use sectorgen_core::geometry::{
    add, distance, sample_ring, sample_sphere_shell, segment_distance, Vec3,
};
use sectorgen_core::rng::SectorRng;
use sectorgen_core::seed::SubSeeds;
use sectorgen_core::theme::ThemeProfile;
use sectorgen_manifest::manifest::{
    AsteroidFieldSpec, Behavior, Faction, FieldType, HazardSpec, HazardType, ManifestObject,
    NpcGroup, ObjectDetails, ResourceNodeSpec, ResourceSource, ResourceType,
};
use tracing::trace;

use crate::config::{Band, GeneratorConfig};

// ---------------------------------------------------------------------------
// Placement constants
// ---------------------------------------------------------------------------

/// Safe radius advertised by the friendly outpost.
const FRIENDLY_SAFE_RADIUS: f64 = 650.0;
/// Extra margin beyond the spawn safe radius the enemy outpost keeps.
const ENEMY_SPAWN_MARGIN: f64 = 500.0;
/// Asteroid field center ring: inner radius and distance kept from the rim.
const ASTEROID_RING_INNER: f64 = 2_500.0;
const ASTEROID_RING_RIM_MARGIN: f64 = 1_500.0;
/// Asteroid fallback ring used once the local budget is spent.
const ASTEROID_FALLBACK_INNER: f64 = 3_000.0;
const ASTEROID_FALLBACK_RIM_MARGIN: f64 = 2_000.0;
/// Hazard ring.
const HAZARD_RING_INNER: f64 = 5_000.0;
const HAZARD_RING_RIM_MARGIN: f64 = 500.0;
const HAZARD_ENEMY_CLEARANCE: f64 = 900.0;
const HAZARD_SEVERITY: Band = Band::new(0.3, 0.9);
const MAX_HAZARDS: i64 = 3;
/// Resource nodes sit within this fraction of the field radius.
const RESOURCE_FIELD_SPREAD: f64 = 0.8;
/// Resource annulus around a hazard, as fractions of its radius.
const RESOURCE_HAZARD_ANNULUS: (f64, f64) = (0.8, 1.2);
const RESOURCE_OPEN_INNER: f64 = 2_000.0;
const RESOURCE_OPEN_RIM_MARGIN: f64 = 2_000.0;
const RESOURCE_NODE_COUNT: usize = 1;
/// Orbit bands of the two guaranteed anchor groups.
const ESCORT_ORBIT: Band = Band::new(250.0, 600.0);
const PATROL_ORBIT: Band = Band::new(250.0, 650.0);
/// Extra NPC group shell.
const NPC_SHELL_INNER: f64 = 1_500.0;
const NPC_SHELL_RIM_MARGIN: f64 = 1_200.0;
const NPC_ENEMY_CLEARANCE: f64 = 1_200.0;
/// NPC groups must stay outside this fraction of every hazard radius.
const NPC_HAZARD_FRACTION: f64 = 0.8;
const PATROL_WAYPOINTS: usize = 3;
const PATROL_OFFSET: Band = Band::new(200.0, 450.0);
/// Background dressing.
const MAJOR_SCALE: Band = Band::new(9_000.0, 15_000.0);
const MINOR_SCALE: Band = Band::new(2_500.0, 7_000.0);

// ---------------------------------------------------------------------------
// AttemptStreams
// ---------------------------------------------------------------------------

/// The per-category random streams of one outer attempt.
#[derive(Debug, Clone)]
pub struct AttemptStreams {
    pub outposts: SectorRng,
    pub npcs: SectorRng,
    pub asteroids: SectorRng,
    pub hazards: SectorRng,
    pub resources: SectorRng,
    pub background: SectorRng,
}

impl AttemptStreams {
    /// Derive fresh streams for `attempt`. Attempt `n + 1` never continues
    /// attempt `n`'s sequences.
    pub fn derive(sub_seeds: &SubSeeds, attempt: u32) -> Self {
        Self {
            outposts: SectorRng::for_attempt(sub_seeds.outposts, attempt),
            npcs: SectorRng::for_attempt(sub_seeds.npcs, attempt),
            asteroids: SectorRng::for_attempt(sub_seeds.asteroids, attempt),
            hazards: SectorRng::for_attempt(sub_seeds.hazards, attempt),
            resources: SectorRng::for_attempt(sub_seeds.resources, attempt),
            background: SectorRng::for_attempt(sub_seeds.background, attempt),
        }
    }
}

// ---------------------------------------------------------------------------
// CandidateLayout
// ---------------------------------------------------------------------------

/// Everything one attempt placed. Owned by the builder until it is either
/// committed into the manifest or discarded whole.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLayout {
    pub friendly_outpost: ManifestObject,
    pub enemy_outpost: ManifestObject,
    pub asteroid_fields: Vec<AsteroidFieldSpec>,
    pub hazards: Vec<HazardSpec>,
    pub resource_nodes: Vec<ResourceNodeSpec>,
    pub npc_groups: Vec<NpcGroup>,
    pub background_elements: Vec<ManifestObject>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Uniform pick from a constant table.
fn pick<T: Copy>(rng: &mut SectorRng, table: &[T], default: T) -> T {
    rng.choose(table).copied().unwrap_or(default)
}

fn uniform_in(rng: &mut SectorRng, band: Band) -> f64 {
    rng.uniform(band.min, band.max)
}

/// Yaw-only rotation with a uniform heading.
fn random_yaw(rng: &mut SectorRng) -> Vec3 {
    [0.0, rng.uniform(0.0, 360.0), 0.0]
}

// ---------------------------------------------------------------------------
// PlacementEngine
// ---------------------------------------------------------------------------

/// Runs the placement routines of one sector against a configuration.
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine<'a> {
    config: &'a GeneratorConfig,
    spawn: Vec3,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(config: &'a GeneratorConfig, spawn: Vec3) -> Self {
        Self { config, spawn }
    }

    /// Run every placer in order and collect the candidate layout.
    pub fn place_attempt(
        &self,
        streams: &mut AttemptStreams,
        theme: &ThemeProfile,
        difficulty: i64,
    ) -> CandidateLayout {
        let friendly_outpost = self.place_friendly_outpost(&mut streams.outposts);
        let enemy_outpost =
            self.place_enemy_outpost(&mut streams.outposts, friendly_outpost.position);
        let friendly = friendly_outpost.position;
        let enemy = enemy_outpost.position;

        let asteroid_fields = self.place_asteroid_fields(&mut streams.asteroids, friendly, enemy);
        let hazards = self.place_hazards(&mut streams.hazards, friendly, enemy, difficulty);
        let resource_nodes =
            self.place_resource_nodes(&mut streams.resources, &asteroid_fields, &hazards, enemy);
        let npc_groups =
            self.place_npc_groups(&mut streams.npcs, friendly, enemy, &hazards, difficulty);
        let background_elements = self.place_background(&mut streams.background, theme);

        CandidateLayout {
            friendly_outpost,
            enemy_outpost,
            asteroid_fields,
            hazards,
            resource_nodes,
            npc_groups,
            background_elements,
        }
    }

    // -- outposts -----------------------------------------------------------

    /// The friendly outpost, on the friendly distance ring around spawn.
    pub fn place_friendly_outpost(&self, rng: &mut SectorRng) -> ManifestObject {
        let band = self.config.friendly_distance;
        let position = add(self.spawn, sample_ring(rng, band.min, band.max));
        ManifestObject {
            kind: "friendly_outpost".to_owned(),
            position,
            rotation: random_yaw(rng),
            scale: [1.0, 1.0, 1.0],
            details: ObjectDetails::FriendlyOutpost {
                safe_radius: FRIENDLY_SAFE_RADIUS,
                line_of_sight: true,
            },
        }
    }

    /// The enemy outpost, on the enemy distance ring. Candidates too close
    /// to the friendly outpost or to spawn are resampled; once the budget is
    /// spent the last candidate is kept.
    pub fn place_enemy_outpost(&self, rng: &mut SectorRng, friendly: Vec3) -> ManifestObject {
        let band = self.config.enemy_distance;
        let spawn_keepout = self.config.spawn_safe_radius + ENEMY_SPAWN_MARGIN;
        let acceptable = |p: Vec3| {
            distance(p, friendly) >= band.min && distance(p, self.spawn) >= spawn_keepout
        };

        let mut position = add(self.spawn, sample_ring(rng, band.min, band.max));
        let mut accepted = acceptable(position);
        for _ in 1..self.config.local_retries() {
            if accepted {
                break;
            }
            position = add(self.spawn, sample_ring(rng, band.min, band.max));
            accepted = acceptable(position);
        }
        if !accepted {
            trace!("enemy outpost retry budget spent, keeping last candidate");
        }

        let rotation = random_yaw(rng);
        let defense_level = rng.int_inclusive(1, 3) as u8;
        ManifestObject {
            kind: "enemy_outpost".to_owned(),
            position,
            rotation,
            scale: [1.0, 1.0, 1.0],
            details: ObjectDetails::EnemyOutpost { defense_level },
        }
    }

    // -- asteroid field -----------------------------------------------------

    /// Exactly one asteroid field, kept off the friendly outpost, the
    /// spawn -> friendly corridor and the enemy outpost.
    pub fn place_asteroid_fields(
        &self,
        rng: &mut SectorRng,
        friendly: Vec3,
        enemy: Vec3,
    ) -> Vec<AsteroidFieldSpec> {
        let config = self.config;
        let field_type = pick(rng, &FieldType::ALL, FieldType::Cluster);
        let radius = uniform_in(rng, config.asteroid_radius);
        let density = uniform_in(rng, config.asteroid_density);
        let anchors = rng.int_inclusive(2, 5) as u32;

        let outer = config.sector_radius - ASTEROID_RING_RIM_MARGIN;
        let mut center = None;
        for _ in 0..config.asteroid_retries() {
            let candidate = add(self.spawn, sample_ring(rng, ASTEROID_RING_INNER, outer));
            if distance(candidate, friendly) < config.friendly_asteroid_min
                || segment_distance(candidate, self.spawn, friendly) < config.corridor_clearance
                || distance(candidate, enemy) < config.corridor_clearance
            {
                continue;
            }
            center = Some(candidate);
            break;
        }
        let center = center.unwrap_or_else(|| {
            trace!("asteroid retry budget spent, using fallback ring");
            add(
                self.spawn,
                sample_ring(
                    rng,
                    ASTEROID_FALLBACK_INNER,
                    config.sector_radius - ASTEROID_FALLBACK_RIM_MARGIN,
                ),
            )
        });

        vec![AsteroidFieldSpec {
            field_type,
            center,
            radius,
            density,
            anchors,
        }]
    }

    // -- hazards ------------------------------------------------------------

    /// One to three hazards. The third slot opens with a probability that
    /// grows with difficulty. A hazard whose retry budget runs out is
    /// skipped.
    pub fn place_hazards(
        &self,
        rng: &mut SectorRng,
        friendly: Vec3,
        enemy: Vec3,
        difficulty: i64,
    ) -> Vec<HazardSpec> {
        let config = self.config;
        let extra_chance = (0.2 + 0.15 * difficulty.max(1) as f64).min(0.6);
        let extra = i64::from(rng.chance(extra_chance));
        let count = (1 + rng.int_inclusive(0, 1) + extra).clamp(1, MAX_HAZARDS);

        let outer = config.sector_radius - HAZARD_RING_RIM_MARGIN;
        let mut hazards = Vec::with_capacity(count as usize);
        for slot in 0..count {
            let mut placed = false;
            for _ in 0..config.local_retries() {
                let position = add(self.spawn, sample_ring(rng, HAZARD_RING_INNER, outer));
                if distance(position, self.spawn) < config.spawn_hazard_distance
                    || segment_distance(position, self.spawn, friendly) < config.corridor_clearance
                    || distance(position, enemy) < HAZARD_ENEMY_CLEARANCE
                {
                    continue;
                }
                hazards.push(HazardSpec {
                    hazard_type: pick(rng, &HazardType::ALL, HazardType::Radiation),
                    position,
                    radius: uniform_in(rng, config.hazard_radius),
                    severity: uniform_in(rng, HAZARD_SEVERITY),
                });
                placed = true;
                break;
            }
            if !placed {
                trace!(slot, "hazard retry budget spent, slot skipped");
            }
        }
        hazards
    }

    // -- resource nodes -----------------------------------------------------

    /// One resource node, anchored inside an asteroid field when there is
    /// one, otherwise around a hazard, otherwise in open space. Candidates
    /// near the enemy outpost are resampled.
    pub fn place_resource_nodes(
        &self,
        rng: &mut SectorRng,
        asteroid_fields: &[AsteroidFieldSpec],
        hazards: &[HazardSpec],
        enemy: Vec3,
    ) -> Vec<ResourceNodeSpec> {
        let config = self.config;
        let mut nodes = Vec::with_capacity(RESOURCE_NODE_COUNT);
        for _ in 0..RESOURCE_NODE_COUNT {
            for _ in 0..config.local_retries() {
                let (position, source) = if let Some(field) = rng.choose(asteroid_fields) {
                    let angle = rng.uniform(0.0, TAU);
                    let radius = rng.uniform(0.0, field.radius * RESOURCE_FIELD_SPREAD);
                    let offset = [angle.cos() * radius, 0.0, angle.sin() * radius];
                    (add(field.center, offset), ResourceSource::AsteroidField)
                } else if let Some(hazard) = rng.choose(hazards) {
                    let (inner, outer) = RESOURCE_HAZARD_ANNULUS;
                    let offset = sample_ring(rng, hazard.radius * inner, hazard.radius * outer);
                    (add(hazard.position, offset), ResourceSource::Hazard)
                } else {
                    let offset = sample_ring(
                        rng,
                        RESOURCE_OPEN_INNER,
                        config.sector_radius - RESOURCE_OPEN_RIM_MARGIN,
                    );
                    (add(self.spawn, offset), ResourceSource::OpenSpace)
                };
                if distance(position, enemy) < config.enemy_resource_min {
                    continue;
                }
                nodes.push(ResourceNodeSpec {
                    position,
                    resource_type: pick(rng, &ResourceType::ALL, ResourceType::Water),
                    amount: uniform_in(rng, config.resource_amount),
                    source,
                });
                break;
            }
        }
        if nodes.len() < RESOURCE_NODE_COUNT {
            trace!("resource node retry budget spent, node skipped");
        }
        nodes
    }

    // -- NPC groups ---------------------------------------------------------

    /// The two guaranteed anchor groups (a friendly escort at the friendly
    /// outpost, a hostile patrol at the enemy outpost) followed by
    /// `npc_base_count + npc_per_difficulty * max(0, difficulty)` groups of
    /// random faction and behavior on the NPC shell.
    pub fn place_npc_groups(
        &self,
        rng: &mut SectorRng,
        friendly: Vec3,
        enemy: Vec3,
        hazards: &[HazardSpec],
        difficulty: i64,
    ) -> Vec<NpcGroup> {
        let config = self.config;
        let extra = u64::from(config.npc_per_difficulty)
            .saturating_mul(difficulty.max(0) as u64)
            .saturating_add(u64::from(config.npc_base_count));

        let mut groups = Vec::with_capacity(2 + extra.min(1024) as usize);
        groups.push(npc_group_near(
            rng,
            Faction::Friendly,
            Behavior::Escort,
            friendly,
            ESCORT_ORBIT,
        ));
        groups.push(npc_group_near(
            rng,
            Faction::Hostile,
            Behavior::Patrol,
            enemy,
            PATROL_ORBIT,
        ));

        let outer = config.sector_radius - NPC_SHELL_RIM_MARGIN;
        for _ in 0..extra {
            let faction = pick(rng, &Faction::ALL, Faction::Neutral);
            let behavior = pick(rng, &Behavior::ALL, Behavior::Roam);
            for _ in 0..config.local_retries() {
                let position = add(self.spawn, sample_sphere_shell(rng, NPC_SHELL_INNER, outer));
                if distance(position, self.spawn) < config.spawn_safe_radius {
                    continue;
                }
                if faction == Faction::Friendly && distance(position, enemy) < NPC_ENEMY_CLEARANCE
                {
                    continue;
                }
                if hazards
                    .iter()
                    .any(|h| distance(position, h.position) < h.radius * NPC_HAZARD_FRACTION)
                {
                    continue;
                }
                groups.push(NpcGroup {
                    faction,
                    behavior,
                    position,
                    patrol_route: patrol_route(rng, position),
                });
                break;
            }
        }
        groups
    }

    // -- background ---------------------------------------------------------

    /// One to three major elements from the theme's primary kinds and two to
    /// six minor elements from its secondary kinds, all on the background
    /// shell.
    pub fn place_background(
        &self,
        rng: &mut SectorRng,
        theme: &ThemeProfile,
    ) -> Vec<ManifestObject> {
        let major_count = rng.int_inclusive(1, 3);
        let minor_count = rng.int_inclusive(2, 6);
        let mut elements = Vec::with_capacity((major_count + minor_count) as usize);

        for _ in 0..major_count {
            if let Some(kind) = rng.choose(theme.primary_elements) {
                elements.push(self.background_element(rng, kind, theme, MAJOR_SCALE));
            }
        }
        for _ in 0..minor_count {
            if let Some(kind) = rng.choose(theme.secondary_elements) {
                elements.push(self.background_element(rng, kind, theme, MINOR_SCALE));
            }
        }
        elements
    }

    fn background_element(
        &self,
        rng: &mut SectorRng,
        kind: &str,
        theme: &ThemeProfile,
        scale: Band,
    ) -> ManifestObject {
        let shell = self.config.background_radius;
        let position = add(self.spawn, sample_sphere_shell(rng, shell.min, shell.max));
        let size = uniform_in(rng, scale);
        let rotation = [
            rng.uniform(0.0, 360.0),
            rng.uniform(0.0, 360.0),
            rng.uniform(0.0, 360.0),
        ];
        ManifestObject {
            kind: kind.to_owned(),
            position,
            rotation,
            scale: [size, size, size],
            details: ObjectDetails::Background {
                palette: theme.palette.map(str::to_owned),
                parallax: true,
            },
        }
    }
}

/// A group orbiting `anchor` on its plane at a radius drawn from `orbit`.
///
/// Draw order: angle, then radius.
fn npc_group_near(
    rng: &mut SectorRng,
    faction: Faction,
    behavior: Behavior,
    anchor: Vec3,
    orbit: Band,
) -> NpcGroup {
    let angle = rng.uniform(0.0, TAU);
    let radius = uniform_in(rng, orbit);
    let position = [
        anchor[0] + angle.cos() * radius,
        anchor[1],
        anchor[2] + angle.sin() * radius,
    ];
    NpcGroup {
        faction,
        behavior,
        position,
        patrol_route: patrol_route(rng, position),
    }
}

fn patrol_route(rng: &mut SectorRng, origin: Vec3) -> Vec<Vec3> {
    (0..PATROL_WAYPOINTS)
        .map(|_| add(origin, sample_sphere_shell(rng, PATROL_OFFSET.min, PATROL_OFFSET.max)))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use sectorgen_core::geometry::ORIGIN;
    use sectorgen_core::theme::{self, THEMES};

    use super::*;

    fn engine(config: &GeneratorConfig) -> PlacementEngine<'_> {
        PlacementEngine::new(config, ORIGIN)
    }

    #[test]
    fn friendly_outpost_on_friendly_ring() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        for seed in 0..200 {
            let mut rng = SectorRng::from_seed(seed);
            let outpost = engine.place_friendly_outpost(&mut rng);
            let d = distance(outpost.position, ORIGIN);
            assert!(config.friendly_distance.contains(d), "distance {d}");
            assert_eq!(outpost.position[1], 0.0);
            assert_eq!(outpost.rotation[0], 0.0);
            assert!((0.0..360.0).contains(&outpost.rotation[1]));
            assert_eq!(
                outpost.details,
                ObjectDetails::FriendlyOutpost {
                    safe_radius: 650.0,
                    line_of_sight: true
                }
            );
        }
    }

    #[test]
    fn enemy_outpost_keeps_its_distance() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        for seed in 0..200 {
            let mut rng = SectorRng::from_seed(seed);
            let friendly = engine.place_friendly_outpost(&mut rng).position;
            let enemy = engine.place_enemy_outpost(&mut rng, friendly);
            assert!(distance(enemy.position, ORIGIN) >= config.spawn_safe_radius + 500.0);
            let ObjectDetails::EnemyOutpost { defense_level } = enemy.details else {
                panic!("enemy outpost carries enemy details");
            };
            assert!((1..=3).contains(&defense_level));
        }
    }

    #[test]
    fn exactly_one_asteroid_field_within_ranges() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        let mut rng = SectorRng::from_seed(17);
        let fields =
            engine.place_asteroid_fields(&mut rng, [1500.0, 0.0, 0.0], [-5000.0, 0.0, 0.0]);
        assert_eq!(fields.len(), 1);
        let field = &fields[0];
        assert!(config.asteroid_radius.contains(field.radius));
        assert!(config.asteroid_density.contains(field.density));
        assert!((2..=5).contains(&field.anchors));
        assert_eq!(field.center[1], 0.0);
    }

    #[test]
    fn hazard_count_and_clearances() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        let friendly = [2000.0, 0.0, 0.0];
        let enemy = [0.0, 0.0, -6000.0];
        for seed in 0..100 {
            let mut rng = SectorRng::from_seed(seed);
            let hazards = engine.place_hazards(&mut rng, friendly, enemy, 3);
            assert!(hazards.len() <= 3);
            for hazard in &hazards {
                assert!(distance(hazard.position, ORIGIN) >= config.spawn_hazard_distance);
                assert!(
                    segment_distance(hazard.position, ORIGIN, friendly) >= config.corridor_clearance
                );
                assert!(distance(hazard.position, enemy) >= 900.0);
                assert!(config.hazard_radius.contains(hazard.radius));
                assert!((0.3..=0.9).contains(&hazard.severity));
            }
        }
    }

    #[test]
    fn resource_node_prefers_asteroid_field() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        let field = AsteroidFieldSpec {
            field_type: FieldType::Cluster,
            center: [4000.0, 0.0, 4000.0],
            radius: 2000.0,
            density: 0.5,
            anchors: 3,
        };
        let mut rng = SectorRng::from_seed(5);
        let nodes =
            engine.place_resource_nodes(&mut rng, &[field.clone()], &[], [-6000.0, 0.0, 0.0]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].source, ResourceSource::AsteroidField);
        assert!(distance(nodes[0].position, field.center) <= field.radius * 0.8 + 1e-6);
        assert!(config.resource_amount.contains(nodes[0].amount));
    }

    #[test]
    fn resource_node_falls_back_to_hazard_then_open_space() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        let hazard = HazardSpec {
            hazard_type: HazardType::Minefield,
            position: [6000.0, 0.0, 0.0],
            radius: 1000.0,
            severity: 0.5,
        };
        let mut rng = SectorRng::from_seed(9);
        let nodes =
            engine.place_resource_nodes(&mut rng, &[], &[hazard.clone()], [-6000.0, 0.0, 0.0]);
        assert_eq!(nodes[0].source, ResourceSource::Hazard);
        let d = distance(nodes[0].position, hazard.position);
        assert!((800.0 - 1e-6..=1200.0 + 1e-6).contains(&d), "distance {d}");

        let nodes = engine.place_resource_nodes(&mut rng, &[], &[], [-6000.0, 0.0, 0.0]);
        assert_eq!(nodes[0].source, ResourceSource::OpenSpace);
    }

    #[test]
    fn npc_groups_start_with_anchor_pair() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        let friendly = [1500.0, 0.0, 0.0];
        let enemy = [-6000.0, 0.0, 0.0];
        let mut rng = SectorRng::from_seed(23);
        let groups = engine.place_npc_groups(&mut rng, friendly, enemy, &[], 2);

        assert_eq!(groups.len(), 2 + 6 + 3 * 2);
        assert_eq!(groups[0].faction, Faction::Friendly);
        assert_eq!(groups[0].behavior, Behavior::Escort);
        let escort = distance(groups[0].position, friendly);
        assert!((250.0..=600.0).contains(&escort));
        assert_eq!(groups[1].faction, Faction::Hostile);
        assert_eq!(groups[1].behavior, Behavior::Patrol);
        let patrol = distance(groups[1].position, enemy);
        assert!((250.0..=650.0).contains(&patrol));

        for group in &groups {
            assert_eq!(group.patrol_route.len(), 3);
            for waypoint in &group.patrol_route {
                let offset = distance(*waypoint, group.position);
                assert!((200.0 - 1e-6..=450.0 + 1e-6).contains(&offset));
            }
        }
        for group in &groups[2..] {
            assert!(distance(group.position, ORIGIN) >= config.spawn_safe_radius);
            if group.faction == Faction::Friendly {
                assert!(distance(group.position, enemy) >= 1200.0);
            }
        }
    }

    #[test]
    fn negative_difficulty_adds_no_extra_groups() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        let mut rng = SectorRng::from_seed(1);
        let groups =
            engine.place_npc_groups(&mut rng, [1500.0, 0.0, 0.0], [-6000.0, 0.0, 0.0], &[], -4);
        assert_eq!(groups.len(), 2 + config.npc_base_count as usize);
    }

    #[test]
    fn background_uses_theme_kinds() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        let theme = theme::find("pulsar_shroud").unwrap();
        for seed in 0..50 {
            let mut rng = SectorRng::from_seed(seed);
            let elements = engine.place_background(&mut rng, theme);
            assert!((3..=9).contains(&elements.len()));

            let majors = elements
                .iter()
                .take_while(|e| e.scale[0] >= MAJOR_SCALE.min)
                .count();
            assert!(majors >= 1);
            for element in &elements {
                let known = theme.primary_elements.contains(&element.kind.as_str())
                    || theme.secondary_elements.contains(&element.kind.as_str());
                assert!(known, "unexpected kind {}", element.kind);
                let r = distance(element.position, ORIGIN);
                assert!(r >= 12_000.0 - 1e-6 && r <= 20_000.0 + 1e-6);
                assert!(matches!(
                    element.details,
                    ObjectDetails::Background { parallax: true, .. }
                ));
            }
        }
    }

    #[test]
    fn same_streams_same_layout() {
        let config = GeneratorConfig::default();
        let engine = engine(&config);
        let subs = SubSeeds::derive(1234);
        let a = engine.place_attempt(&mut AttemptStreams::derive(&subs, 0), &THEMES[0], 1);
        let b = engine.place_attempt(&mut AttemptStreams::derive(&subs, 0), &THEMES[0], 1);
        let c = engine.place_attempt(&mut AttemptStreams::derive(&subs, 1), &THEMES[0], 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
