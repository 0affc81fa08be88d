//! Attempt/retry orchestration and manifest assembly.
//!
//! [`SectorManifestBuilder`] drives one generation call through a small state
//! machine:
//!
//! ```text
//! Attempting(0) -> Attempting(1) -> ... -> Attempting(max - 1)
//!       |               |                        |        \
//!       v               v                        v         v
//!   Committed(0)    Committed(1)            Committed(n)  FallbackCommitted(max - 1)
//! ```
//!
//! Each attempt derives fresh category streams, places a full candidate
//! layout and validates it. The first valid attempt is committed. If the last
//! attempt is still invalid its layout is committed anyway and the validation
//! record is flagged with [`FallbackReason::MaxAttemptsReached`]. Rejected
//! layouts are dropped whole. Generation never fails and never evaluates more
//! than `max_attempts` attempts.
//!
//! # Example
//!
//! ```
//! use sectorgen_engine::prelude::*;
//!
//! let manifest = generate("alpha-01", 42, 1, None);
//! assert_eq!(manifest.friendly_outposts.len(), 1);
//! assert!(manifest.validation.attempt_count() <= 8);
//!
//! let again = generate("alpha-01", 42, 1, None);
//! assert_eq!(manifest.content_hash().unwrap(), again.content_hash().unwrap());
//! ```

use std::time::Instant;

use sectorgen_core::geometry::{Vec3, ORIGIN};
use sectorgen_core::rng::SectorRng;
use sectorgen_core::seed::{derive_base, SeedValue, SubSeeds};
use sectorgen_core::theme::{self, ThemeProfile};
use sectorgen_manifest::manifest::{SectorManifest, SectorMetadata};
use sectorgen_manifest::validation::{FallbackReason, ValidationRecord};
use tracing::{debug, info, info_span, warn};

use crate::config::GeneratorConfig;
use crate::placement::{AttemptStreams, CandidateLayout, PlacementEngine};
use crate::validator::ConstraintValidator;
use crate::ConfigError;

// ---------------------------------------------------------------------------
// SectorRequest
// ---------------------------------------------------------------------------

/// Inputs of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorRequest {
    pub sector_id: String,
    pub seed: SeedValue,
    /// Expected to be non-negative; negative values add no extra NPC groups.
    pub difficulty: i64,
    /// Theme id to use. Unknown ids are ignored.
    pub theme_hint: Option<String>,
}

impl SectorRequest {
    /// A request at difficulty 1 without a theme hint.
    pub fn new(sector_id: impl Into<String>, seed: impl Into<SeedValue>) -> Self {
        Self {
            sector_id: sector_id.into(),
            seed: seed.into(),
            difficulty: 1,
            theme_hint: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: i64) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_theme_hint(mut self, theme_hint: impl Into<String>) -> Self {
        self.theme_hint = Some(theme_hint.into());
        self
    }
}

// ---------------------------------------------------------------------------
// BuildState
// ---------------------------------------------------------------------------

/// Position of a generation call in the attempt state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Placing and validating attempt `n`.
    Attempting(u32),
    /// Attempt `n` validated and was committed.
    Committed(u32),
    /// Every attempt failed; attempt `n` (the last) was committed.
    FallbackCommitted(u32),
}

impl BuildState {
    /// The state that follows evaluating `attempt` with verdict `valid`.
    pub fn after_attempt(attempt: u32, valid: bool, max_attempts: u32) -> Self {
        if valid {
            BuildState::Committed(attempt)
        } else if attempt + 1 >= max_attempts {
            BuildState::FallbackCommitted(attempt)
        } else {
            BuildState::Attempting(attempt + 1)
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BuildState::Attempting(_))
    }
}

// ---------------------------------------------------------------------------
// SectorManifestBuilder
// ---------------------------------------------------------------------------

/// Runs the attempt loop of one generation call and assembles the manifest.
pub struct SectorManifestBuilder<'a> {
    config: &'a GeneratorConfig,
    request: &'a SectorRequest,
    base_seed: u64,
    sub_seeds: SubSeeds,
    theme: &'static ThemeProfile,
    spawn: Vec3,
    started: Instant,
}

impl<'a> SectorManifestBuilder<'a> {
    /// Derive the seeds and select the theme for `request`.
    ///
    /// The theme is drawn from the attempt-0 stream of the background
    /// sub-seed, independently of the background placer's own stream.
    pub fn new(config: &'a GeneratorConfig, request: &'a SectorRequest) -> Self {
        let started = Instant::now();
        let hint = request.theme_hint.as_deref();
        let base_seed = derive_base(&request.sector_id, &request.seed, request.difficulty, hint);
        let sub_seeds = SubSeeds::derive(base_seed);
        let mut theme_rng = SectorRng::for_attempt(sub_seeds.background, 0);
        let theme = theme::select(&mut theme_rng, hint);

        Self {
            config,
            request,
            base_seed,
            sub_seeds,
            theme,
            spawn: ORIGIN,
            started,
        }
    }

    /// The derived base seed.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// The selected theme.
    pub fn theme(&self) -> &'static ThemeProfile {
        self.theme
    }

    /// Place and validate one attempt, recording the verdict.
    fn run_attempt(
        &self,
        attempt: u32,
        validation: &mut ValidationRecord,
    ) -> (CandidateLayout, BuildState) {
        let engine = PlacementEngine::new(self.config, self.spawn);
        let mut streams = AttemptStreams::derive(&self.sub_seeds, attempt);
        let layout = engine.place_attempt(&mut streams, self.theme, self.request.difficulty);

        let result = ConstraintValidator::new(self.config).validate(self.spawn, &layout);
        debug!(
            attempt,
            valid = result.valid,
            violations = result.violations.len(),
            "attempt evaluated"
        );
        let next = BuildState::after_attempt(attempt, result.valid, self.max_attempts());
        validation.record(attempt, result);
        (layout, next)
    }

    fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// Run attempts until one commits and return the finished manifest.
    pub fn build(self) -> SectorManifest {
        let span = info_span!(
            "generate_sector",
            sector_id = %self.request.sector_id,
            difficulty = self.request.difficulty
        );
        let _guard = span.enter();

        let mut validation = ValidationRecord::new();
        let mut attempt = 0;
        loop {
            let (layout, next) = self.run_attempt(attempt, &mut validation);
            match next {
                BuildState::Attempting(n) => attempt = n,
                BuildState::Committed(chosen) => {
                    return self.commit(layout, validation, chosen);
                }
                BuildState::FallbackCommitted(chosen) => {
                    validation.fallback = Some(FallbackReason::MaxAttemptsReached);
                    warn!(
                        attempts = validation.attempt_count(),
                        violations = ?validation.attempts.get(&chosen).map(|r| &r.violations),
                        "no valid layout found, committing last attempt"
                    );
                    return self.commit(layout, validation, chosen);
                }
            }
        }
    }

    fn commit(
        &self,
        layout: CandidateLayout,
        validation: ValidationRecord,
        chosen: u32,
    ) -> SectorManifest {
        let generation_time_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        info!(
            attempt = chosen,
            theme = self.theme.id,
            fallback = validation.is_fallback(),
            elapsed_ms = generation_time_ms,
            "sector committed"
        );

        let CandidateLayout {
            friendly_outpost,
            enemy_outpost,
            asteroid_fields,
            hazards,
            resource_nodes,
            npc_groups,
            background_elements,
        } = layout;

        SectorManifest {
            metadata: SectorMetadata::new(
                &self.request.sector_id,
                self.base_seed,
                self.request.difficulty,
                self.theme,
                &self.sub_seeds,
            ),
            spawn_point: self.spawn,
            safe_zone_radius: self.config.spawn_safe_radius,
            friendly_outposts: vec![friendly_outpost],
            enemy_outposts: vec![enemy_outpost],
            npc_groups,
            asteroid_fields,
            hazards,
            resource_nodes,
            background_elements,
            validation,
            generation_time_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// SectorGenerator
// ---------------------------------------------------------------------------

/// A reusable generator holding a validated configuration.
///
/// Holds no mutable state, so one generator can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct SectorGenerator {
    config: GeneratorConfig,
}

impl SectorGenerator {
    /// Create a generator, validating `config` first.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the manifest for `request`. Always returns a manifest; check
    /// [`SectorManifest::is_fallback`] to see whether all constraints held.
    pub fn generate(&self, request: &SectorRequest) -> SectorManifest {
        SectorManifestBuilder::new(&self.config, request).build()
    }
}

/// Generate a sector with the default configuration.
pub fn generate(
    sector_id: &str,
    seed: impl Into<SeedValue>,
    difficulty: i64,
    theme_hint: Option<&str>,
) -> SectorManifest {
    let mut request = SectorRequest::new(sector_id, seed).with_difficulty(difficulty);
    request.theme_hint = theme_hint.map(str::to_owned);
    SectorGenerator::default().generate(&request)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
