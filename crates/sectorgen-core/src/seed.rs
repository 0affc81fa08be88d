//! Stable seed derivation for sector generation.
//!
//! Every random stream used by the generator is seeded from a value produced
//! here. Derivation is a pure function of its inputs: the string forms of all
//! parts are joined with `|` and hashed with BLAKE3, and the first eight
//! digest bytes (big-endian) become the derived `u64`.
//!
//! Three levels of derivation exist:
//!
//! 1. [`derive_base`] -- `(sector_id, seed, difficulty, theme_hint)` to the
//!    sector's base seed.
//! 2. [`derive_sub`] -- base seed plus a category name (`"outposts"`,
//!    `"npcs"`, ...) to an independent per-category stream seed. See
//!    [`SubSeeds`].
//! 3. [`derive_attempt`] -- category seed plus retry index, so attempt
//!    `n + 1` never continues attempt `n`'s random sequence.
//!
//! The values are stable for a given build on every platform. They are not
//! meant to match any other implementation.

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// SeedValue
// ---------------------------------------------------------------------------

/// A caller-supplied seed: either an integer or an arbitrary string.
///
/// Only the `Display` form participates in hashing, so `SeedValue::Int(42)`
/// and `SeedValue::Text("42")` derive the same base seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeedValue {
    /// An integer seed.
    Int(i128),
    /// A free-form string seed (e.g. a player-visible sector code).
    Text(String),
}

impl fmt::Display for SeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedValue::Int(value) => write!(f, "{value}"),
            SeedValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i32> for SeedValue {
    fn from(value: i32) -> Self {
        SeedValue::Int(i128::from(value))
    }
}

impl From<i64> for SeedValue {
    fn from(value: i64) -> Self {
        SeedValue::Int(i128::from(value))
    }
}

impl From<u32> for SeedValue {
    fn from(value: u32) -> Self {
        SeedValue::Int(i128::from(value))
    }
}

impl From<u64> for SeedValue {
    fn from(value: u64) -> Self {
        SeedValue::Int(i128::from(value))
    }
}

impl From<&str> for SeedValue {
    fn from(value: &str) -> Self {
        SeedValue::Text(value.to_owned())
    }
}

impl From<String> for SeedValue {
    fn from(value: String) -> Self {
        SeedValue::Text(value)
    }
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Hash the `|`-joined string forms of `parts` into a `u64`.
fn hash_parts(parts: &[&dyn fmt::Display]) -> u64 {
    let payload = parts
        .iter()
        .map(|part| part.to_string())
        .collect::<Vec<_>>()
        .join("|");
    let digest = blake3::hash(payload.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_be_bytes(head)
}

/// Derive the base seed of a sector from the generation inputs.
///
/// A missing `theme_hint` hashes as the empty string. The hint takes part in
/// the hash even when it names no known theme.
pub fn derive_base(
    sector_id: &str,
    seed: &SeedValue,
    difficulty: i64,
    theme_hint: Option<&str>,
) -> u64 {
    let hint = theme_hint.unwrap_or("");
    hash_parts(&[&sector_id, seed, &difficulty, &hint])
}

/// Derive a named sub-seed from a base seed.
pub fn derive_sub(seed: u64, name: &str) -> u64 {
    hash_parts(&[&seed, &name])
}

/// Derive the seed of one retry attempt's stream from a category sub-seed.
pub fn derive_attempt(sub_seed: u64, attempt: u32) -> u64 {
    hash_parts(&[&sub_seed, &attempt])
}

// ---------------------------------------------------------------------------
// SubSeeds
// ---------------------------------------------------------------------------

/// The seven named per-category sub-seeds of one sector.
///
/// `validation` is reserved: it is derived and reported in the manifest
/// metadata, but no placer draws from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubSeeds {
    pub outposts: u64,
    pub npcs: u64,
    pub asteroids: u64,
    pub hazards: u64,
    pub resources: u64,
    pub background: u64,
    pub validation: u64,
}

impl SubSeeds {
    /// Category names in derivation order.
    pub const NAMES: [&'static str; 7] = [
        "outposts",
        "npcs",
        "asteroids",
        "hazards",
        "resources",
        "background",
        "validation",
    ];

    /// Derive all sub-seeds from a base seed.
    pub fn derive(base: u64) -> Self {
        Self {
            outposts: derive_sub(base, "outposts"),
            npcs: derive_sub(base, "npcs"),
            asteroids: derive_sub(base, "asteroids"),
            hazards: derive_sub(base, "hazards"),
            resources: derive_sub(base, "resources"),
            background: derive_sub(base, "background"),
            validation: derive_sub(base, "validation"),
        }
    }

    /// Iterate `(name, seed)` pairs in derivation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> {
        let values = [
            self.outposts,
            self.npcs,
            self.asteroids,
            self.hazards,
            self.resources,
            self.background,
            self.validation,
        ];
        Self::NAMES.into_iter().zip(values)
    }

    /// The name -> seed map reported in manifest metadata.
    pub fn to_map(&self) -> BTreeMap<String, u64> {
        self.iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
