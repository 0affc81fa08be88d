//! The compiled-in sector theme catalog.
//!
//! A theme fixes the palette and the background element kinds a sector is
//! dressed with. The catalog is constant data; selection is a pure lookup
//! driven by an injected [`SectorRng`].

use crate::rng::SectorRng;

/// One entry of the theme catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeProfile {
    /// Stable identifier carried in manifest metadata.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Three hex colors (primary, accent, shadow).
    pub palette: [&'static str; 3],
    /// Background kinds used for large, major dressing.
    pub primary_elements: &'static [&'static str],
    /// Background kinds used for minor dressing.
    pub secondary_elements: &'static [&'static str],
    /// Flavor text.
    pub lore: &'static str,
}

/// The full theme catalog.
pub static THEMES: [ThemeProfile; 8] = [
    ThemeProfile {
        id: "ringed_planet_orbit",
        name: "Ringed Planet Orbit",
        palette: ["#7ED2FF", "#FFC58A", "#5C7A9A"],
        primary_elements: &["wireframe_planet", "ring_system"],
        secondary_elements: &["wireframe_moon", "nebula_volume", "distant_beacon"],
        lore: "A gas giant hangs beyond reachable space, its rings scored with old cargo \
               lanes. Pilots say dormant navigation buoys still hum somewhere in the ice.",
    },
    ThemeProfile {
        id: "nebula_drift",
        name: "Nebula Drift",
        palette: ["#A56BFF", "#FF7AD9", "#4A2C6B"],
        primary_elements: &["nebula_volume", "wireframe_planet"],
        secondary_elements: &["wireframe_moon", "ring_system", "derelict_megastructure"],
        lore: "Luminous clouds coil through the sector and stain every hull magenta. \
               Scavengers swear the static hides a distress call that never stopped.",
    },
    ThemeProfile {
        id: "derelict_fleet_graveyard",
        name: "Derelict Fleet Graveyard",
        palette: ["#9AA3B2", "#E2B68A", "#566070"],
        primary_elements: &["derelict_megastructure", "wireframe_planet"],
        secondary_elements: &["wireframe_moon", "distant_beacon", "nebula_volume"],
        lore: "Hulks of a defensive line drift in formation, still waiting on a retreat \
               order. A looping emergency beacon is the only light in the wreckage.",
    },
    ThemeProfile {
        id: "pulsar_shroud",
        name: "Pulsar Shroud",
        palette: ["#69E6FF", "#FFF07C", "#1A3552"],
        primary_elements: &["nebula_volume", "pulsar_spire"],
        secondary_elements: &[
            "wireframe_planet",
            "wireframe_moon",
            "ring_system",
            "distant_beacon",
        ],
        lore: "A distant pulsar strobes the nebula in steady flashes. Patrols keep time \
               by it and smugglers jump under cover of the flicker.",
    },
    ThemeProfile {
        id: "crystalline_expanse",
        name: "Crystalline Expanse",
        palette: ["#A7F6D9", "#F3FFF6", "#4EA4A8"],
        primary_elements: &["wireframe_planet", "crystal_cluster"],
        secondary_elements: &["wireframe_moon", "ring_system", "nebula_volume"],
        lore: "Icy particulate streams split the starlight into greens and whites. \
               Prospectors talk of a vault world sealed beyond the horizon.",
    },
    ThemeProfile {
        id: "aurora_frontier",
        name: "Aurora Frontier",
        palette: ["#6FFFCB", "#7AA7FF", "#14243A"],
        primary_elements: &["wireframe_planet", "aurora_ribbon"],
        secondary_elements: &[
            "wireframe_moon",
            "distant_beacon",
            "ring_system",
            "nebula_volume",
        ],
        lore: "Charged winds comb the edge of a restless magnetosphere into auroral \
               curtains. Frontier crews follow the green bands to the only stable exit.",
    },
    ThemeProfile {
        id: "clockwork_relay",
        name: "Clockwork Relay",
        palette: ["#F2C879", "#C9D1E8", "#3B4A66"],
        primary_elements: &["derelict_megastructure", "ring_system"],
        secondary_elements: &["wireframe_planet", "distant_beacon", "wireframe_moon"],
        lore: "A skeletal relay lattice rings the sector like a broken astrolabe. \
               Restoring one node is rumored to relight an old jump route.",
    },
    ThemeProfile {
        id: "ember_wastes",
        name: "Ember Wastes",
        palette: ["#FF9A6A", "#FCD38A", "#5B3238"],
        primary_elements: &["wireframe_planet", "derelict_megastructure"],
        secondary_elements: &["nebula_volume", "distant_beacon", "wireframe_moon"],
        lore: "Reactor scars and drifting plasma paint the background a burnt orange. \
               Every station here keeps a memorial to a convoy lost in the flare season.",
    },
];

/// All catalog entries.
pub fn all() -> &'static [ThemeProfile] {
    &THEMES
}

/// Look up a theme by id.
pub fn find(id: &str) -> Option<&'static ThemeProfile> {
    THEMES.iter().find(|theme| theme.id == id)
}

/// Select the sector theme.
///
/// A hint naming a catalog id wins. Any other hint (including an empty one)
/// is ignored and a theme is drawn uniformly from `rng`. The draw only
/// happens when the hint does not resolve.
pub fn select(rng: &mut SectorRng, hint: Option<&str>) -> &'static ThemeProfile {
    if let Some(theme) = hint.filter(|h| !h.is_empty()).and_then(find) {
        return theme;
    }
    rng.choose(&THEMES).unwrap_or(&THEMES[0])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
