//! Breed descriptor capability.
//!
//! The engine never hard-codes breed tables. Callers inject something that
//! implements [`BreedProfile`]; [`BreedDefinition`] is the config-driven
//! implementation and [`BreedCatalog`] is a lookup the caller owns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use studbook_data::{StatName, Stats};

/// Racing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Turf,
    Dirt,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Turf => f.write_str("turf"),
            Surface::Dirt => f.write_str("dirt"),
        }
    }
}

impl FromStr for Surface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "turf" | "grass" => Ok(Surface::Turf),
            "dirt" => Ok(Surface::Dirt),
            other => Err(format!("unknown surface '{other}'")),
        }
    }
}

/// What the stat generator needs to know about a breed.
pub trait BreedProfile {
    fn name(&self) -> &str;

    /// Growth tendency multiplier for a stat; 1.0 is neutral.
    fn growth_rate(&self, stat: StatName) -> f64;

    /// Hard maximum for a stat.
    fn stat_cap(&self, stat: StatName) -> i32;

    /// Clamps every stat into `[0, cap]`.
    fn enforce_stat_caps(&self, stats: Stats) -> Stats {
        let mut capped = stats;
        for stat in StatName::ALL {
            let cap = self.stat_cap(stat).max(0);
            capped.set(stat, stats.get(stat).clamp(0, cap));
        }
        capped
    }

    /// Affinity for a surface; 1.0 is neutral.
    fn surface_preference(&self, surface: Surface) -> f64;
}

/// Per-stat numeric table used by breed definitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatTable<T> {
    pub speed: T,
    pub stamina: T,
    pub power: T,
}

impl<T: Copy> StatTable<T> {
    pub fn get(&self, stat: StatName) -> T {
        match stat {
            StatName::Speed => self.speed,
            StatName::Stamina => self.stamina,
            StatName::Power => self.power,
        }
    }
}

/// Surface affinities of a breed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePreferences {
    pub turf: f64,
    pub dirt: f64,
}

impl Default for SurfacePreferences {
    fn default() -> Self {
        Self {
            turf: 1.0,
            dirt: 1.0,
        }
    }
}

/// A breed as described in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedDefinition {
    pub name: String,
    pub growth_rates: StatTable<f64>,
    pub stat_caps: StatTable<i32>,
    #[serde(default)]
    pub surface: SurfacePreferences,
}

impl BreedProfile for BreedDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn growth_rate(&self, stat: StatName) -> f64 {
        self.growth_rates.get(stat)
    }

    fn stat_cap(&self, stat: StatName) -> i32 {
        self.stat_caps.get(stat)
    }

    fn surface_preference(&self, surface: Surface) -> f64 {
        match surface {
            Surface::Turf => self.surface.turf,
            Surface::Dirt => self.surface.dirt,
        }
    }
}

/// Case-insensitive breed lookup owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct BreedCatalog {
    breeds: HashMap<String, BreedDefinition>,
}

impl BreedCatalog {
    #[must_use]
    pub fn new(definitions: impl IntoIterator<Item = BreedDefinition>) -> Self {
        let breeds = definitions
            .into_iter()
            .map(|b| (b.name.to_lowercase(), b))
            .collect();
        Self { breeds }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BreedDefinition> {
        self.breeds.get(&name.trim().to_lowercase())
    }

    /// Breed names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.breeds.values().map(|b| b.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }
}
