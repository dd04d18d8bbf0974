//! Configuration management for engine balance parameters.
//!
//! Strongly-typed structures mapping onto `config.toml`. Anything missing
//! from the file falls back to the `Default` impls below.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [stable]
//! capacity = 20
//! min_grade = "D"
//! min_races = 3
//!
//! [generator]
//! base_min = 20.0
//! base_max = 70.0
//!
//! [generator.variance]
//! foundation = 1.0
//! bred = 0.8
//! customized = 0.9
//!
//! [[breeds]]
//! name = "Thoroughbred"
//! growth_rates = { speed = 1.15, stamina = 1.0, power = 0.95 }
//! stat_caps = { speed = 100, stamina = 95, power = 90 }
//! surface = { turf = 1.1, dirt = 1.0 }
//! ```

use crate::breed::{BreedCatalog, BreedDefinition, StatTable, SurfacePreferences};
use serde::{Deserialize, Serialize};
use std::path::Path;
use studbook_data::{CareerGrade, StablePreferences, DEFAULT_STABLE_CAPACITY};

/// Retirement pool sizing and eligibility.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StableConfig {
    pub capacity: u32,
    pub min_grade: CareerGrade,
    pub min_races: u32,
}

impl Default for StableConfig {
    fn default() -> Self {
        let preferences = StablePreferences::default();
        Self {
            capacity: DEFAULT_STABLE_CAPACITY,
            min_grade: preferences.min_grade,
            min_races: preferences.min_races,
        }
    }
}

impl StableConfig {
    #[must_use]
    pub fn preferences(&self) -> StablePreferences {
        StablePreferences {
            min_grade: self.min_grade,
            min_races: self.min_races,
        }
    }
}

/// Spread of the base-stat draw per generation type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VarianceConfig {
    pub foundation: f64,
    pub bred: f64,
    pub customized: f64,
}

impl Default for VarianceConfig {
    fn default() -> Self {
        Self {
            foundation: 1.0,
            bred: 0.8,
            customized: 0.9,
        }
    }
}

/// Stat generator tuning.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub variance: VarianceConfig,
    pub base_min: f64,
    pub base_max: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            variance: VarianceConfig::default(),
            base_min: 20.0,
            base_max: 70.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub stable: StableConfig,
    pub generator: GeneratorConfig,
    pub breeds: Vec<BreedDefinition>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stable: StableConfig::default(),
            generator: GeneratorConfig::default(),
            breeds: default_breeds(),
        }
    }
}

fn breed(
    name: &str,
    growth: (f64, f64, f64),
    caps: (i32, i32, i32),
    surface: (f64, f64),
) -> BreedDefinition {
    BreedDefinition {
        name: name.to_string(),
        growth_rates: StatTable {
            speed: growth.0,
            stamina: growth.1,
            power: growth.2,
        },
        stat_caps: StatTable {
            speed: caps.0,
            stamina: caps.1,
            power: caps.2,
        },
        surface: SurfacePreferences {
            turf: surface.0,
            dirt: surface.1,
        },
    }
}

fn default_breeds() -> Vec<BreedDefinition> {
    vec![
        breed("Thoroughbred", (1.15, 1.0, 0.95), (100, 95, 90), (1.1, 1.0)),
        breed("Arabian", (0.95, 1.2, 0.85), (90, 100, 85), (1.0, 0.9)),
        breed("Quarter Horse", (1.2, 0.8, 1.15), (95, 75, 100), (0.9, 1.15)),
        breed("Standardbred", (1.0, 1.05, 1.0), (90, 95, 95), (1.0, 1.05)),
    ]
}

impl EngineConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns the first violated rule as an error.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.stable.capacity > 0, "Stable capacity must be positive");
        anyhow::ensure!(
            self.stable.capacity <= 500,
            "Stable capacity too large (max 500)"
        );

        let v = &self.generator.variance;
        for (label, value) in [
            ("foundation", v.foundation),
            ("bred", v.bred),
            ("customized", v.customized),
        ] {
            anyhow::ensure!(
                value > 0.0 && value <= 1.0,
                "Variance factor '{label}' must be in (0.0, 1.0]"
            );
        }
        anyhow::ensure!(
            self.generator.base_min >= 0.0,
            "Base stat minimum must be non-negative"
        );
        anyhow::ensure!(
            self.generator.base_min < self.generator.base_max,
            "Base stat minimum must be below maximum"
        );
        anyhow::ensure!(
            self.generator.base_max <= 100.0,
            "Base stat maximum too large (max 100)"
        );

        anyhow::ensure!(!self.breeds.is_empty(), "At least one breed is required");
        for b in &self.breeds {
            anyhow::ensure!(!b.name.trim().is_empty(), "Breed names must not be empty");
            for rate in [b.growth_rates.speed, b.growth_rates.stamina, b.growth_rates.power] {
                anyhow::ensure!(
                    rate.is_finite() && rate > 0.0,
                    "Breed {} has a non-positive growth rate",
                    b.name
                );
            }
            for cap in [b.stat_caps.speed, b.stat_caps.stamina, b.stat_caps.power] {
                anyhow::ensure!(
                    (1..=150).contains(&cap),
                    "Breed {} has a stat cap outside 1..=150",
                    b.name
                );
            }
        }
        Ok(())
    }

    /// Parses and validates a `config.toml` document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Breed lookup built from the configured definitions.
    #[must_use]
    pub fn catalog(&self) -> BreedCatalog {
        BreedCatalog::new(self.breeds.iter().cloned())
    }

    /// Stable hash of every balance-relevant section.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.stable).as_bytes());
        hasher.update(format!("{:?}", self.generator).as_bytes());
        hasher.update(format!("{:?}", self.breeds).as_bytes());
        hex::encode(hasher.finalize())
    }
}
