use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use studbook_core::{BreedCatalog, BreedDefinition, EngineConfig, Stable, StatGenerator};
use thiserror::Error;

/// Lookups the CLI reports back to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Unknown breed '{name}'. Known breeds: {known}")]
    UnknownBreed { name: String, known: String },

    #[error("No retired horse named '{0}' in the stable")]
    HorseNotFound(String),
}

pub struct App {
    pub config: EngineConfig,
    pub catalog: BreedCatalog,
    pub generator: StatGenerator,
    pub stable: Stable,
    pub stable_path: PathBuf,
}

impl App {
    /// Loads config and stable. Missing files fall back to defaults, and a
    /// fresh stable takes its capacity and thresholds from the config.
    pub fn load<C: AsRef<Path>, S: AsRef<Path>>(config_path: C, stable_path: S) -> Result<Self> {
        let config = EngineConfig::load(config_path)?;
        let stable_path = stable_path.as_ref().to_path_buf();
        let stable = if stable_path.exists() {
            studbook_io::load_stable(&stable_path)?
        } else {
            Stable::new(&config.stable)
        };
        Ok(Self::with_parts(config, stable, stable_path))
    }

    pub fn with_parts(config: EngineConfig, stable: Stable, stable_path: PathBuf) -> Self {
        tracing::debug!(fingerprint = %config.fingerprint(), "Engine config loaded");
        Self {
            catalog: config.catalog(),
            generator: StatGenerator::new(config.generator.clone()),
            config,
            stable,
            stable_path,
        }
    }

    pub fn save(&self) -> Result<()> {
        studbook_io::save_stable(&self.stable, &self.stable_path)?;
        Ok(())
    }

    pub fn breed(&self, name: &str) -> Result<&BreedDefinition, AppError> {
        self.catalog.get(name).ok_or_else(|| AppError::UnknownBreed {
            name: name.to_string(),
            known: self.catalog.names().join(", "),
        })
    }

    /// Seeded RNG when a seed is given, OS entropy otherwise.
    pub fn rng(seed: Option<u64>) -> ChaCha8Rng {
        match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
