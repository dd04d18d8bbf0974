//! # Studbook Core
//!
//! Breeding and attribute engine for a horse-racing management game.
//!
//! This crate contains the behaviour layered over the plain records in
//! `studbook_data`:
//! - Pedigree construction, compression and inbreeding estimates
//! - The stable of retired breeding stock and its breeding history
//! - Pair compatibility scoring and recommendations
//! - Procedural stat synthesis for foundation, bred and customized horses
//! - Configuration and structured logging
//!
//! ## Architecture
//!
//! Breed tables and gender rules are injected through the [`BreedProfile`]
//! and [`GenderMaturity`] traits; nothing reads global state. Randomness is
//! always drawn from a caller-supplied `Rng`, so seeded runs are reproducible.
//!
//! ## Example
//!
//! ```
//! use studbook_core::{EngineConfig, GenerationRequest, StatGenerator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = EngineConfig::default();
//! let catalog = config.catalog();
//! let breed = catalog.get("Arabian").unwrap();
//!
//! let generator = StatGenerator::new(config.generator.clone());
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let horse = generator
//!     .generate_stats_with_rng(&GenerationRequest::foundation(breed), &mut rng)
//!     .unwrap();
//! assert!(horse.stats.stamina <= 100);
//! ```

/// Breed descriptors and the configurable breed catalog
pub mod breed;
/// Pair compatibility scoring
pub mod compatibility;
/// Configuration management for engine balance parameters
pub mod config;
/// Domain rejections and generator contract errors
pub mod error;
/// Gender maturity mapping for retiring horses
pub mod gender;
/// Structured logging setup
pub mod logging;
/// Pedigree construction and genetic bookkeeping
pub mod pedigree;
/// Retired breeding stock registry
pub mod stable;
/// Multi-stage stat synthesis
pub mod stat_generator;

pub use breed::{BreedCatalog, BreedDefinition, BreedProfile, Surface};
pub use compatibility::{
    calculate_breeding_compatibility, calculate_potential_inbreeding, CompatibilityRating,
    CompatibilityReport,
};
pub use config::{EngineConfig, GeneratorConfig, StableConfig, VarianceConfig};
pub use error::{GenerationError, StableRejection};
pub use gender::{GenderMaturity, StandardMaturity};
pub use logging::init_logging;
pub use pedigree::{ParentRecordLogic, PedigreeLogic, PedigreeOptions};
pub use stable::{BreedingFilters, BreedingRecommendation, Stable, StableSummary};
pub use stat_generator::{
    Customization, DistanceFocus, GeneratedHorse, GenerationReport, GenerationRequest,
    GenerationType, SecondaryAttributes, StatGenerator, StatTier, Strategy, VariationPattern,
};
