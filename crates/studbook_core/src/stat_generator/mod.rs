//! Procedural stat synthesis.
//!
//! A foal's stats come out of a fixed pipeline:
//!
//! 1. **Base**: one of nine [`VariationPattern`]s, narrowed by the
//!    generation type's variance factor.
//! 2. **Breed**: strong growth tendencies nudge a stat by ±5%.
//! 3. **Heritage**: parental pull, hybrid vigor, inbreeding depression.
//! 4. **Customization**: additive training deltas.
//! 5. **Caps**: round, floor at zero, clamp to breed caps.
//!
//! Every stage is checked for non-finite values; malformed inputs fail fast
//! with a [`GenerationError`] instead of producing a broken horse.

pub mod attributes;
pub mod customization;
pub mod heritage;
pub mod patterns;

pub use attributes::{SecondaryAttributes, TrackAptitude};
pub use customization::{Customization, DistanceFocus, Strategy};
pub use patterns::VariationPattern;

use crate::breed::BreedProfile;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use studbook_data::{Pedigree, StatName, Stats};

const STRONG_GROWTH: f64 = 1.1;
const WEAK_GROWTH: f64 = 0.9;
const STRONG_GROWTH_BOOST: f64 = 1.05;
const WEAK_GROWTH_DRAG: f64 = 0.95;
/// Distance from the mean that makes a stat a strength or weakness.
const STANDOUT_MARGIN: f64 = 8.0;

/// Intermediate stat values carried between pipeline stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValues {
    pub speed: f64,
    pub stamina: f64,
    pub power: f64,
}

impl StatValues {
    #[must_use]
    pub fn new(speed: f64, stamina: f64, power: f64) -> Self {
        Self {
            speed,
            stamina,
            power,
        }
    }

    #[must_use]
    pub fn from_stats(stats: &Stats) -> Self {
        Self::new(
            f64::from(stats.speed),
            f64::from(stats.stamina),
            f64::from(stats.power),
        )
    }

    #[must_use]
    pub fn get(&self, stat: StatName) -> f64 {
        match stat {
            StatName::Speed => self.speed,
            StatName::Stamina => self.stamina,
            StatName::Power => self.power,
        }
    }

    pub fn set(&mut self, stat: StatName, value: f64) {
        match stat {
            StatName::Speed => self.speed = value,
            StatName::Stamina => self.stamina = value,
            StatName::Power => self.power = value,
        }
    }

    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.speed), f(self.stamina), f(self.power))
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        (self.speed + self.stamina + self.power) / 3.0
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.speed.max(self.stamina).max(self.power)
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.speed.min(self.stamina).min(self.power)
    }

    fn ensure_finite(&self, stage: &'static str) -> Result<(), GenerationError> {
        match StatName::ALL.into_iter().find(|&s| !self.get(s).is_finite()) {
            Some(stat) => Err(GenerationError::NonFiniteStat { stage, stat }),
            None => Ok(()),
        }
    }
}

/// How a horse enters the game; controls base-stat variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationType {
    Foundation,
    Bred,
    Customized,
}

impl GenerationType {
    #[must_use]
    pub fn variance(self, config: &GeneratorConfig) -> f64 {
        match self {
            GenerationType::Foundation => config.variance.foundation,
            GenerationType::Bred => config.variance.bred,
            GenerationType::Customized => config.variance.customized,
        }
    }
}

impl std::str::FromStr for GenerationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "foundation" => Ok(GenerationType::Foundation),
            "bred" => Ok(GenerationType::Bred),
            "customized" | "customised" => Ok(GenerationType::Customized),
            other => Err(format!("unknown generation type '{other}'")),
        }
    }
}

/// Everything the pipeline needs for one horse.
#[derive(Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub breed: &'a dyn BreedProfile,
    pub pedigree: Option<&'a Pedigree>,
    pub customization: Option<&'a Customization>,
    pub kind: GenerationType,
}

impl<'a> GenerationRequest<'a> {
    pub fn foundation(breed: &'a dyn BreedProfile) -> Self {
        Self {
            breed,
            pedigree: None,
            customization: None,
            kind: GenerationType::Foundation,
        }
    }

    pub fn bred(breed: &'a dyn BreedProfile, pedigree: &'a Pedigree) -> Self {
        Self {
            breed,
            pedigree: Some(pedigree),
            customization: None,
            kind: GenerationType::Bred,
        }
    }

    #[must_use]
    pub fn with_customization(mut self, customization: &'a Customization) -> Self {
        self.customization = Some(customization);
        self
    }
}

/// Quality band by final stat total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatTier {
    Raw,
    Developing,
    Solid,
    Superior,
    Exceptional,
}

impl StatTier {
    #[must_use]
    pub fn from_total(total: i32) -> Self {
        match total {
            t if t >= 200 => StatTier::Exceptional,
            t if t >= 170 => StatTier::Superior,
            t if t >= 140 => StatTier::Solid,
            t if t >= 110 => StatTier::Developing,
            _ => StatTier::Raw,
        }
    }
}

/// Stage-by-stage trace of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub kind: GenerationType,
    pub pattern: VariationPattern,
    pub base: StatValues,
    pub breed_influenced: StatValues,
    pub heritage: Option<StatValues>,
    pub customized: Option<StatValues>,
    pub final_stats: Stats,
    pub tier: StatTier,
    pub strengths: Vec<StatName>,
    pub weaknesses: Vec<StatName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedHorse {
    pub stats: Stats,
    pub attributes: SecondaryAttributes,
    pub report: GenerationReport,
}

/// Seeded base draw, for reproducible tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub pattern: VariationPattern,
    pub stats: StatValues,
}

#[derive(Debug, Clone, Default)]
pub struct StatGenerator {
    config: GeneratorConfig,
}

impl StatGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate_stats(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<GeneratedHorse, GenerationError> {
        self.generate_stats_with_rng(request, &mut rand::thread_rng())
    }

    pub fn generate_stats_with_rng<R: Rng>(
        &self,
        request: &GenerationRequest<'_>,
        rng: &mut R,
    ) -> Result<GeneratedHorse, GenerationError> {
        validate_breed(request.breed)?;
        if let Some(pedigree) = request.pedigree {
            heritage::validate_pedigree(pedigree)?;
        }

        let base = self.base_stats_with_rng(request.kind, rng)?;
        base.stats.ensure_finite("base")?;

        let breed_influenced = apply_breed_influence(base.stats, request.breed);
        breed_influenced.ensure_finite("breed")?;

        let heritage = match request.pedigree.filter(|p| p.has_parents()) {
            Some(pedigree) => {
                let out = heritage::apply_heritage(breed_influenced, pedigree)?;
                out.ensure_finite("heritage")?;
                Some(out)
            }
            None => None,
        };

        let customized = match request.customization.filter(|c| !c.is_empty()) {
            Some(custom) => {
                let out = custom.apply(heritage.unwrap_or(breed_influenced));
                out.ensure_finite("customization")?;
                Some(out)
            }
            None => None,
        };

        let before_caps = customized.or(heritage).unwrap_or(breed_influenced);
        let stats = apply_caps(before_caps, request.breed);
        let attributes = SecondaryAttributes::derive(&stats, request.breed, request.pedigree);
        let (strengths, weaknesses) = standouts(&stats);

        tracing::debug!(
            breed = request.breed.name(),
            kind = ?request.kind,
            pattern = ?base.pattern,
            speed = stats.speed,
            stamina = stats.stamina,
            power = stats.power,
            "Generated stats"
        );

        Ok(GeneratedHorse {
            stats,
            attributes,
            report: GenerationReport {
                kind: request.kind,
                pattern: base.pattern,
                base: base.stats,
                breed_influenced,
                heritage,
                customized,
                final_stats: stats,
                tier: StatTier::from_total(stats.total()),
                strengths,
                weaknesses,
            },
        })
    }

    /// Deterministic base draw for a given seed.
    pub fn generate_base_stats_with_seed(
        &self,
        kind: GenerationType,
        seed: u64,
    ) -> Result<BaseStats, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.base_stats_with_rng(kind, &mut rng)
    }

    fn base_stats_with_rng<R: Rng>(
        &self,
        kind: GenerationType,
        rng: &mut R,
    ) -> Result<BaseStats, GenerationError> {
        let variance = kind.variance(&self.config);
        if !variance.is_finite() || variance <= 0.0 || variance > 1.0 {
            return Err(GenerationError::InvalidVariance(variance));
        }
        let (min, max) = (self.config.base_min, self.config.base_max);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min >= max {
            return Err(GenerationError::InvalidBaseBounds { min, max });
        }

        let pattern = VariationPattern::random(rng);
        let stats = pattern.synthesize(rng, variance, min, max);
        Ok(BaseStats { pattern, stats })
    }
}

fn validate_breed(breed: &dyn BreedProfile) -> Result<(), GenerationError> {
    for stat in StatName::ALL {
        let value = breed.growth_rate(stat);
        if !value.is_finite() || value <= 0.0 {
            return Err(GenerationError::InvalidGrowthRate {
                breed: breed.name().to_string(),
                stat,
                value,
            });
        }
    }
    Ok(())
}

/// Nudges stats the breed is notably good or bad at.
#[must_use]
pub fn apply_breed_influence(stats: StatValues, breed: &dyn BreedProfile) -> StatValues {
    let mut out = stats;
    for stat in StatName::ALL {
        let rate = breed.growth_rate(stat);
        if rate > STRONG_GROWTH {
            out.set(stat, out.get(stat) * STRONG_GROWTH_BOOST);
        } else if rate < WEAK_GROWTH {
            out.set(stat, out.get(stat) * WEAK_GROWTH_DRAG);
        }
    }
    out
}

/// Rounds, floors at zero, then applies the breed's caps.
#[must_use]
pub fn apply_caps(stats: StatValues, breed: &dyn BreedProfile) -> Stats {
    let mut rounded = Stats::default();
    for stat in StatName::ALL {
        // values are finite and well inside i32 after the earlier checks
        rounded.set(stat, stats.get(stat).round().max(0.0) as i32);
    }
    breed.enforce_stat_caps(rounded)
}

fn standouts(stats: &Stats) -> (Vec<StatName>, Vec<StatName>) {
    let mean = stats.average();
    let strengths = StatName::ALL
        .into_iter()
        .filter(|&s| f64::from(stats.get(s)) >= mean + STANDOUT_MARGIN)
        .collect();
    let weaknesses = StatName::ALL
        .into_iter()
        .filter(|&s| f64::from(stats.get(s)) <= mean - STANDOUT_MARGIN)
        .collect();
    (strengths, weaknesses)
}
