//! Error types for the engine.
//!
//! Two tiers: [`StableRejection`] is a recoverable domain outcome the caller
//! shows to the player, [`GenerationError`] is a contract violation raised by
//! the stat generator when its inputs are malformed.

use studbook_data::{CareerGrade, StatName};
use thiserror::Error;

/// Why a stable refused a retirement or breeding request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StableRejection {
    #[error("{0} is already retired to the stable")]
    AlreadyRetired(String),

    #[error("{name} retired with grade {grade}; the stable requires at least {required}")]
    GradeBelowMinimum {
        name: String,
        grade: CareerGrade,
        required: CareerGrade,
    },

    #[error("{name} ran {races} races; the stable requires at least {required}")]
    NotEnoughRaces {
        name: String,
        races: u32,
        required: u32,
    },

    #[error("Stable is at capacity ({0} horses)")]
    AtCapacity(u32),

    #[error("{name} has gender '{gender}', which is not breeding-eligible")]
    UnrecognizedGender { name: String, gender: String },

    #[error("Invalid breeding pair: {0}")]
    InvalidPair(String),

    #[error("No retired horse named {0}")]
    UnknownHorse(String),
}

impl StableRejection {
    /// Player-facing explanation.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Malformed input handed to the stat generator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Parent {parent} has invalid {stat} value {value} (expected 0..=150)")]
    InvalidParentStat {
        parent: String,
        stat: StatName,
        value: i32,
    },

    #[error("Stage '{stage}' produced a non-finite {stat} value")]
    NonFiniteStat { stage: &'static str, stat: StatName },

    #[error("Inbreeding coefficient {0} is outside [0, 0.5]")]
    InvalidInbreeding(f64),

    #[error("Breed {breed} reports invalid growth rate {value} for {stat}")]
    InvalidGrowthRate {
        breed: String,
        stat: StatName,
        value: f64,
    },

    #[error("Variance factor {0} is outside (0, 1]")]
    InvalidVariance(f64),

    #[error("Base stat bounds [{min}, {max}] are invalid")]
    InvalidBaseBounds { min: f64, max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reason() {
        let err = StableRejection::AtCapacity(20);
        assert_eq!(err.reason(), "Stable is at capacity (20 horses)");
    }

    #[test]
    fn test_generation_error_display() {
        let err = GenerationError::InvalidParentStat {
            parent: "Comet".into(),
            stat: StatName::Speed,
            value: -4,
        };
        assert!(err.to_string().contains("Comet"));
        assert!(err.to_string().contains("speed"));
    }
}
