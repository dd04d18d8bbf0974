//! Breeding-pair compatibility scoring.
//!
//! The score is always paired with advantage and concern tags; the UI
//! explains a recommendation from the tags, not from the number.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use studbook_data::{RetiredHorseRecord, StatName};

const BASE_SCORE: f64 = 50.0;
const SAME_BREED_BONUS: f64 = 10.0;
const CROSS_BREED_BONUS: f64 = 5.0;
const GRADE_SCALE: f64 = 5.0;
const SPECIALIZATION_BONUS: f64 = 5.0;
const HIGH_INBREEDING: f64 = 0.2;
const MODERATE_INBREEDING: f64 = 0.1;
const HIGH_INBREEDING_PENALTY: f64 = 15.0;
const MODERATE_INBREEDING_PENALTY: f64 = 5.0;

const SHARED_PARENT: f64 = 0.125;
const SHARED_DISTANT_ANCESTOR: f64 = 0.0625;
const PARENT_OFFSPRING: f64 = 0.25;

/// Coarse band of a compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CompatibilityRating {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            CompatibilityRating::Excellent
        } else if score >= 70.0 {
            CompatibilityRating::Good
        } else if score >= 50.0 {
            CompatibilityRating::Fair
        } else {
            CompatibilityRating::Poor
        }
    }
}

/// Score and explanation for one candidate pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    /// Overall score in [0, 100].
    pub overall: f64,
    pub rating: CompatibilityRating,
    pub potential_inbreeding: f64,
    pub stat_synergy: f64,
    pub advantages: Vec<String>,
    pub concerns: Vec<String>,
}

/// Scores a prospective pairing. Symmetric in its arguments.
#[must_use]
pub fn calculate_breeding_compatibility(
    a: &RetiredHorseRecord,
    b: &RetiredHorseRecord,
) -> CompatibilityReport {
    let mut score = BASE_SCORE;
    let mut advantages = Vec::new();
    let mut concerns = Vec::new();

    if a.breed == b.breed {
        score += SAME_BREED_BONUS;
        advantages.push("Same breed pairing maintains breed consistency".to_string());
    } else {
        score += CROSS_BREED_BONUS;
        advantages.push("Cross-breeding may produce hybrid vigor".to_string());
    }

    let avg_grade = f64::from(a.grade.value() + b.grade.value()) / 2.0;
    score += (avg_grade - 1.0) * GRADE_SCALE;
    if avg_grade >= 4.5 {
        advantages.push("Both parents have strong racing records".to_string());
    } else if avg_grade <= 2.5 {
        concerns.push("Limited racing success in pairing".to_string());
    }

    if !a.specialization.is_empty() && a.specialization == b.specialization {
        score += SPECIALIZATION_BONUS;
        advantages.push(format!(
            "Matching {} specialization reinforces strengths",
            a.specialization
        ));
    } else {
        advantages.push("Different specializations add genetic diversity".to_string());
    }

    let potential_inbreeding = calculate_potential_inbreeding(a, b);
    if potential_inbreeding > HIGH_INBREEDING {
        score -= HIGH_INBREEDING_PENALTY;
        concerns.push(format!(
            "High inbreeding risk ({:.1}%)",
            potential_inbreeding * 100.0
        ));
    } else if potential_inbreeding > MODERATE_INBREEDING {
        score -= MODERATE_INBREEDING_PENALTY;
        concerns.push(format!(
            "Moderate inbreeding risk ({:.1}%)",
            potential_inbreeding * 100.0
        ));
    }

    let stat_synergy = stat_synergy(a, b);
    score += stat_synergy;
    if stat_synergy >= 6.0 {
        advantages.push("Excellent stat synergy".to_string());
    } else if stat_synergy >= 3.0 {
        advantages.push("Good stat synergy".to_string());
    }

    let overall = score.clamp(0.0, 100.0);
    CompatibilityReport {
        overall,
        rating: CompatibilityRating::from_score(overall),
        potential_inbreeding,
        stat_synergy,
        advantages,
        concerns,
    }
}

/// Shared-ancestor estimate for a prospective pairing, in [0, 0.5].
///
/// A parent shared by both horses adds 0.125, any other shared name within
/// two generations adds 0.0625, and one horse having sired or foaled the
/// other adds 0.25.
#[must_use]
pub fn calculate_potential_inbreeding(a: &RetiredHorseRecord, b: &RetiredHorseRecord) -> f64 {
    let a_parents = parent_names(a);
    let b_parents = parent_names(b);
    let a_ancestors = ancestor_names(a);
    let b_ancestors = ancestor_names(b);

    let shared_parents = a_parents.intersection(&b_parents).count();
    let shared_distant = a_ancestors
        .intersection(&b_ancestors)
        .filter(|name| !(a_parents.contains(*name) && b_parents.contains(*name)))
        .count();

    let mut coefficient = shared_parents as f64 * SHARED_PARENT
        + shared_distant as f64 * SHARED_DISTANT_ANCESTOR;
    if a_parents.contains(b.name.as_str()) || b_parents.contains(a.name.as_str()) {
        coefficient += PARENT_OFFSPRING;
    }
    coefficient.min(0.5)
}

/// Up to 3 points per stat: +3 when the pair averages above 75, +1.5 above 60.
fn stat_synergy(a: &RetiredHorseRecord, b: &RetiredHorseRecord) -> f64 {
    StatName::ALL
        .iter()
        .map(|&stat| {
            let avg = f64::from(a.stats.get(stat) + b.stats.get(stat)) / 2.0;
            if avg > 75.0 {
                3.0
            } else if avg > 60.0 {
                1.5
            } else {
                0.0
            }
        })
        .sum()
}

fn parent_names(record: &RetiredHorseRecord) -> HashSet<&str> {
    record
        .pedigree
        .parents()
        .map(|p| p.name.as_str())
        .collect()
}

fn ancestor_names(record: &RetiredHorseRecord) -> HashSet<&str> {
    let mut names = parent_names(record);
    for parent in record.pedigree.parents() {
        if let Some(grand) = &parent.pedigree {
            names.extend(grand.sire.as_deref());
            names.extend(grand.dam.as_deref());
        }
    }
    names
}
