//! Parental heritage, hybrid vigor, and inbreeding depression.

use super::StatValues;
use crate::error::GenerationError;
use crate::pedigree::MAX_INBREEDING;
use studbook_data::{CareerGrade, ParentRecord, Pedigree, StatName};

/// Parent stats above this pull offspring up; below it pull down.
pub const HERITAGE_BASELINE: f64 = 40.0;
/// Each parent contributes half its weighted deviation.
pub const PARENT_SHARE: f64 = 0.5;
/// Parent stats outside `0..=MAX_PARENT_STAT` are treated as corrupt input.
pub const MAX_PARENT_STAT: i32 = 150;
/// Depression removes `coefficient * SCALE` of each stat.
pub const INBREEDING_DEPRESSION_SCALE: f64 = 0.5;

/// Weight applied to a parent's stat deviation, by career grade.
#[must_use]
pub fn heritage_weight(grade: CareerGrade) -> f64 {
    match grade {
        CareerGrade::S | CareerGrade::A => 0.15,
        CareerGrade::B | CareerGrade::C => 0.10,
        CareerGrade::D | CareerGrade::F => 0.05,
    }
}

/// Rejects pedigrees whose numbers cannot have come from a real breeding.
pub fn validate_pedigree(pedigree: &Pedigree) -> Result<(), GenerationError> {
    let coefficient = pedigree.inbreeding_coefficient;
    if !coefficient.is_finite() || !(0.0..=MAX_INBREEDING).contains(&coefficient) {
        return Err(GenerationError::InvalidInbreeding(coefficient));
    }
    for parent in pedigree.parents() {
        for stat in StatName::ALL {
            let value = parent.stats.get(stat);
            if !(0..=MAX_PARENT_STAT).contains(&value) {
                return Err(GenerationError::InvalidParentStat {
                    parent: parent.name.clone(),
                    stat,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Adds the parents' weighted deviations from the baseline.
#[must_use]
pub fn parental_influence(stats: StatValues, pedigree: &Pedigree) -> StatValues {
    let mut out = stats;
    for parent in pedigree.parents() {
        let contribution = parent_contribution(parent);
        for stat in StatName::ALL {
            out.set(stat, out.get(stat) + contribution.get(stat));
        }
    }
    out
}

fn parent_contribution(parent: &ParentRecord) -> StatValues {
    let weight = heritage_weight(parent.grade);
    StatValues::from_stats(&parent.stats)
        .map(|v| (v - HERITAGE_BASELINE) * weight * PARENT_SHARE)
}

/// Flat bonus on every stat for cross-bred foals.
///
/// The bonus is `avg * pct` where `pct` ramps from 2% at an average of 40 to
/// 5% at 80. Never negative.
#[must_use]
pub fn hybrid_vigor(stats: StatValues) -> StatValues {
    let bonus = hybrid_vigor_bonus(stats.mean());
    stats.map(|v| v + bonus)
}

#[must_use]
pub fn hybrid_vigor_bonus(average: f64) -> f64 {
    let ramp = ((average - 40.0) / 40.0).clamp(0.0, 1.0);
    (average * (0.02 + 0.03 * ramp)).max(0.0)
}

/// Proportional reduction of every stat by `coefficient * 0.5`.
#[must_use]
pub fn inbreeding_depression(stats: StatValues, coefficient: f64) -> StatValues {
    let factor = 1.0 - coefficient.clamp(0.0, MAX_INBREEDING) * INBREEDING_DEPRESSION_SCALE;
    stats.map(|v| v * factor)
}

/// Full heritage stage: parental pull, then vigor, then depression.
pub fn apply_heritage(stats: StatValues, pedigree: &Pedigree) -> Result<StatValues, GenerationError> {
    validate_pedigree(pedigree)?;

    let mut out = parental_influence(stats, pedigree);
    if pedigree.cross_bred {
        out = hybrid_vigor(out);
    }
    if pedigree.inbreeding_coefficient > 0.0 {
        out = inbreeding_depression(out, pedigree.inbreeding_coefficient);
    }
    tracing::debug!(
        lineage = %pedigree.lineage,
        cross_bred = pedigree.cross_bred,
        inbreeding = pedigree.inbreeding_coefficient,
        "Applied heritage"
    );
    Ok(out)
}
