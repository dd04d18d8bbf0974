//! Pedigree construction and scoring.
//!
//! A pedigree is computed once from at most two parent summaries. Ancestry
//! beyond one compressed level is never walked, so every function here is
//! bounded regardless of how deep the real family tree goes.

use std::collections::{HashMap, HashSet};
use studbook_data::{
    CareerStats, CompressedPedigree, HorseProfile, ParentRecord, Pedigree, RetiredHorseRecord,
    FOUNDATION_LINEAGE,
};

/// Deepest ancestry a pedigree will record.
pub const MAX_GENERATIONS: u8 = 3;
/// Penalty per extra occurrence of an ancestor token.
pub const DUPLICATE_ANCESTOR_PENALTY: f64 = 0.125;
/// Ceiling of the inbreeding coefficient.
pub const MAX_INBREEDING: f64 = 0.5;
/// Number of foundation-line tags kept per pedigree.
pub const MAX_FOUNDATION_LINES: usize = 8;

const CROSS_BRED_BONUS: f64 = 1.05;
const FULL_DEPTH_BONUS: f64 = 1.02;

/// Optional knobs for [`PedigreeLogic::from_parents`].
#[derive(Debug, Clone, Default)]
pub struct PedigreeOptions {
    /// Overrides the derived lineage label.
    pub lineage: Option<String>,
    /// Creation time in epoch milliseconds; defaults to now.
    pub created: Option<i64>,
}

/// Construction logic for [`Pedigree`].
pub trait PedigreeLogic {
    /// Builds a pedigree from zero, one or two parents. Never fails.
    fn from_parents(
        sire: Option<&ParentRecord>,
        dam: Option<&ParentRecord>,
        options: PedigreeOptions,
    ) -> Self;

    /// Pedigree of a foal bred from two retired horses.
    fn for_foal(sire: &RetiredHorseRecord, dam: &RetiredHorseRecord) -> Self;

    /// One-level summary embedded when this horse becomes a parent.
    fn compress(&self) -> CompressedPedigree;
}

impl PedigreeLogic for Pedigree {
    fn from_parents(
        sire: Option<&ParentRecord>,
        dam: Option<&ParentRecord>,
        options: PedigreeOptions,
    ) -> Self {
        let created = options
            .created
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

        if sire.is_none() && dam.is_none() {
            let mut pedigree = Pedigree::foundation(created);
            if let Some(lineage) = options.lineage {
                pedigree.lineage = lineage;
            }
            return pedigree;
        }

        let generations = count_generations(sire, dam);
        let inbreeding_coefficient = inbreeding_coefficient(sire, dam);
        let cross_bred = matches!((sire, dam), (Some(s), Some(d)) if s.breed != d.breed);
        let foundation_lines = collect_foundation_lines(sire, dam);
        let pedigree_strength =
            pedigree_strength(sire, dam, cross_bred, inbreeding_coefficient, generations);
        let lineage = options
            .lineage
            .unwrap_or_else(|| lineage_label(sire, dam));

        tracing::debug!(
            lineage = %lineage,
            generations,
            inbreeding = inbreeding_coefficient,
            strength = pedigree_strength,
            "Pedigree built"
        );

        Pedigree {
            sire: sire.cloned(),
            dam: dam.cloned(),
            generations,
            inbreeding_coefficient,
            created,
            lineage,
            cross_bred,
            foundation_lines,
            pedigree_strength,
        }
    }

    fn for_foal(sire: &RetiredHorseRecord, dam: &RetiredHorseRecord) -> Self {
        let sire = ParentRecord::from_retired(sire);
        let dam = ParentRecord::from_retired(dam);
        Self::from_parents(Some(&sire), Some(&dam), PedigreeOptions::default())
    }

    fn compress(&self) -> CompressedPedigree {
        CompressedPedigree {
            sire: self.sire_name().map(str::to_string),
            dam: self.dam_name().map(str::to_string),
            generations: self.generations,
            foundation_lines: self.foundation_lines.clone(),
        }
    }
}

/// Builders for the parent summaries embedded in a pedigree.
pub trait ParentRecordLogic {
    fn from_profile(profile: &HorseProfile, career: &CareerStats) -> Self;
    fn from_retired(record: &RetiredHorseRecord) -> Self;
}

impl ParentRecordLogic for ParentRecord {
    fn from_profile(profile: &HorseProfile, career: &CareerStats) -> Self {
        ParentRecord {
            name: profile.name.clone(),
            breed: profile.breed.clone(),
            specialization: profile.specialization.clone(),
            racing_style: profile.racing_style.clone(),
            gender: profile.gender.clone(),
            stats: profile.stats,
            achievements: career.achievements.clone(),
            grade: career.grade,
            races_won: career.races_won,
            total_races: career.total_races,
            pedigree: compressed_if_known(&profile.pedigree),
            genetic_traits: profile.genetic_traits.clone(),
            surface_preference: profile.surface_preference.clone(),
            distance_preference: profile.distance_preference.clone(),
        }
    }

    fn from_retired(record: &RetiredHorseRecord) -> Self {
        ParentRecord {
            name: record.name.clone(),
            breed: record.breed.clone(),
            specialization: record.specialization.clone(),
            racing_style: record.racing_style.clone(),
            gender: record.original_gender.clone(),
            stats: record.stats,
            achievements: record.achievements.clone(),
            grade: record.grade,
            races_won: record.races_won,
            total_races: record.total_races,
            pedigree: compressed_if_known(&record.pedigree),
            genetic_traits: record.genetic_traits.clone(),
            surface_preference: record.surface_preference.clone(),
            distance_preference: record.distance_preference.clone(),
        }
    }
}

fn compressed_if_known(pedigree: &Pedigree) -> Option<CompressedPedigree> {
    if pedigree.has_parents() {
        Some(pedigree.compress())
    } else {
        None
    }
}

/// Generation depth: one more than the shallower parent, capped at 3.
#[must_use]
pub fn count_generations(sire: Option<&ParentRecord>, dam: Option<&ParentRecord>) -> u8 {
    match (sire, dam) {
        (None, None) => 0,
        (Some(s), Some(d)) => {
            let via_sire = s.generations().saturating_add(1);
            let via_dam = d.generations().saturating_add(1);
            via_sire.min(via_dam).min(MAX_GENERATIONS)
        }
        _ => 1,
    }
}

/// Duplicate-token inbreeding proxy.
///
/// Direct parents are identified by `"name (breed)"` and each parent's
/// foundation-line tags stand in for further ancestors. Every extra
/// occurrence of a token costs 0.125; the sum is capped at 0.5. This
/// deliberately conflates a shared foundation bloodline with a shared
/// ancestor.
#[must_use]
pub fn inbreeding_coefficient(sire: Option<&ParentRecord>, dam: Option<&ParentRecord>) -> f64 {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for parent in sire.into_iter().chain(dam) {
        *counts.entry(parent.ancestor_tag()).or_default() += 1;
        for line in parent.foundation_lines() {
            *counts.entry(line.clone()).or_default() += 1;
        }
    }

    let coefficient: f64 = counts
        .values()
        .filter(|&&n| n > 1)
        .map(|&n| DUPLICATE_ANCESTOR_PENALTY * (n - 1) as f64)
        .sum();
    coefficient.min(MAX_INBREEDING)
}

/// De-duplicated ancestor tags, parents first, at most eight.
#[must_use]
pub fn collect_foundation_lines(
    sire: Option<&ParentRecord>,
    dam: Option<&ParentRecord>,
) -> Vec<String> {
    let parents: Vec<&ParentRecord> = sire.into_iter().chain(dam).collect();
    let candidates = parents
        .iter()
        .map(|p| p.ancestor_tag())
        .chain(
            parents
                .iter()
                .flat_map(|p| p.foundation_lines().iter().cloned()),
        );

    let mut seen = HashSet::new();
    candidates
        .filter(|tag| seen.insert(tag.clone()))
        .take(MAX_FOUNDATION_LINES)
        .collect()
}

/// Strength contributed by a single parent, 0-100.
#[must_use]
pub fn parent_strength(parent: &ParentRecord) -> f64 {
    let stat_part = (parent.stats.average().clamp(0.0, 100.0) / 100.0) * 40.0;
    let grade_part = parent.grade.pedigree_score();
    let win_part = parent.win_rate() * 20.0;
    let achievement_part = (parent.achievements.len() as f64 * 2.0).min(10.0);
    stat_part + grade_part + win_part + achievement_part
}

/// Aggregate pedigree strength in [0, 100].
#[must_use]
pub fn pedigree_strength(
    sire: Option<&ParentRecord>,
    dam: Option<&ParentRecord>,
    cross_bred: bool,
    inbreeding: f64,
    generations: u8,
) -> u32 {
    let strengths: Vec<f64> = sire.into_iter().chain(dam).map(parent_strength).collect();
    if strengths.is_empty() {
        return 0;
    }

    let mut strength = strengths.iter().sum::<f64>() / strengths.len() as f64;
    if cross_bred {
        strength *= CROSS_BRED_BONUS;
    }
    strength *= 1.0 - inbreeding * 0.5;
    if generations >= MAX_GENERATIONS {
        strength *= FULL_DEPTH_BONUS;
    }
    strength.round().clamp(0.0, 100.0) as u32
}

fn lineage_label(sire: Option<&ParentRecord>, dam: Option<&ParentRecord>) -> String {
    match (sire, dam) {
        (Some(s), Some(d)) => format!("{} × {}", s.name, d.name),
        (Some(s), None) => format!("By {}", s.name),
        (None, Some(d)) => format!("Out of {}", d.name),
        (None, None) => FOUNDATION_LINEAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studbook_data::{CareerGrade, Stats};

    fn parent(name: &str, breed: &str, grade: CareerGrade) -> ParentRecord {
        ParentRecord {
            name: name.into(),
            breed: breed.into(),
            specialization: "sprinter".into(),
            racing_style: "front".into(),
            gender: "colt".into(),
            stats: Stats::new(60, 60, 60),
            achievements: Vec::new(),
            grade,
            races_won: 5,
            total_races: 10,
            pedigree: None,
            genetic_traits: Vec::new(),
            surface_preference: None,
            distance_preference: None,
        }
    }

    fn with_lines(mut p: ParentRecord, generations: u8, lines: &[&str]) -> ParentRecord {
        p.pedigree = Some(CompressedPedigree {
            sire: Some("Old Sire".into()),
            dam: Some("Old Dam".into()),
            generations,
            foundation_lines: lines.iter().map(|s| s.to_string()).collect(),
        });
        p
    }

    #[test]
    fn test_foundation_when_no_parents() {
        let p = Pedigree::from_parents(None, None, PedigreeOptions::default());
        assert_eq!(p.generations, 0);
        assert_eq!(p.lineage, FOUNDATION_LINEAGE);
        assert_eq!(p.pedigree_strength, 0);
    }

    #[test]
    fn test_generations_take_shallower_path() {
        let s = with_lines(parent("S", "Arabian", CareerGrade::A), 2, &[]);
        let d = parent("D", "Arabian", CareerGrade::B);
        assert_eq!(count_generations(Some(&s), Some(&d)), 1);

        let d = with_lines(d, 1, &[]);
        assert_eq!(count_generations(Some(&s), Some(&d)), 2);

        let s = with_lines(parent("S", "Arabian", CareerGrade::A), 3, &[]);
        let d = with_lines(parent("D", "Arabian", CareerGrade::B), 3, &[]);
        assert_eq!(count_generations(Some(&s), Some(&d)), MAX_GENERATIONS);
        assert_eq!(count_generations(Some(&s), None), 1);
    }

    #[test]
    fn test_shared_foundation_line_counts_once_per_extra() {
        let s = with_lines(parent("S", "Arabian", CareerGrade::A), 1, &["Root (Arabian)"]);
        let d = with_lines(parent("D", "Arabian", CareerGrade::B), 1, &["Root (Arabian)"]);
        assert!((inbreeding_coefficient(Some(&s), Some(&d)) - 0.125).abs() < 1e-9);
    }

    #[test]
    fn test_inbreeding_capped() {
        let lines = ["A (X)", "B (X)", "C (X)", "D (X)", "E (X)"];
        let s = with_lines(parent("S", "X", CareerGrade::A), 1, &lines);
        let d = with_lines(parent("D", "X", CareerGrade::B), 1, &lines);
        assert_eq!(inbreeding_coefficient(Some(&s), Some(&d)), MAX_INBREEDING);
    }

    #[test]
    fn test_foundation_lines_deduplicated_and_capped() {
        let s = with_lines(
            parent("S", "X", CareerGrade::A),
            1,
            &["A (X)", "B (X)", "C (X)", "D (X)"],
        );
        let d = with_lines(
            parent("D", "X", CareerGrade::B),
            1,
            &["A (X)", "E (X)", "F (X)", "G (X)", "H (X)"],
        );
        let lines = collect_foundation_lines(Some(&s), Some(&d));
        assert_eq!(lines.len(), MAX_FOUNDATION_LINES);
        assert_eq!(lines[0], "S (X)");
        assert_eq!(lines[1], "D (X)");
        let unique: HashSet<_> = lines.iter().collect();
        assert_eq!(unique.len(), lines.len());
    }

    #[test]
    fn test_parent_strength_components() {
        let mut p = parent("S", "X", CareerGrade::S);
        p.stats = Stats::new(100, 100, 100);
        p.races_won = 10;
        p.achievements = vec!["a".into(); 7];
        assert!((parent_strength(&p) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cross_bred_flag_and_bonus() {
        let s = parent("S", "Arabian", CareerGrade::B);
        let d = parent("D", "Thoroughbred", CareerGrade::B);
        let crossed = Pedigree::from_parents(Some(&s), Some(&d), PedigreeOptions::default());
        assert!(crossed.cross_bred);

        let d_same = parent("D", "Arabian", CareerGrade::B);
        let pure = Pedigree::from_parents(Some(&s), Some(&d_same), PedigreeOptions::default());
        assert!(!pure.cross_bred);
        assert!(crossed.pedigree_strength >= pure.pedigree_strength);
    }

    #[test]
    fn test_lineage_labels() {
        let s = parent("Storm", "X", CareerGrade::B);
        let d = parent("Breeze", "X", CareerGrade::B);
        let both = Pedigree::from_parents(Some(&s), Some(&d), PedigreeOptions::default());
        assert_eq!(both.lineage, "Storm × Breeze");
        let sire_only = Pedigree::from_parents(Some(&s), None, PedigreeOptions::default());
        assert_eq!(sire_only.lineage, "By Storm");
        assert_eq!(sire_only.generations, 1);
        let named = Pedigree::from_parents(
            None,
            Some(&d),
            PedigreeOptions {
                lineage: Some("Royal Line".into()),
                created: Some(5),
            },
        );
        assert_eq!(named.lineage, "Royal Line");
        assert_eq!(named.created, 5);
    }

    #[test]
    fn test_compress_keeps_one_level() {
        let s = with_lines(parent("S", "X", CareerGrade::B), 1, &["Root (X)"]);
        let d = parent("D", "X", CareerGrade::B);
        let pedigree = Pedigree::from_parents(Some(&s), Some(&d), PedigreeOptions::default());
        let compressed = pedigree.compress();
        assert_eq!(compressed.sire.as_deref(), Some("S"));
        assert_eq!(compressed.dam.as_deref(), Some("D"));
        assert_eq!(compressed.generations, pedigree.generations);
        assert!(compressed.foundation_lines.contains(&"Root (X)".to_string()));
    }
}
