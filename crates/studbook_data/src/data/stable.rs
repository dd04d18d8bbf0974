use super::horse::{CareerGrade, MatureGender, Stats};
use super::pedigree::Pedigree;
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// Default combined capacity of the stallion and mare pools.
pub const DEFAULT_STABLE_CAPACITY: u32 = 20;

/// Usage history of a horse kept for breeding.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase", default)]
pub struct BreedingRecord {
    pub times_used: u32,
    pub offspring: Vec<String>,
    pub successful_offspring: u32,
    pub champion_offspring: u32,
}

/// Compressed performance and pedigree record of a retired horse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase")]
pub struct RetiredHorseRecord {
    pub name: String,
    pub original_gender: String,
    pub gender: MatureGender,
    pub breed: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub racing_style: String,
    pub stats: Stats,
    #[serde(default)]
    pub bond: f64,
    pub grade: CareerGrade,
    #[serde(default)]
    pub races_won: u32,
    #[serde(default)]
    pub total_races: u32,
    /// Win rate in percent, 0-100.
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub pedigree: Pedigree,
    #[serde(default)]
    pub breeding: BreedingRecord,
    #[serde(default)]
    pub genetic_traits: Vec<String>,
    #[serde(default)]
    pub surface_preference: Option<String>,
    #[serde(default)]
    pub distance_preference: Option<String>,
    /// Retirement time in epoch milliseconds.
    #[serde(default)]
    pub retired_at: i64,
    #[serde(default)]
    pub retirement_turn: u32,
    /// 1 for foundation horses, otherwise pedigree generations + 1.
    #[serde(default = "default_stable_generation")]
    pub stable_generation: u8,
}

fn default_stable_generation() -> u8 {
    1
}

impl RetiredHorseRecord {
    /// Sort key for pool listings: grade value plus a tenth of the win rate.
    #[must_use]
    pub fn breeding_desirability(&self) -> f64 {
        f64::from(self.grade.value()) + self.win_rate / 10.0
    }
}

/// One logged breeding between a sire and a dam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase")]
pub struct BreedingAttempt {
    pub id: String,
    pub sire: String,
    pub dam: String,
    pub offspring: String,
    pub predicted_grade: CareerGrade,
    #[serde(default)]
    pub actual_grade: Option<CareerGrade>,
    #[serde(default)]
    pub timestamp: i64,
}

/// Aggregate counters kept over the life of a stable.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase", default)]
pub struct StableStatistics {
    pub total_retired: u32,
    pub total_offspring: u32,
    pub champion_offspring: u32,
    pub foundation_horses: u32,
    pub successful_breedings: u32,
}

/// Retirement eligibility thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase", default)]
pub struct StablePreferences {
    pub min_grade: CareerGrade,
    pub min_races: u32,
}

impl Default for StablePreferences {
    fn default() -> Self {
        Self {
            min_grade: CareerGrade::D,
            min_races: 3,
        }
    }
}

/// A `[name, record]` pair as stored in the persisted pool lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
pub struct PoolEntry(pub String, pub RetiredHorseRecord);

/// Persisted shape of a stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase")]
pub struct StableSnapshot {
    #[serde(default)]
    pub stallions: Vec<PoolEntry>,
    #[serde(default)]
    pub mares: Vec<PoolEntry>,
    #[serde(default)]
    pub breedings: Vec<BreedingAttempt>,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub founded: i64,
    #[serde(default)]
    pub statistics: StableStatistics,
    #[serde(default)]
    pub preferences: StablePreferences,
}

fn default_capacity() -> u32 {
    DEFAULT_STABLE_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_statistics_merge_over_defaults() {
        let snapshot: StableSnapshot =
            serde_json::from_str(r#"{"statistics": {"totalRetired": 4}, "preferences": {"minRaces": 1}}"#)
                .unwrap();
        assert_eq!(snapshot.capacity, DEFAULT_STABLE_CAPACITY);
        assert_eq!(snapshot.statistics.total_retired, 4);
        assert_eq!(snapshot.statistics.total_offspring, 0);
        assert_eq!(snapshot.preferences.min_races, 1);
        assert_eq!(snapshot.preferences.min_grade, CareerGrade::D);
    }

    #[test]
    fn test_pool_entry_serializes_as_pair() {
        let json = r#"{"stallions": [["Thunder", {
            "name": "Thunder", "originalGender": "colt", "gender": "Stallion",
            "breed": "Thoroughbred", "stats": {"speed": 70, "stamina": 60, "power": 65},
            "grade": "A"
        }]]}"#;
        let snapshot: StableSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.stallions.len(), 1);
        assert_eq!(snapshot.stallions[0].0, "Thunder");
        assert_eq!(snapshot.stallions[0].1.stable_generation, 1);

        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value["stallions"][0].is_array());
    }
}
