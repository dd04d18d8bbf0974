//! Retired-horse registry and breeding bookkeeping.
//!
//! A [`Stable`] keeps two name-keyed pools, one per breeding-eligible
//! gender, under a shared capacity. A name lives in at most one pool.
//! Mutators return [`StableRejection`] instead of panicking so the caller
//! can surface the reason to the player.

use crate::compatibility::{calculate_breeding_compatibility, CompatibilityReport};
use crate::config::StableConfig;
use crate::error::StableRejection;
use crate::gender::{GenderMaturity, StandardMaturity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use studbook_data::{
    BreedingAttempt, CareerGrade, CareerStats, HorseProfile, MatureGender, PoolEntry,
    RetiredHorseRecord, StablePreferences, StableSnapshot, StableStatistics,
    DEFAULT_STABLE_CAPACITY,
};
use uuid::Uuid;

/// Optional filters for pool listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreedingFilters {
    pub breed: Option<String>,
    pub specialization: Option<String>,
    pub min_grade: Option<CareerGrade>,
    pub max_inbreeding: Option<f64>,
}

impl BreedingFilters {
    fn matches(&self, record: &RetiredHorseRecord) -> bool {
        if let Some(breed) = &self.breed {
            if !record.breed.eq_ignore_ascii_case(breed) {
                return false;
            }
        }
        if let Some(spec) = &self.specialization {
            if !record.specialization.eq_ignore_ascii_case(spec) {
                return false;
            }
        }
        if let Some(min) = self.min_grade {
            if record.grade < min {
                return false;
            }
        }
        if let Some(max) = self.max_inbreeding {
            if record.pedigree.inbreeding_coefficient > max {
                return false;
            }
        }
        true
    }
}

/// A ranked mate suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingRecommendation {
    pub name: String,
    pub breed: String,
    pub grade: CareerGrade,
    pub compatibility: CompatibilityReport,
}

/// Overview of a stable for status screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StableSummary {
    pub total_horses: usize,
    pub stallions: usize,
    pub mares: usize,
    pub capacity: u32,
    pub breed_distribution: BTreeMap<String, u32>,
    pub average_grade_value: f64,
    pub top_stallion: Option<String>,
    pub top_mare: Option<String>,
    pub statistics: StableStatistics,
}

pub struct Stable {
    stallions: HashMap<String, RetiredHorseRecord>,
    mares: HashMap<String, RetiredHorseRecord>,
    breedings: Vec<BreedingAttempt>,
    capacity: u32,
    founded: i64,
    statistics: StableStatistics,
    preferences: StablePreferences,
    maturity: Arc<dyn GenderMaturity + Send + Sync>,
}

impl fmt::Debug for Stable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stable")
            .field("stallions", &self.stallions.len())
            .field("mares", &self.mares.len())
            .field("breedings", &self.breedings.len())
            .field("capacity", &self.capacity)
            .field("statistics", &self.statistics)
            .field("preferences", &self.preferences)
            .finish()
    }
}

impl Default for Stable {
    fn default() -> Self {
        Self::new(&StableConfig::default())
    }
}

impl Stable {
    /// Empty stable using the standard gender table.
    #[must_use]
    pub fn new(config: &StableConfig) -> Self {
        Self {
            stallions: HashMap::new(),
            mares: HashMap::new(),
            breedings: Vec::new(),
            capacity: config.capacity,
            founded: chrono::Utc::now().timestamp_millis(),
            statistics: StableStatistics::default(),
            preferences: config.preferences(),
            maturity: Arc::new(StandardMaturity),
        }
    }

    /// Replaces the gender-maturity capability.
    #[must_use]
    pub fn with_maturity<G>(mut self, maturity: G) -> Self
    where
        G: GenderMaturity + Send + Sync + 'static,
    {
        self.maturity = Arc::new(maturity);
        self
    }

    /// Checks every retirement rule without touching the pools.
    ///
    /// Returns the pool the horse would join.
    pub fn can_retire(
        &self,
        horse: &HorseProfile,
        career: &CareerStats,
    ) -> Result<MatureGender, StableRejection> {
        if self.contains(&horse.name) {
            return Err(StableRejection::AlreadyRetired(horse.name.clone()));
        }
        if career.grade < self.preferences.min_grade {
            return Err(StableRejection::GradeBelowMinimum {
                name: horse.name.clone(),
                grade: career.grade,
                required: self.preferences.min_grade,
            });
        }
        if career.total_races < self.preferences.min_races {
            return Err(StableRejection::NotEnoughRaces {
                name: horse.name.clone(),
                races: career.total_races,
                required: self.preferences.min_races,
            });
        }
        if self.is_full() {
            return Err(StableRejection::AtCapacity(self.capacity));
        }
        self.maturity
            .mature_gender(&horse.gender)
            .ok_or_else(|| StableRejection::UnrecognizedGender {
                name: horse.name.clone(),
                gender: horse.gender.clone(),
            })
    }

    /// Moves a horse that finished its career into the breeding pools.
    pub fn retire_horse(
        &mut self,
        horse: &HorseProfile,
        career: &CareerStats,
    ) -> Result<&RetiredHorseRecord, StableRejection> {
        let gender = match self.can_retire(horse, career) {
            Ok(gender) => gender,
            Err(rejection) => {
                tracing::warn!(horse = %horse.name, reason = %rejection, "Retirement rejected");
                return Err(rejection);
            }
        };

        let record = build_record(horse, career, gender);
        self.statistics.total_retired += 1;
        if record.pedigree.is_foundation() {
            self.statistics.foundation_horses += 1;
        }

        tracing::info!(
            horse = %record.name,
            pool = %gender,
            grade = %record.grade,
            generation = record.stable_generation,
            "Horse retired to stable"
        );

        let pool = self.pool_mut(gender);
        Ok(pool.entry(record.name.clone()).or_insert(record))
    }

    /// Stallions matching `filters`, most desirable first.
    #[must_use]
    pub fn get_available_stallions(&self, filters: &BreedingFilters) -> Vec<&RetiredHorseRecord> {
        filtered_pool(&self.stallions, filters)
    }

    /// Mares matching `filters`, most desirable first.
    #[must_use]
    pub fn get_available_mares(&self, filters: &BreedingFilters) -> Vec<&RetiredHorseRecord> {
        filtered_pool(&self.mares, filters)
    }

    /// Best opposite-sex partners for `target`, highest score first.
    #[must_use]
    pub fn get_breeding_recommendations(
        &self,
        target: &RetiredHorseRecord,
        max_suggestions: usize,
    ) -> Vec<BreedingRecommendation> {
        let candidates = self.pool(target.gender.opposite());
        let mut recommendations: Vec<BreedingRecommendation> = candidates
            .values()
            .filter(|c| c.name != target.name)
            .map(|c| BreedingRecommendation {
                name: c.name.clone(),
                breed: c.breed.clone(),
                grade: c.grade,
                compatibility: calculate_breeding_compatibility(target, c),
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.compatibility
                .overall
                .total_cmp(&a.compatibility.overall)
                .then_with(|| a.name.cmp(&b.name))
        });
        recommendations.truncate(max_suggestions);
        recommendations
    }

    /// Logs a breeding and updates both parents' usage.
    ///
    /// The predicted grade comes from the parents' own grades. Usage counters
    /// are only bumped for a parent currently held in its pool.
    pub fn record_breeding(
        &mut self,
        sire: &RetiredHorseRecord,
        dam: &RetiredHorseRecord,
        offspring: &str,
    ) -> Result<&BreedingAttempt, StableRejection> {
        validate_pair(&sire.name, &dam.name, offspring)?;
        if sire.gender != MatureGender::Stallion || self.mares.contains_key(&sire.name) {
            return Err(StableRejection::InvalidPair(format!(
                "{} is not a stallion",
                sire.name
            )));
        }
        if dam.gender != MatureGender::Mare || self.stallions.contains_key(&dam.name) {
            return Err(StableRejection::InvalidPair(format!(
                "{} is not a mare",
                dam.name
            )));
        }

        let predicted_grade =
            CareerGrade::from_value(f64::from(sire.grade.value() + dam.grade.value()) / 2.0);

        for record in [
            self.stallions.get_mut(&sire.name),
            self.mares.get_mut(&dam.name),
        ]
        .into_iter()
        .flatten()
        {
            record.breeding.times_used += 1;
            record.breeding.offspring.push(offspring.to_string());
        }
        self.statistics.total_offspring += 1;

        let attempt = BreedingAttempt {
            id: Uuid::new_v4().to_string(),
            sire: sire.name.clone(),
            dam: dam.name.clone(),
            offspring: offspring.to_string(),
            predicted_grade,
            actual_grade: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        tracing::info!(
            sire = %sire.name,
            dam = %dam.name,
            offspring,
            predicted = %predicted_grade,
            "Breeding recorded"
        );
        self.breedings.push(attempt);
        Ok(&self.breedings[self.breedings.len() - 1])
    }

    /// Career-completion hook: stores the foal's real grade.
    ///
    /// Grade B or better counts as a successful offspring for both parents,
    /// grade S additionally as a champion.
    pub fn record_offspring_result(
        &mut self,
        offspring: &str,
        grade: CareerGrade,
    ) -> Result<(), StableRejection> {
        let attempt = self
            .breedings
            .iter_mut()
            .rev()
            .find(|a| a.offspring == offspring && a.actual_grade.is_none())
            .ok_or_else(|| StableRejection::UnknownHorse(offspring.to_string()))?;
        attempt.actual_grade = Some(grade);
        let (sire, dam) = (attempt.sire.clone(), attempt.dam.clone());

        let successful = grade >= CareerGrade::B;
        let champion = grade == CareerGrade::S;
        if successful {
            self.statistics.successful_breedings += 1;
        }
        if champion {
            self.statistics.champion_offspring += 1;
        }
        for record in [self.stallions.get_mut(&sire), self.mares.get_mut(&dam)]
            .into_iter()
            .flatten()
        {
            if successful {
                record.breeding.successful_offspring += 1;
            }
            if champion {
                record.breeding.champion_offspring += 1;
            }
        }

        tracing::info!(offspring, grade = %grade, "Offspring result recorded");
        Ok(())
    }

    #[must_use]
    pub fn get_horse(&self, name: &str) -> Option<&RetiredHorseRecord> {
        self.stallions.get(name).or_else(|| self.mares.get(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.stallions.contains_key(name) || self.mares.contains_key(name)
    }

    /// Removes a horse from its pool. Statistics are history and stay as-is.
    pub fn remove_horse(&mut self, name: &str) -> Result<RetiredHorseRecord, StableRejection> {
        self.stallions
            .remove(name)
            .or_else(|| self.mares.remove(name))
            .ok_or_else(|| StableRejection::UnknownHorse(name.to_string()))
    }

    #[must_use]
    pub fn total_horses(&self) -> usize {
        self.stallions.len() + self.mares.len()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.total_horses() >= self.capacity as usize
    }

    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[must_use]
    pub fn founded(&self) -> i64 {
        self.founded
    }

    #[must_use]
    pub fn statistics(&self) -> &StableStatistics {
        &self.statistics
    }

    #[must_use]
    pub fn preferences(&self) -> &StablePreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: StablePreferences) {
        self.preferences = preferences;
    }

    #[must_use]
    pub fn breedings(&self) -> &[BreedingAttempt] {
        &self.breedings
    }

    #[must_use]
    pub fn summary(&self) -> StableSummary {
        let mut breed_distribution = BTreeMap::new();
        let mut grade_total = 0u32;
        for record in self.stallions.values().chain(self.mares.values()) {
            *breed_distribution.entry(record.breed.clone()).or_insert(0) += 1;
            grade_total += u32::from(record.grade.value());
        }
        let total_horses = self.total_horses();
        let average_grade_value = if total_horses == 0 {
            0.0
        } else {
            f64::from(grade_total) / total_horses as f64
        };

        let all = BreedingFilters::default();
        StableSummary {
            total_horses,
            stallions: self.stallions.len(),
            mares: self.mares.len(),
            capacity: self.capacity,
            breed_distribution,
            average_grade_value,
            top_stallion: self
                .get_available_stallions(&all)
                .first()
                .map(|r| r.name.clone()),
            top_mare: self.get_available_mares(&all).first().map(|r| r.name.clone()),
            statistics: self.statistics.clone(),
        }
    }

    /// Persisted shape; pool entries are sorted by name.
    #[must_use]
    pub fn to_snapshot(&self) -> StableSnapshot {
        StableSnapshot {
            stallions: sorted_entries(&self.stallions),
            mares: sorted_entries(&self.mares),
            breedings: self.breedings.clone(),
            capacity: self.capacity,
            founded: self.founded,
            statistics: self.statistics.clone(),
            preferences: self.preferences.clone(),
        }
    }

    /// Rebuilds a stable from its persisted shape.
    ///
    /// A name listed in both pools is kept as a stallion only. Capacity is
    /// raised to the number of horses held when the save lists more.
    #[must_use]
    pub fn from_snapshot(snapshot: StableSnapshot) -> Self {
        let mut capacity = if snapshot.capacity == 0 {
            DEFAULT_STABLE_CAPACITY
        } else {
            snapshot.capacity
        };
        let stallions: HashMap<String, RetiredHorseRecord> = snapshot
            .stallions
            .into_iter()
            .map(|PoolEntry(name, record)| (name, record))
            .collect();
        let mut mares = HashMap::new();
        for PoolEntry(name, record) in snapshot.mares {
            if stallions.contains_key(&name) {
                tracing::warn!(horse = %name, "Horse listed in both pools; keeping stallion entry");
                continue;
            }
            mares.insert(name, record);
        }

        let held = u32::try_from(stallions.len() + mares.len()).unwrap_or(u32::MAX);
        if held > capacity {
            tracing::warn!(held, capacity, "Saved stable holds more horses than its capacity");
            capacity = held;
        }

        Self {
            stallions,
            mares,
            breedings: snapshot.breedings,
            capacity,
            founded: snapshot.founded,
            statistics: snapshot.statistics,
            preferences: snapshot.preferences,
            maturity: Arc::new(StandardMaturity),
        }
    }

    fn pool(&self, gender: MatureGender) -> &HashMap<String, RetiredHorseRecord> {
        match gender {
            MatureGender::Stallion => &self.stallions,
            MatureGender::Mare => &self.mares,
        }
    }

    fn pool_mut(&mut self, gender: MatureGender) -> &mut HashMap<String, RetiredHorseRecord> {
        match gender {
            MatureGender::Stallion => &mut self.stallions,
            MatureGender::Mare => &mut self.mares,
        }
    }
}

fn build_record(
    horse: &HorseProfile,
    career: &CareerStats,
    gender: MatureGender,
) -> RetiredHorseRecord {
    let stable_generation = if horse.pedigree.is_foundation() {
        1
    } else {
        horse.pedigree.generations.saturating_add(1)
    };
    RetiredHorseRecord {
        name: horse.name.clone(),
        original_gender: horse.gender.clone(),
        gender,
        breed: horse.breed.clone(),
        specialization: horse.specialization.clone(),
        racing_style: horse.racing_style.clone(),
        stats: horse.stats,
        bond: horse.bond,
        grade: career.grade,
        races_won: career.races_won,
        total_races: career.total_races,
        win_rate: career.win_rate() * 100.0,
        achievements: career.achievements.clone(),
        pedigree: horse.pedigree.clone(),
        breeding: Default::default(),
        genetic_traits: horse.genetic_traits.clone(),
        surface_preference: horse.surface_preference.clone(),
        distance_preference: horse.distance_preference.clone(),
        retired_at: chrono::Utc::now().timestamp_millis(),
        retirement_turn: career.retirement_turn.unwrap_or(0),
        stable_generation,
    }
}

fn validate_pair(sire: &str, dam: &str, offspring: &str) -> Result<(), StableRejection> {
    if sire.trim().is_empty() || dam.trim().is_empty() || offspring.trim().is_empty() {
        return Err(StableRejection::InvalidPair(
            "sire, dam and offspring must all be named".to_string(),
        ));
    }
    if sire == dam {
        return Err(StableRejection::InvalidPair(format!(
            "{sire} cannot be bred with itself"
        )));
    }
    if offspring == sire || offspring == dam {
        return Err(StableRejection::InvalidPair(format!(
            "offspring {offspring} cannot share a parent's name"
        )));
    }
    Ok(())
}

fn filtered_pool<'a>(
    pool: &'a HashMap<String, RetiredHorseRecord>,
    filters: &BreedingFilters,
) -> Vec<&'a RetiredHorseRecord> {
    let mut list: Vec<&RetiredHorseRecord> =
        pool.values().filter(|r| filters.matches(r)).collect();
    list.sort_by(|a, b| {
        b.breeding_desirability()
            .total_cmp(&a.breeding_desirability())
            .then_with(|| a.name.cmp(&b.name))
    });
    list
}

fn sorted_entries(pool: &HashMap<String, RetiredHorseRecord>) -> Vec<PoolEntry> {
    let mut entries: Vec<PoolEntry> = pool
        .iter()
        .map(|(name, record)| PoolEntry(name.clone(), record.clone()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}
