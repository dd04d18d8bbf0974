use super::state::{App, AppError};
use anyhow::Result;
use serde::Serialize;
use studbook_core::{
    BreedingFilters, BreedingRecommendation, Customization, GeneratedHorse, GenerationRequest,
    GenerationType, StableSummary,
};
use std::path::Path;
use studbook_data::{CareerGrade, CareerStats, HorseProfile, Pedigree, RetiredHorseRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PoolSide {
    Stallions,
    Mares,
}

/// A foundation or customized horse with no parents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub breed: String,
    #[serde(flatten)]
    pub horse: GeneratedHorse,
}

impl App {
    pub fn generate(
        &self,
        breed: &str,
        kind: GenerationType,
        customization: &Customization,
        seed: Option<u64>,
    ) -> Result<GeneratedReport> {
        let definition = self.breed(breed)?;
        let mut request = GenerationRequest::foundation(definition);
        request.kind = kind;
        if !customization.is_empty() {
            request = request.with_customization(customization);
        }
        let horse = self
            .generator
            .generate_stats_with_rng(&request, &mut Self::rng(seed))?;
        Ok(GeneratedReport {
            breed: definition.name.clone(),
            horse,
        })
    }

    /// Retires a horse and persists the stable.
    pub fn retire(&mut self, horse: &HorseProfile, career: &CareerStats) -> Result<RetiredHorseRecord> {
        let record = self.stable.retire_horse(horse, career)?.clone();
        self.save()?;
        Ok(record)
    }

    pub fn pool(&self, side: PoolSide, filters: &BreedingFilters) -> Vec<RetiredHorseRecord> {
        let records = match side {
            PoolSide::Stallions => self.stable.get_available_stallions(filters),
            PoolSide::Mares => self.stable.get_available_mares(filters),
        };
        records.into_iter().cloned().collect()
    }

    pub fn recommend(&self, name: &str, max: usize) -> Result<Vec<BreedingRecommendation>> {
        let target = self
            .stable
            .get_horse(name)
            .ok_or_else(|| AppError::HorseNotFound(name.to_string()))?;
        Ok(self.stable.get_breeding_recommendations(target, max))
    }

    /// Stores a finished foal's grade and persists the stable.
    pub fn record_result(&mut self, offspring: &str, grade: CareerGrade) -> Result<()> {
        self.stable.record_offspring_result(offspring, grade)?;
        self.save()
    }

    pub fn inspect(&self) -> StableSummary {
        self.stable.summary()
    }

    /// Hex certificate of a retired horse's pedigree.
    pub fn certificate(&self, name: &str) -> Result<String> {
        let record = self
            .stable
            .get_horse(name)
            .ok_or_else(|| AppError::HorseNotFound(name.to_string()))?;
        Ok(studbook_io::issue_certificate(&record.pedigree)?)
    }

    pub fn read_certificate(&self, token: &str) -> Result<Pedigree> {
        Ok(studbook_io::read_certificate(token)?)
    }

    pub fn backup(&self, path: &Path) -> Result<()> {
        studbook_io::backup_stable(&self.stable, path)?;
        Ok(())
    }

    /// Replaces the working stable with a backup and persists it.
    pub fn restore(&mut self, path: &Path) -> Result<StableSummary> {
        self.stable = studbook_io::restore_stable(path)?;
        self.save()?;
        Ok(self.stable.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studbook_core::{EngineConfig, Stable};

    fn app() -> App {
        let config = EngineConfig::default();
        let stable = Stable::new(&config.stable);
        App::with_parts(config, stable, std::env::temp_dir().join("studbook-unused.json"))
    }

    #[test]
    fn test_generate_is_reproducible_with_seed() {
        let app = app();
        let custom = Customization::default();
        let a = app
            .generate("thoroughbred", GenerationType::Foundation, &custom, Some(5))
            .unwrap();
        let b = app
            .generate("Thoroughbred", GenerationType::Foundation, &custom, Some(5))
            .unwrap();
        assert_eq!(a.horse.stats, b.horse.stats);
        assert_eq!(a.breed, "Thoroughbred");
    }

    #[test]
    fn test_unknown_breed_lists_known_names() {
        let err = app()
            .generate("Pegasus", GenerationType::Foundation, &Customization::default(), None)
            .unwrap_err();
        assert!(err.to_string().contains("Arabian"));
    }

    #[test]
    fn test_recommend_unknown_horse() {
        let err = app().recommend("Nobody", 3).unwrap_err();
        assert!(err.to_string().contains("Nobody"));
    }
}
