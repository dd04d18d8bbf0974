use super::state::{App, AppError};
use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use studbook_core::{
    Customization, GeneratedHorse, GenerationRequest, GenerationType, PedigreeLogic,
};
use studbook_data::{BreedingAttempt, HorseProfile, Pedigree};

/// Everything produced by one breeding: the foal, its papers and the log entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoalReport {
    /// Ready to be raced and later passed to `retire`.
    pub profile: HorseProfile,
    pub generation: GeneratedHorse,
    /// Hex-encoded pedigree for sharing.
    pub certificate: String,
    pub attempt: BreedingAttempt,
}

impl App {
    /// Breeds two retired horses and persists the stable.
    ///
    /// The foal takes the sire's breed unless `breed` overrides it; its
    /// gender tag is a coin flip between colt and filly.
    pub fn breed_foal(
        &mut self,
        sire: &str,
        dam: &str,
        foal_name: &str,
        breed: Option<&str>,
        customization: &Customization,
        seed: Option<u64>,
    ) -> Result<FoalReport> {
        let sire_record = self
            .stable
            .get_horse(sire)
            .ok_or_else(|| AppError::HorseNotFound(sire.to_string()))?
            .clone();
        let dam_record = self
            .stable
            .get_horse(dam)
            .ok_or_else(|| AppError::HorseNotFound(dam.to_string()))?
            .clone();

        let pedigree = Pedigree::for_foal(&sire_record, &dam_record);
        let definition = self.breed(breed.unwrap_or(&sire_record.breed))?;

        let mut request = GenerationRequest::bred(definition, &pedigree);
        if !customization.is_empty() {
            request = request.with_customization(customization);
            request.kind = GenerationType::Customized;
        }

        let mut rng = Self::rng(seed);
        let generation = self.generator.generate_stats_with_rng(&request, &mut rng)?;
        let gender = if rng.gen_bool(0.5) { "colt" } else { "filly" };

        let profile = HorseProfile {
            name: foal_name.to_string(),
            gender: gender.to_string(),
            breed: definition.name.clone(),
            specialization: String::new(),
            racing_style: generation.attributes.style_aptitude.to_string(),
            stats: generation.stats,
            bond: 0.0,
            pedigree: pedigree.clone(),
            genetic_traits: Vec::new(),
            surface_preference: Some(generation.attributes.track_aptitude.preferred.to_string()),
            distance_preference: Some(generation.attributes.distance_aptitude.to_string()),
        };
        let certificate = studbook_io::issue_certificate(&pedigree)?;

        let attempt = self
            .stable
            .record_breeding(&sire_record, &dam_record, foal_name)?
            .clone();
        self.save()?;

        Ok(FoalReport {
            profile,
            generation,
            certificate,
            attempt,
        })
    }
}
