pub mod macros;

use studbook_core::{ParentRecordLogic, PedigreeLogic, PedigreeOptions, Stable, StableConfig};
use studbook_data::{
    CareerGrade, CareerStats, HorseProfile, MatureGender, ParentRecord, Pedigree,
    RetiredHorseRecord, Stats,
};

#[allow(dead_code)]
pub struct HorseBuilder {
    profile: HorseProfile,
    career: CareerStats,
}

#[allow(dead_code)]
impl HorseBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            profile: HorseProfile {
                name: name.to_string(),
                gender: "colt".to_string(),
                breed: "Thoroughbred".to_string(),
                specialization: String::new(),
                racing_style: String::new(),
                stats: Stats::new(50, 50, 50),
                bond: 50.0,
                pedigree: Pedigree::foundation(0),
                genetic_traits: Vec::new(),
                surface_preference: None,
                distance_preference: None,
            },
            career: CareerStats {
                grade: CareerGrade::B,
                races_won: 4,
                total_races: 10,
                achievements: Vec::new(),
                retirement_turn: None,
            },
        }
    }

    pub fn filly(mut self) -> Self {
        self.profile.gender = "filly".to_string();
        self
    }

    pub fn gender(mut self, tag: &str) -> Self {
        self.profile.gender = tag.to_string();
        self
    }

    pub fn breed(mut self, breed: &str) -> Self {
        self.profile.breed = breed.to_string();
        self
    }

    pub fn specialization(mut self, specialization: &str) -> Self {
        self.profile.specialization = specialization.to_string();
        self
    }

    pub fn stats(mut self, speed: i32, stamina: i32, power: i32) -> Self {
        self.profile.stats = Stats::new(speed, stamina, power);
        self
    }

    pub fn grade(mut self, grade: CareerGrade) -> Self {
        self.career.grade = grade;
        self
    }

    pub fn record(mut self, won: u32, total: u32) -> Self {
        self.career.races_won = won;
        self.career.total_races = total;
        self
    }

    pub fn achievement(mut self, achievement: &str) -> Self {
        self.career.achievements.push(achievement.to_string());
        self
    }

    pub fn pedigree(mut self, pedigree: Pedigree) -> Self {
        self.profile.pedigree = pedigree;
        self
    }

    /// Gives the horse a sire (and dam) by name only, as a bred horse would carry.
    pub fn parents(mut self, sire: &str, dam: &str) -> Self {
        let sire = parent(sire, &self.profile.breed, CareerGrade::B);
        let dam = parent(dam, &self.profile.breed, CareerGrade::B);
        self.profile.pedigree = Pedigree::from_parents(
            Some(&sire),
            Some(&dam),
            PedigreeOptions {
                created: Some(0),
                ..Default::default()
            },
        );
        self
    }

    pub fn build(self) -> (HorseProfile, CareerStats) {
        (self.profile, self.career)
    }

    /// Retires the horse into a throwaway, unrestricted stable and returns
    /// its record.
    pub fn retired(self) -> RetiredHorseRecord {
        let (profile, career) = self.build();
        let mut stable = Stable::new(&StableConfig {
            min_grade: CareerGrade::F,
            min_races: 0,
            ..Default::default()
        });
        stable
            .retire_horse(&profile, &career)
            .expect("builder horse should have a breeding-eligible gender")
            .clone()
    }
}

#[allow(dead_code)]
pub fn parent(name: &str, breed: &str, grade: CareerGrade) -> ParentRecord {
    let (profile, mut career) = HorseBuilder::new(name).breed(breed).build();
    career.grade = grade;
    ParentRecord::from_profile(&profile, &career)
}

#[allow(dead_code)]
pub struct StableBuilder {
    config: StableConfig,
    horses: Vec<(HorseProfile, CareerStats)>,
}

#[allow(dead_code)]
impl StableBuilder {
    pub fn new() -> Self {
        Self {
            config: StableConfig::default(),
            horses: Vec::new(),
        }
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn with_horse(mut self, horse: HorseBuilder) -> Self {
        self.horses.push(horse.build());
        self
    }

    pub fn build(self) -> Stable {
        let mut stable = Stable::new(&self.config);
        for (profile, career) in &self.horses {
            stable
                .retire_horse(profile, career)
                .expect("builder horse should be accepted");
        }
        stable
    }
}

#[allow(dead_code)]
pub fn pool_of(stable: &Stable, name: &str) -> Option<MatureGender> {
    stable.get_horse(name).map(|r| r.gender)
}
