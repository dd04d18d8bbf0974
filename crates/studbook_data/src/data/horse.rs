use super::pedigree::Pedigree;
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three racing attributes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
#[archive_attr(derive(Debug, PartialEq, Eq, Hash))]
#[serde(rename_all = "lowercase")]
pub enum StatName {
    /// Top speed.
    Speed,
    /// Endurance over distance.
    Stamina,
    /// Acceleration and push.
    Power,
}

impl StatName {
    pub const ALL: [StatName; 3] = [StatName::Speed, StatName::Stamina, StatName::Power];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatName::Speed => "speed",
            StatName::Stamina => "stamina",
            StatName::Power => "power",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speed, stamina and power of a horse, conventionally 0-100 each.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub struct Stats {
    pub speed: i32,
    pub stamina: i32,
    pub power: i32,
}

impl Stats {
    #[must_use]
    pub fn new(speed: i32, stamina: i32, power: i32) -> Self {
        Self {
            speed,
            stamina,
            power,
        }
    }

    #[must_use]
    pub fn get(&self, stat: StatName) -> i32 {
        match stat {
            StatName::Speed => self.speed,
            StatName::Stamina => self.stamina,
            StatName::Power => self.power,
        }
    }

    pub fn set(&mut self, stat: StatName, value: i32) {
        match stat {
            StatName::Speed => self.speed = value,
            StatName::Stamina => self.stamina = value,
            StatName::Power => self.power = value,
        }
    }

    #[must_use]
    pub fn total(&self) -> i32 {
        self.speed + self.stamina + self.power
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        f64::from(self.total()) / 3.0
    }
}

/// Final career grade awarded when a horse stops racing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
#[archive_attr(derive(Debug, PartialEq, Eq))]
pub enum CareerGrade {
    F,
    D,
    C,
    B,
    A,
    S,
}

impl CareerGrade {
    /// Grade on the 1-6 scale used by desirability and compatibility scoring.
    #[must_use]
    pub fn value(self) -> u8 {
        match self {
            CareerGrade::S => 6,
            CareerGrade::A => 5,
            CareerGrade::B => 4,
            CareerGrade::C => 3,
            CareerGrade::D => 2,
            CareerGrade::F => 1,
        }
    }

    /// Contribution of the grade to a parent's pedigree strength (max 30).
    #[must_use]
    pub fn pedigree_score(self) -> f64 {
        match self {
            CareerGrade::S => 30.0,
            CareerGrade::A => 25.0,
            CareerGrade::B => 20.0,
            CareerGrade::C => 15.0,
            CareerGrade::D => 10.0,
            CareerGrade::F => 5.0,
        }
    }

    /// Maps a (possibly averaged) grade value back onto a grade.
    ///
    /// The value is rounded and looked up in a 7-bucket table where both 0
    /// and 1 land on `F`.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        const BUCKETS: [CareerGrade; 7] = [
            CareerGrade::F,
            CareerGrade::F,
            CareerGrade::D,
            CareerGrade::C,
            CareerGrade::B,
            CareerGrade::A,
            CareerGrade::S,
        ];
        if !value.is_finite() {
            return CareerGrade::F;
        }
        let idx = value.round().clamp(0.0, 6.0) as usize;
        BUCKETS[idx]
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CareerGrade::S => "S",
            CareerGrade::A => "A",
            CareerGrade::B => "B",
            CareerGrade::C => "C",
            CareerGrade::D => "D",
            CareerGrade::F => "F",
        }
    }
}

impl fmt::Display for CareerGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareerGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(CareerGrade::S),
            "A" => Ok(CareerGrade::A),
            "B" => Ok(CareerGrade::B),
            "C" => Ok(CareerGrade::C),
            "D" => Ok(CareerGrade::D),
            "F" => Ok(CareerGrade::F),
            other => Err(format!("unknown career grade '{other}'")),
        }
    }
}

/// Breeding-eligible category of a retired horse.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
#[archive_attr(derive(Debug, PartialEq, Eq))]
pub enum MatureGender {
    Stallion,
    Mare,
}

impl MatureGender {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            MatureGender::Stallion => MatureGender::Mare,
            MatureGender::Mare => MatureGender::Stallion,
        }
    }
}

impl fmt::Display for MatureGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatureGender::Stallion => f.write_str("stallion"),
            MatureGender::Mare => f.write_str("mare"),
        }
    }
}

/// Career summary submitted alongside a horse at retirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStats {
    pub grade: CareerGrade,
    pub races_won: u32,
    pub total_races: u32,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub retirement_turn: Option<u32>,
}

impl CareerStats {
    /// Win rate as a fraction in [0, 1].
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_races == 0 {
            0.0
        } else {
            f64::from(self.races_won.min(self.total_races)) / f64::from(self.total_races)
        }
    }
}

/// An active horse as the orchestration layer hands it to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseProfile {
    pub name: String,
    /// Raw gender tag ("colt", "filly", ...); see `GenderMaturity`.
    pub gender: String,
    pub breed: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub racing_style: String,
    pub stats: Stats,
    /// Trainer affinity, 0-100.
    #[serde(default)]
    pub bond: f64,
    #[serde(default)]
    pub pedigree: Pedigree,
    #[serde(default)]
    pub genetic_traits: Vec<String>,
    #[serde(default)]
    pub surface_preference: Option<String>,
    #[serde(default)]
    pub distance_preference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_value_scale() {
        assert_eq!(CareerGrade::S.value(), 6);
        assert_eq!(CareerGrade::F.value(), 1);
        assert!(CareerGrade::A > CareerGrade::B);
    }

    #[test]
    fn test_grade_from_value_buckets() {
        assert_eq!(CareerGrade::from_value(0.0), CareerGrade::F);
        assert_eq!(CareerGrade::from_value(1.2), CareerGrade::F);
        assert_eq!(CareerGrade::from_value(4.5), CareerGrade::A);
        assert_eq!(CareerGrade::from_value(4.4), CareerGrade::B);
        assert_eq!(CareerGrade::from_value(9.0), CareerGrade::S);
        assert_eq!(CareerGrade::from_value(f64::NAN), CareerGrade::F);
    }

    #[test]
    fn test_grade_parse() {
        assert_eq!("a".parse::<CareerGrade>(), Ok(CareerGrade::A));
        assert!("Z".parse::<CareerGrade>().is_err());
    }

    #[test]
    fn test_win_rate_without_races() {
        let career = CareerStats {
            grade: CareerGrade::C,
            races_won: 0,
            total_races: 0,
            achievements: Vec::new(),
            retirement_turn: None,
        };
        assert_eq!(career.win_rate(), 0.0);
    }

    #[test]
    fn test_stats_accessors() {
        let mut stats = Stats::new(60, 50, 40);
        stats.set(StatName::Power, 70);
        assert_eq!(stats.get(StatName::Power), 70);
        assert_eq!(stats.total(), 180);
        assert!((stats.average() - 60.0).abs() < f64::EPSILON);
    }
}
