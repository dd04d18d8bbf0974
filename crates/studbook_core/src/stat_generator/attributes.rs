//! Secondary attributes derived from final stats.

use super::customization::{DistanceFocus, Strategy};
use crate::breed::{BreedProfile, Surface};
use serde::{Deserialize, Serialize};
use studbook_data::{Pedigree, StatName, Stats};

/// Difference between stamina and speed that separates distance bands.
const DISTANCE_MARGIN: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackAptitude {
    pub turf: f64,
    pub dirt: f64,
    pub preferred: Surface,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryAttributes {
    pub track_aptitude: TrackAptitude,
    pub distance_aptitude: DistanceFocus,
    pub style_aptitude: Strategy,
    /// Remaining headroom under the breed caps, scaled by growth rate, in [0, 1].
    pub growth_potential: f64,
    pub training_efficiency: f64,
    pub dominant_trait: StatName,
    pub balance_score: f64,
    pub heritage_strength: Option<f64>,
    pub genetic_diversity: Option<f64>,
}

impl SecondaryAttributes {
    #[must_use]
    pub fn derive(stats: &Stats, breed: &dyn BreedProfile, pedigree: Option<&Pedigree>) -> Self {
        let balance_score = balance_score(stats);
        Self {
            track_aptitude: track_aptitude(stats, breed),
            distance_aptitude: distance_aptitude(stats),
            style_aptitude: style_aptitude(stats),
            growth_potential: growth_potential(stats, breed),
            training_efficiency: training_efficiency(breed, balance_score),
            dominant_trait: dominant_trait(stats),
            balance_score,
            heritage_strength: pedigree.map(|p| f64::from(p.pedigree_strength) / 100.0),
            genetic_diversity: pedigree.map(|p| 1.0 - p.inbreeding_coefficient),
        }
    }
}

fn track_aptitude(stats: &Stats, breed: &dyn BreedProfile) -> TrackAptitude {
    let (speed, stamina, power) = (
        f64::from(stats.speed),
        f64::from(stats.stamina),
        f64::from(stats.power),
    );
    let turf = (breed.surface_preference(Surface::Turf)
        * (0.5 * stamina + 0.3 * speed + 0.2 * power)
        / 100.0)
        .clamp(0.0, 1.0);
    let dirt = (breed.surface_preference(Surface::Dirt)
        * (0.5 * power + 0.3 * speed + 0.2 * stamina)
        / 100.0)
        .clamp(0.0, 1.0);
    TrackAptitude {
        turf,
        dirt,
        preferred: if dirt > turf { Surface::Dirt } else { Surface::Turf },
    }
}

fn distance_aptitude(stats: &Stats) -> DistanceFocus {
    let lead = stats.speed - stats.stamina;
    if lead >= DISTANCE_MARGIN {
        DistanceFocus::Sprint
    } else if lead >= 0 {
        DistanceFocus::Mile
    } else if lead > -DISTANCE_MARGIN {
        DistanceFocus::Medium
    } else {
        DistanceFocus::Long
    }
}

fn style_aptitude(stats: &Stats) -> Strategy {
    match dominant_trait(stats) {
        StatName::Speed => Strategy::Front,
        StatName::Power => Strategy::Late,
        StatName::Stamina => Strategy::Pace,
    }
}

/// First stat in speed/stamina/power order with the highest value.
#[must_use]
pub fn dominant_trait(stats: &Stats) -> StatName {
    let mut best = StatName::Speed;
    for stat in StatName::ALL {
        if stats.get(stat) > stats.get(best) {
            best = stat;
        }
    }
    best
}

/// `1 - std_dev / mean`, clamped to [0, 1]. Zero when the mean is not positive.
#[must_use]
pub fn balance_score(stats: &Stats) -> f64 {
    let mean = stats.average();
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = StatName::ALL
        .iter()
        .map(|&s| (f64::from(stats.get(s)) - mean).powi(2))
        .sum::<f64>()
        / 3.0;
    (1.0 - variance.sqrt() / mean).clamp(0.0, 1.0)
}

fn growth_potential(stats: &Stats, breed: &dyn BreedProfile) -> f64 {
    let headroom: f64 = StatName::ALL
        .iter()
        .map(|&stat| {
            let cap = breed.stat_cap(stat).max(1);
            let room = f64::from((cap - stats.get(stat)).max(0)) / f64::from(cap);
            room * breed.growth_rate(stat)
        })
        .sum();
    (headroom / 3.0).clamp(0.0, 1.0)
}

fn training_efficiency(breed: &dyn BreedProfile, balance: f64) -> f64 {
    let mean_growth = StatName::ALL
        .iter()
        .map(|&s| breed.growth_rate(s))
        .sum::<f64>()
        / 3.0;
    (mean_growth * (0.9 + 0.1 * balance)).clamp(0.5, 1.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::{BreedDefinition, StatTable, SurfacePreferences};

    fn breed() -> BreedDefinition {
        BreedDefinition {
            name: "Quarter Horse".into(),
            growth_rates: StatTable {
                speed: 1.2,
                stamina: 0.8,
                power: 1.15,
            },
            stat_caps: StatTable {
                speed: 95,
                stamina: 75,
                power: 100,
            },
            surface: SurfacePreferences {
                turf: 0.9,
                dirt: 1.15,
            },
        }
    }

    #[test]
    fn test_balance_score() {
        assert_eq!(balance_score(&Stats::new(50, 50, 50)), 1.0);
        assert!(balance_score(&Stats::new(90, 20, 40)) < 0.5);
        assert_eq!(balance_score(&Stats::new(0, 0, 0)), 0.0);
    }

    #[test]
    fn test_dominant_trait_ties_prefer_speed() {
        assert_eq!(dominant_trait(&Stats::new(60, 60, 40)), StatName::Speed);
        assert_eq!(dominant_trait(&Stats::new(40, 50, 70)), StatName::Power);
    }

    #[test]
    fn test_distance_bands() {
        assert_eq!(distance_aptitude(&Stats::new(70, 40, 50)), DistanceFocus::Sprint);
        assert_eq!(distance_aptitude(&Stats::new(55, 50, 50)), DistanceFocus::Mile);
        assert_eq!(distance_aptitude(&Stats::new(50, 60, 50)), DistanceFocus::Medium);
        assert_eq!(distance_aptitude(&Stats::new(40, 70, 50)), DistanceFocus::Long);
    }

    #[test]
    fn test_dirt_breed_prefers_dirt() {
        let attrs = SecondaryAttributes::derive(&Stats::new(60, 40, 70), &breed(), None);
        assert_eq!(attrs.track_aptitude.preferred, Surface::Dirt);
        assert_eq!(attrs.style_aptitude, Strategy::Late);
        assert!(attrs.heritage_strength.is_none());
        assert!(attrs.genetic_diversity.is_none());
    }

    #[test]
    fn test_pedigree_fields_present_when_supplied() {
        let pedigree = Pedigree {
            inbreeding_coefficient: 0.125,
            pedigree_strength: 64,
            ..Default::default()
        };
        let attrs = SecondaryAttributes::derive(&Stats::new(50, 50, 50), &breed(), Some(&pedigree));
        assert_eq!(attrs.heritage_strength, Some(0.64));
        assert_eq!(attrs.genetic_diversity, Some(0.875));
    }

    #[test]
    fn test_capped_horse_has_no_growth_left() {
        let attrs = SecondaryAttributes::derive(&Stats::new(95, 75, 100), &breed(), None);
        assert_eq!(attrs.growth_potential, 0.0);
    }
}
