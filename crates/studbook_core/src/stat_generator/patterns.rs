//! Named base-stat patterns.
//!
//! Drawing each stat independently clusters a population around the mean.
//! Picking an archetype first keeps visibly different horses in every crop.

use super::StatValues;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use studbook_data::StatName;

/// Fractional band of the base range, `(low, high)` with 0 = min, 1 = max.
type Band = (f64, f64);

const PEAK: Band = (0.8, 1.0);
const HIGH: Band = (0.7, 1.0);
const UPPER: Band = (0.6, 0.96);
const MID: Band = (0.3, 0.7);
const LOW: Band = (0.1, 0.5);
const UNDER: Band = (0.04, 0.4);
const FLOOR: Band = (0.0, 0.24);
const FULL: Band = (0.0, 1.0);

/// Balanced stats wobble this far (as a fraction of the range) around a
/// shared centre.
const BALANCED_SPREAD: f64 = 0.16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariationPattern {
    Balanced,
    SpeedFocus,
    StaminaFocus,
    PowerFocus,
    SpeedStamina,
    SpeedPower,
    StaminaPower,
    /// One stat near the top, one near the floor.
    Polarized,
    /// Unusual combination: every stat drawn across the full range.
    Wildcard,
}

impl VariationPattern {
    pub const ALL: [VariationPattern; 9] = [
        VariationPattern::Balanced,
        VariationPattern::SpeedFocus,
        VariationPattern::StaminaFocus,
        VariationPattern::PowerFocus,
        VariationPattern::SpeedStamina,
        VariationPattern::SpeedPower,
        VariationPattern::StaminaPower,
        VariationPattern::Polarized,
        VariationPattern::Wildcard,
    ];

    /// Uniform pick over all nine patterns.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Draws speed/stamina/power within `[min, max]` following this pattern.
    ///
    /// `variance` in (0, 1] narrows every band around its centre.
    pub fn synthesize<R: Rng>(self, rng: &mut R, variance: f64, min: f64, max: f64) -> StatValues {
        let sampler = Sampler { variance, min, max };
        match self {
            VariationPattern::Balanced => {
                let centre = sampler.draw(rng, MID);
                let half = (max - min) * BALANCED_SPREAD * variance;
                let mut jitter = || (centre + rng.gen_range(-half..=half)).clamp(min, max);
                StatValues::new(jitter(), jitter(), jitter())
            }
            VariationPattern::SpeedFocus => sampler.focus(rng, &[StatName::Speed]),
            VariationPattern::StaminaFocus => sampler.focus(rng, &[StatName::Stamina]),
            VariationPattern::PowerFocus => sampler.focus(rng, &[StatName::Power]),
            VariationPattern::SpeedStamina => {
                sampler.focus(rng, &[StatName::Speed, StatName::Stamina])
            }
            VariationPattern::SpeedPower => sampler.focus(rng, &[StatName::Speed, StatName::Power]),
            VariationPattern::StaminaPower => {
                sampler.focus(rng, &[StatName::Stamina, StatName::Power])
            }
            VariationPattern::Polarized => {
                let mut order = StatName::ALL;
                order.shuffle(rng);
                let mut values = StatValues::default();
                values.set(order[0], sampler.draw(rng, PEAK));
                values.set(order[1], sampler.draw(rng, FLOOR));
                values.set(order[2], sampler.draw(rng, MID));
                values
            }
            VariationPattern::Wildcard => StatValues::new(
                sampler.draw(rng, FULL),
                sampler.draw(rng, FULL),
                sampler.draw(rng, FULL),
            ),
        }
    }
}

struct Sampler {
    variance: f64,
    min: f64,
    max: f64,
}

impl Sampler {
    fn draw<R: Rng>(&self, rng: &mut R, band: Band) -> f64 {
        let range = self.max - self.min;
        let lo = self.min + band.0 * range;
        let hi = self.min + band.1 * range;
        let mid = (lo + hi) / 2.0;
        let half = (hi - lo) / 2.0 * self.variance;
        if half <= 0.0 {
            return mid.clamp(self.min, self.max);
        }
        rng.gen_range(mid - half..=mid + half)
            .clamp(self.min, self.max)
    }

    /// Single focus: one stat high, the rest low. Dual focus: two upper, one under.
    fn focus<R: Rng>(&self, rng: &mut R, focused: &[StatName]) -> StatValues {
        let (on, off) = if focused.len() == 1 {
            (HIGH, LOW)
        } else {
            (UPPER, UNDER)
        };
        let mut values = StatValues::default();
        for stat in StatName::ALL {
            let band = if focused.contains(&stat) { on } else { off };
            values.set(stat, self.draw(rng, band));
        }
        values
    }
}
