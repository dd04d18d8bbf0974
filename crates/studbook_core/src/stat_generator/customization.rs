//! Player-chosen training focus applied after heritage.

use super::StatValues;
use crate::breed::Surface;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Race distance a foal is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceFocus {
    Sprint,
    Mile,
    Medium,
    Long,
}

/// Running style a foal is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Front,
    Pace,
    Late,
}

/// Optional adjustments; each present field adds a fixed
/// `(speed, stamina, power)` delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub track: Option<Surface>,
    pub distance: Option<DistanceFocus>,
    pub strategy: Option<Strategy>,
}

type Delta = (f64, f64, f64);

impl Surface {
    fn training_delta(self) -> Delta {
        match self {
            Surface::Turf => (0.0, 3.0, -2.0),
            Surface::Dirt => (2.0, 0.0, 3.0),
        }
    }
}

impl DistanceFocus {
    pub const ALL: [DistanceFocus; 4] = [
        DistanceFocus::Sprint,
        DistanceFocus::Mile,
        DistanceFocus::Medium,
        DistanceFocus::Long,
    ];

    fn training_delta(self) -> Delta {
        match self {
            DistanceFocus::Sprint => (4.0, -3.0, 2.0),
            DistanceFocus::Mile => (2.0, 1.0, 0.0),
            DistanceFocus::Medium => (0.0, 2.0, 1.0),
            DistanceFocus::Long => (-2.0, 5.0, -1.0),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceFocus::Sprint => "sprint",
            DistanceFocus::Mile => "mile",
            DistanceFocus::Medium => "medium",
            DistanceFocus::Long => "long",
        }
    }
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Front, Strategy::Pace, Strategy::Late];

    fn training_delta(self) -> Delta {
        match self {
            Strategy::Front => (3.0, 0.0, 1.0),
            Strategy::Pace => (1.0, 2.0, 0.0),
            Strategy::Late => (0.0, 1.0, 3.0),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Front => "front",
            Strategy::Pace => "pace",
            Strategy::Late => "late",
        }
    }
}

impl fmt::Display for DistanceFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceFocus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sprint" => Ok(DistanceFocus::Sprint),
            "mile" => Ok(DistanceFocus::Mile),
            "medium" => Ok(DistanceFocus::Medium),
            "long" => Ok(DistanceFocus::Long),
            other => Err(format!("unknown distance focus '{other}'")),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(Strategy::Front),
            "pace" => Ok(Strategy::Pace),
            "late" => Ok(Strategy::Late),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

impl Customization {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.track.is_none() && self.distance.is_none() && self.strategy.is_none()
    }

    /// Applies every selected adjustment, in track/distance/strategy order.
    #[must_use]
    pub fn apply(&self, stats: StatValues) -> StatValues {
        let deltas = [
            self.track.map(Surface::training_delta),
            self.distance.map(DistanceFocus::training_delta),
            self.strategy.map(Strategy::training_delta),
        ];
        deltas.into_iter().flatten().fold(stats, |acc, (sp, st, pw)| {
            StatValues::new(acc.speed + sp, acc.stamina + st, acc.power + pw)
        })
    }
}
