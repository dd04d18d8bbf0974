use super::horse::{CareerGrade, Stats};
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// Lineage label carried by horses without recorded parents.
pub const FOUNDATION_LINEAGE: &str = "Foundation Horse";

/// One-level summary of a parent's own ancestry.
///
/// Deeper ancestry is never stored; only names, a generation count and the
/// foundation-line tags survive compression.
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
pub struct CompressedPedigree {
    pub sire: Option<String>,
    pub dam: Option<String>,
    pub generations: u8,
    pub foundation_lines: Vec<String>,
}

/// Summary of a sire or dam as embedded in a foal's pedigree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase")]
pub struct ParentRecord {
    pub name: String,
    pub breed: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub racing_style: String,
    #[serde(default)]
    pub gender: String,
    pub stats: Stats,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub grade: CareerGrade,
    #[serde(default)]
    pub races_won: u32,
    #[serde(default)]
    pub total_races: u32,
    #[serde(default)]
    pub pedigree: Option<CompressedPedigree>,
    #[serde(default)]
    pub genetic_traits: Vec<String>,
    #[serde(default)]
    pub surface_preference: Option<String>,
    #[serde(default)]
    pub distance_preference: Option<String>,
}

impl ParentRecord {
    /// Win rate as a fraction in [0, 1].
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_races == 0 {
            0.0
        } else {
            f64::from(self.races_won.min(self.total_races)) / f64::from(self.total_races)
        }
    }

    /// Identity token used for bloodline bookkeeping: `"name (breed)"`.
    #[must_use]
    pub fn ancestor_tag(&self) -> String {
        format!("{} ({})", self.name, self.breed)
    }

    /// Depth of this parent's own recorded ancestry.
    #[must_use]
    pub fn generations(&self) -> u8 {
        self.pedigree.as_ref().map_or(0, |p| p.generations)
    }

    /// Foundation-line tags inherited through this parent.
    #[must_use]
    pub fn foundation_lines(&self) -> &[String] {
        self.pedigree
            .as_ref()
            .map(|p| p.foundation_lines.as_slice())
            .unwrap_or_default()
    }
}

/// Up-to-three-generation ancestry of a horse.
///
/// All scalar fields are computed once at construction and are
/// authoritative when reloaded from a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
#[serde(rename_all = "camelCase", default)]
pub struct Pedigree {
    pub sire: Option<ParentRecord>,
    pub dam: Option<ParentRecord>,
    pub generations: u8,
    pub inbreeding_coefficient: f64,
    /// Creation time in epoch milliseconds.
    pub created: i64,
    pub lineage: String,
    pub cross_bred: bool,
    pub foundation_lines: Vec<String>,
    pub pedigree_strength: u32,
}

impl Default for Pedigree {
    fn default() -> Self {
        Self::foundation(0)
    }
}

impl Pedigree {
    /// Empty pedigree for a horse with no recorded parents.
    #[must_use]
    pub fn foundation(created: i64) -> Self {
        Self {
            sire: None,
            dam: None,
            generations: 0,
            inbreeding_coefficient: 0.0,
            created,
            lineage: FOUNDATION_LINEAGE.to_string(),
            cross_bred: false,
            foundation_lines: Vec::new(),
            pedigree_strength: 0,
        }
    }

    #[must_use]
    pub fn has_parents(&self) -> bool {
        self.sire.is_some() || self.dam.is_some()
    }

    #[must_use]
    pub fn is_foundation(&self) -> bool {
        !self.has_parents()
    }

    /// Present parents, sire first.
    pub fn parents(&self) -> impl Iterator<Item = &ParentRecord> {
        self.sire.iter().chain(self.dam.iter())
    }

    #[must_use]
    pub fn sire_name(&self) -> Option<&str> {
        self.sire.as_ref().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn dam_name(&self) -> Option<&str> {
        self.dam.as_ref().map(|d| d.name.as_str())
    }
}
