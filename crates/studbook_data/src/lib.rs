//! Plain data records shared by the studbook engine.
//!
//! Everything here is a value type: stats, career summaries, pedigrees and
//! the records held by a stable. Behaviour lives in `studbook_core`.

pub mod data;

pub use data::horse::{CareerGrade, CareerStats, HorseProfile, MatureGender, StatName, Stats};
pub use data::pedigree::{CompressedPedigree, ParentRecord, Pedigree, FOUNDATION_LINEAGE};
pub use data::stable::{
    BreedingAttempt, BreedingRecord, PoolEntry, RetiredHorseRecord, StablePreferences,
    StableSnapshot, StableStatistics, DEFAULT_STABLE_CAPACITY,
};
