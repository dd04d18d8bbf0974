//! Core data structures for the studbook engine.

pub mod horse;
pub mod pedigree;
pub mod stable;
