//! # Studbook IO
//!
//! File formats for the studbook engine:
//! - JSON documents (stable saves, horse profiles, CLI output)
//! - hex pedigree certificates for trading papers between stables
//! - validated rkyv backups of a whole stable

pub mod certificate;
pub mod error;
pub mod json;
pub mod persistence;

pub use certificate::{issue_certificate, read_certificate};
pub use error::{IoError, Result};
pub use json::{from_json, read_json_file, to_json, to_json_pretty, write_json_file};
pub use persistence::{backup_stable, load_stable, restore_stable, save_stable};
