//! # Studbook
//!
//! Command-line front end for the studbook breeding engine. The engine
//! itself lives in `studbook_core`, records in `studbook_data` and save
//! files in `studbook_io`.

pub mod app;

pub use app::{App, AppError, FoalReport, PoolSide};
