//! Command layer behind the `studbook` binary.
//!
//! Each command loads what it needs through [`App`], runs one engine
//! operation and hands back a serializable result for the CLI to print.

pub mod breeding;
pub mod commands;
pub mod state;

pub use breeding::FoalReport;
pub use commands::PoolSide;
pub use state::{App, AppError};
