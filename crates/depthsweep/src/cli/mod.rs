//! Command-line interface.

mod commands;
mod run;

pub use commands::Cli;
pub use run::run_sweep;
