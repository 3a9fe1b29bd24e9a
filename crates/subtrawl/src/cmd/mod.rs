//! Subcommand implementations

pub mod fix;
pub mod run;
