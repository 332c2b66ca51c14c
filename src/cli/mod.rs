//! CLI subcommand implementations for the harvester binary.

pub mod courses_cmd;
pub mod output;
pub mod run_cmd;
