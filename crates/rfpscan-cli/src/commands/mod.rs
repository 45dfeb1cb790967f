//! CLI subcommands.

pub mod analyze;
pub mod batch;
pub mod config;
pub mod sample;
