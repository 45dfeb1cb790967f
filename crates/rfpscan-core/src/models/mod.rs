//! Data models for analysis configuration and reports.

pub mod config;
pub mod embedded;
pub mod report;
