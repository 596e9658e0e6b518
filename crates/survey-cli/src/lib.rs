//! CLI library components for the survey grapher.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
