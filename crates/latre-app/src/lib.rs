//! Command-line shell over the import and export pipelines.

pub mod cli;
pub mod commands;
pub mod error;
