//! Shared building blocks for the Lá Tre contact manager: configuration,
//! error types, constants and small utilities used by every other crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod util;
