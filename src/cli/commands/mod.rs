//! Command implementations for the fmtrun CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod fmt;
pub mod version;
