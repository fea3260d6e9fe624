//! # fmtrun - Run gofmt over package sources in parallel
//!
//! fmtrun resolves the formatter binary once, discovers the source files of
//! each package it is given, and feeds them through a bounded queue to a
//! fixed pool of workers. Every worker runs the formatter on one file at a
//! time with the same set of forwarded options.
//!
//! ## Quick Start
//!
//! ```bash
//! # List files whose formatting differs, in the current package
//! fmtrun fmt -l
//!
//! # Rewrite files in place across a whole tree
//! fmtrun fmt -l -w ./...
//!
//! # Show the commands without running them
//! fmtrun fmt -n -s pkg/server
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use fmtrun::external::{CommandRunner, FormatOptions};
//! use fmtrun::parallel::{Pipeline, PipelineConfig};
//! use fmtrun::tools::ToolLocator;
//! use std::path::PathBuf;
//!
//! let options = FormatOptions { list: true, ..Default::default() }.to_args();
//! let tool = ToolLocator::new("gofmt").locate();
//! let runner = CommandRunner::new(false, false);
//!
//! let report = Pipeline::new(&tool.path, &options, &runner, PipelineConfig::default())
//!     .run(vec![PathBuf::from("main.go")])?;
//! println!("{} failed", report.failures().count());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod external;
pub mod parallel;
pub mod tools;
pub mod utils;

pub use cli::{Cli, Output};
pub use config::FmtrunConfig;

/// Result type alias for fmtrun operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
