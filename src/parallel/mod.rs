//! Bounded parallel dispatch of formatter runs
//!
//! This module owns the producer/consumer machinery that drives the formatter
//! over many files at once.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   bounded queue    ┌──────────────┐
//! │  Dispatcher  │ ─────────────────▶ │  worker-0    │──▶ formatter file_a
//! │              │   capacity 2 × P   │  worker-1    │──▶ formatter file_b
//! │ (caller      │  (blocks when      │  ...         │
//! │  thread)     │   full)            │  worker-P-1  │──▶ formatter file_n
//! └──────────────┘                    └──────┬───────┘
//!                                            │ outcomes
//!                                            ▼
//!                                   completion barrier
//! ```
//!
//! - **Workers**: `P` threads, one per CPU unless configured otherwise, all
//!   started before the first file is queued.
//! - **Queue**: a crossbeam bounded channel; the dispatcher waits when it is
//!   full and closes it after the last file.
//! - **Barrier**: a crossbeam `WaitGroup`; the caller returns only once every
//!   worker has drained the queue and exited.
//!
//! There is no retry and no cancellation. A failing file is recorded in the
//! report and the rest of the queue keeps moving.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use fmtrun::external::CommandRunner;
//! use fmtrun::parallel::{Pipeline, PipelineConfig};
//! use std::path::{Path, PathBuf};
//!
//! let runner = CommandRunner::new(false, true);
//! let options = vec!["-l".to_string()];
//! let pipeline = Pipeline::new(Path::new("gofmt"), &options, &runner, PipelineConfig::new(4));
//!
//! let report = pipeline.run(vec![PathBuf::from("a.go"), PathBuf::from("b.go")])?;
//! assert_eq!(report.outcomes.len(), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod pipeline;

// Re-export main types for easier access
pub use pipeline::{
    DispatchStats, Dispatcher, Outcome, Phase, Pipeline, PipelineConfig, PipelineReport,
};
