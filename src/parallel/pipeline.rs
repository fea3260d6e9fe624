use anyhow::{Result, anyhow};
use crossbeam::channel::{Receiver, Sender, TrySendError, bounded, unbounded};
use crossbeam::sync::WaitGroup;
use std::path::{Path, PathBuf};

use crate::config::ParallelConfig;
use crate::external::{CommandLine, Invoker};

/// Sizing for the worker pool and its queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of worker threads (at least 1)
    pub workers: usize,
    /// Queue capacity multiplier (capacity = workers * multiplier)
    pub channel_buffer_multiplier: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: Self::hardware_workers(),
            channel_buffer_multiplier: 2,
        }
    }
}

impl PipelineConfig {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            ..Default::default()
        }
    }

    /// One worker per available CPU
    pub fn hardware_workers() -> usize {
        num_cpus::get().max(1)
    }

    /// Resolve pool sizing from configuration (`max_workers = 0` means hardware parallelism)
    pub fn from_settings(settings: &ParallelConfig) -> Self {
        let workers = if settings.max_workers > 0 {
            settings.max_workers
        } else {
            Self::hardware_workers()
        };

        Self {
            workers,
            channel_buffer_multiplier: settings.channel_buffer_multiplier.max(1),
        }
    }

    pub fn queue_capacity(&self) -> usize {
        self.workers
            .max(1)
            .saturating_mul(self.channel_buffer_multiplier.max(1))
    }
}

/// Lifecycle of a single pipeline run. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Idle,
    WorkersStarted,
    Dispatching,
    QueueClosed,
    Draining,
    AllWorkersDone,
}

struct PhaseTracker {
    current: Phase,
}

impl PhaseTracker {
    fn new() -> Self {
        Self { current: Phase::Idle }
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(next > self.current, "pipeline phase moved from {:?} to {:?}", self.current, next);
        tracing::trace!("pipeline phase {:?} -> {:?}", self.current, next);
        self.current = next;
    }
}

/// Result of formatting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub file: PathBuf,
    pub worker_id: usize,
    pub error: Option<String>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// What the dispatcher observed while filling the queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Items handed to the queue
    pub dispatched: usize,
    /// Sends that found the queue full and had to wait
    pub blocked_sends: usize,
}

/// Everything a finished run produced, available once all workers are done
#[derive(Debug)]
pub struct PipelineReport {
    pub outcomes: Vec<Outcome>,
    pub dispatch: DispatchStats,
    pub workers: usize,
    pub phase: Phase,
}

impl PipelineReport {
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(Outcome::is_success)
    }
}

/// Producer side of the work queue. Dropping it closes the queue.
pub struct Dispatcher {
    work_tx: Sender<PathBuf>,
}

impl Dispatcher {
    pub fn new(work_tx: Sender<PathBuf>) -> Self {
        Self { work_tx }
    }

    /// Push every file in order, waiting whenever the queue is full, then close the queue
    pub fn dispatch<I>(self, files: I) -> DispatchStats
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut stats = DispatchStats::default();

        for file in files {
            let file = match self.work_tx.try_send(file) {
                Ok(()) => {
                    stats.dispatched += 1;
                    continue;
                }
                Err(TrySendError::Full(file)) => file,
                Err(TrySendError::Disconnected(file)) => {
                    tracing::warn!("No workers left to format {}", file.display());
                    break;
                }
            };

            stats.blocked_sends += 1;
            if let Err(err) = self.work_tx.send(file) {
                tracing::warn!("No workers left to format {}", err.into_inner().display());
                break;
            }
            stats.dispatched += 1;
        }

        stats
    }
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext {
    worker_id: usize,
    work_rx: Receiver<PathBuf>,
    outcome_tx: Sender<Outcome>,
    // Released when the worker returns, which is what the barrier waits for.
    _done: WaitGroup,
}

/// Fixed worker pool running the formatter over a stream of files
pub struct Pipeline<'a, I: Invoker> {
    tool: &'a Path,
    options: &'a [String],
    invoker: &'a I,
    config: PipelineConfig,
}

impl<'a, I: Invoker> Pipeline<'a, I> {
    pub fn new(tool: &'a Path, options: &'a [String], invoker: &'a I, config: PipelineConfig) -> Self {
        Self {
            tool,
            options,
            invoker,
            config,
        }
    }

    /// Format every file and block until all workers have returned
    ///
    /// Workers are started before the first file is queued. Failures are
    /// recorded per file and never stop the remaining work.
    pub fn run(&self, files: Vec<PathBuf>) -> Result<PipelineReport> {
        let workers = self.config.workers.max(1);
        let capacity = self.config.queue_capacity();
        let (work_tx, work_rx) = bounded::<PathBuf>(capacity);
        let (outcome_tx, outcome_rx) = unbounded::<Outcome>();
        let mut phase = PhaseTracker::new();

        tracing::debug!(
            "Formatting {} files with {} workers (queue capacity {})",
            files.len(),
            workers,
            capacity
        );

        let dispatch = crossbeam::thread::scope(|s| {
            let barrier = WaitGroup::new();

            for worker_id in 0..workers {
                let ctx = WorkerContext {
                    worker_id,
                    work_rx: work_rx.clone(),
                    outcome_tx: outcome_tx.clone(),
                    _done: barrier.clone(),
                };
                s.spawn(move |_| self.worker_loop(ctx));
            }
            drop(work_rx);
            drop(outcome_tx);
            phase.advance(Phase::WorkersStarted);

            phase.advance(Phase::Dispatching);
            let stats = Dispatcher::new(work_tx).dispatch(files);
            phase.advance(Phase::QueueClosed);

            phase.advance(Phase::Draining);
            barrier.wait();
            phase.advance(Phase::AllWorkersDone);

            stats
        })
        .map_err(|_| anyhow!("Worker thread panicked while formatting"))?;

        let outcomes: Vec<Outcome> = outcome_rx.try_iter().collect();

        Ok(PipelineReport {
            outcomes,
            dispatch,
            workers,
            phase: phase.current,
        })
    }

    fn worker_loop(&self, ctx: WorkerContext) {
        while let Ok(file) = ctx.work_rx.recv() {
            let command = CommandLine::new(self.tool, self.options, &file);
            tracing::debug!("[worker-{}] {}", ctx.worker_id, command);

            let error = match self.invoker.invoke(&command) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("{}: {:#}", file.display(), e);
                    Some(format!("{e:#}"))
                }
            };

            let outcome = Outcome {
                file,
                worker_id: ctx.worker_id,
                error,
            };
            if ctx.outcome_tx.send(outcome).is_err() {
                break; // Receiver dropped
            }
        }
    }
}
