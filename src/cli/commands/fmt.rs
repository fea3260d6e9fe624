//! `fmtrun fmt` - run the formatter on package sources
//!
//! Flags `-l -w -r -s -d -e --cpuprofile` are forwarded to the formatter.
//! `-n` prints the commands that would be executed; `-x` prints them as they
//! are executed.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Output;
use crate::config::FmtrunConfig;
use crate::external::{CommandRunner, FormatOptions};
use crate::parallel::{Pipeline, PipelineConfig, PipelineReport};
use crate::tools::{ToolLocator, ToolSource};
use crate::utils;

#[derive(Args, Debug, Default)]
pub struct FmtArgs {
    /// Print the commands that would be executed
    #[arg(short = 'n')]
    pub dry_run: bool,

    /// Print the commands as they are executed
    #[arg(short = 'x')]
    pub echo: bool,

    /// List files whose formatting differs from the formatter's
    #[arg(short = 'l')]
    pub list: bool,

    /// Write result to (source) file instead of stdout
    #[arg(short = 'w')]
    pub write: bool,

    /// Rewrite rule (e.g., 'a[b:len(a)] -> a[b:]')
    #[arg(short = 'r', value_name = "RULE")]
    pub rewrite_rule: Option<String>,

    /// Simplify code
    #[arg(short = 's')]
    pub simplify_ast: bool,

    /// Display diffs instead of rewriting files
    #[arg(short = 'd')]
    pub do_diff: bool,

    /// Report all errors (not just the first 10 on different lines)
    #[arg(short = 'e')]
    pub all_errors: bool,

    /// Write cpu profile to this file
    #[arg(long = "cpuprofile", value_name = "FILE")]
    pub cpuprofile: Option<String>,

    /// Packages (directories), files, or `dir/...` trees to format
    #[arg(value_name = "PACKAGES")]
    pub packages: Vec<PathBuf>,
}

impl FmtArgs {
    /// Layer the command-line flags over the configured baseline
    pub fn format_options(&self, base: &FormatOptions) -> FormatOptions {
        FormatOptions {
            list: base.list || self.list,
            write: base.write || self.write,
            rewrite_rule: self.rewrite_rule.clone().unwrap_or_else(|| base.rewrite_rule.clone()),
            simplify_ast: base.simplify_ast || self.simplify_ast,
            do_diff: base.do_diff || self.do_diff,
            all_errors: base.all_errors || self.all_errors,
            cpuprofile: self.cpuprofile.clone().unwrap_or_else(|| base.cpuprofile.clone()),
        }
    }

    /// Package specifiers, defaulting to the current directory
    pub fn package_specs(&self) -> Vec<PathBuf> {
        if self.packages.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.packages.clone()
        }
    }
}

pub async fn execute(args: FmtArgs, config: FmtrunConfig, output: &Output) -> Result<()> {
    let start = Instant::now();

    let options = args.format_options(&config.options).to_args();
    let tool = ToolLocator::from_config(&config.tool).locate();
    output.verbose(&format!(
        "Using {} ({})",
        tool.path.display(),
        tool.source.description()
    ));
    if tool.source == ToolSource::SearchPath && !args.dry_run && !utils::command_exists(&tool.path) {
        output.warning(&format!(
            "{} was not found in PATH or the configured directories",
            tool.path.display()
        ));
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let files = utils::discover_files(&args.package_specs(), &config.discovery.extension, &cwd)?;
    let pipeline_config = PipelineConfig::from_settings(&config.parallel);
    output.verbose(&format!(
        "Formatting {} files with {} workers",
        files.len(),
        pipeline_config.workers
    ));

    let runner = CommandRunner::new(args.dry_run, args.echo);
    let report = tokio::task::spawn_blocking(move || {
        Pipeline::new(&tool.path, &options, &runner, pipeline_config).run(files)
    })
    .await
    .context("Formatting task was aborted")??;

    summarize(&report, output, start)
}

/// Report failed files and turn any failure into a non-zero exit
fn summarize(report: &PipelineReport, output: &Output, start: Instant) -> Result<()> {
    let failed: Vec<_> = report.failures().collect();

    if failed.is_empty() {
        output.verbose(&format!(
            "Formatted {} files in {:.2}s",
            report.succeeded(),
            start.elapsed().as_secs_f64()
        ));
        return Ok(());
    }

    output.error(&format!("Formatter failed on {} file(s):", failed.len()));
    for outcome in &failed {
        let reason = outcome.error.as_deref().unwrap_or("unknown error");
        output.list_item(&format!("{}: {}", outcome.file.display(), reason));
    }

    bail!(
        "{} of {} files failed to format",
        failed.len(),
        report.outcomes.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::{DispatchStats, Outcome, Phase};

    #[test]
    fn test_flags_switch_options_on() {
        let args = FmtArgs {
            list: true,
            rewrite_rule: Some("a -> b".to_string()),
            ..Default::default()
        };

        let options = args.format_options(&FormatOptions::default());
        assert_eq!(options.to_args(), vec!["-l", "-r", "a -> b"]);
    }

    #[test]
    fn test_config_baseline_is_kept() {
        let base = FormatOptions {
            simplify_ast: true,
            cpuprofile: "base.prof".to_string(),
            ..Default::default()
        };
        let args = FmtArgs {
            write: true,
            cpuprofile: Some("cli.prof".to_string()),
            ..Default::default()
        };

        let options = args.format_options(&base);
        assert!(options.simplify_ast);
        assert!(options.write);
        assert_eq!(options.cpuprofile, "cli.prof");
    }

    #[test]
    fn test_default_package_is_current_dir() {
        assert_eq!(FmtArgs::default().package_specs(), vec![PathBuf::from(".")]);
    }

    fn report(errors: &[Option<&str>]) -> PipelineReport {
        PipelineReport {
            outcomes: errors
                .iter()
                .enumerate()
                .map(|(i, error)| Outcome {
                    file: PathBuf::from(format!("f{i}.go")),
                    worker_id: 0,
                    error: error.map(str::to_string),
                })
                .collect(),
            dispatch: DispatchStats::default(),
            workers: 1,
            phase: Phase::AllWorkersDone,
        }
    }

    #[test]
    fn test_summary_fails_when_any_file_failed() {
        let output = Output::new(false, true);
        let err = summarize(&report(&[None, Some("exit status: 2"), None]), &output, Instant::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 files failed to format");
    }

    #[test]
    fn test_summary_succeeds_when_all_ok() {
        let output = Output::new(false, true);
        assert!(summarize(&report(&[None, None]), &output, Instant::now()).is_ok());
    }
}
