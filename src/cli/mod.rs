//! Command-line interface for fmtrun
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

use crate::config::FmtrunConfig;

/// fmtrun - Run gofmt over package sources in parallel
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in <DIR> instead of the current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the formatter on package sources
    Fmt(commands::fmt::FmtArgs),
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show version information
    Version,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration after all layers are merged
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "toml")]
        format: commands::config::ConfigFormat,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Fmt(args)) => {
                let config = FmtrunConfig::load(self.config.as_deref())?;
                commands::fmt::execute(args, config, &output).await
            }
            Some(Commands::Config(ConfigCommands::Show { format })) => {
                let config = FmtrunConfig::load(self.config.as_deref())?;
                commands::config::show(&config, format)
            }
            Some(Commands::Version) => commands::version::execute(&output).await,
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // try_init: a subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fmt_flags() {
        let cli = Cli::try_parse_from([
            "fmtrun", "-v", "fmt", "-n", "-x", "-l", "-w", "-s", "-r", "a -> b", "--cpuprofile",
            "cpu.out", "pkg", "./...",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        let Some(Commands::Fmt(args)) = cli.command else {
            panic!("expected fmt command");
        };
        assert!(args.dry_run && args.echo && args.list && args.write && args.simplify_ast);
        assert!(!args.do_diff && !args.all_errors);
        assert_eq!(args.rewrite_rule.as_deref(), Some("a -> b"));
        assert_eq!(args.cpuprofile.as_deref(), Some("cpu.out"));
        assert_eq!(args.packages.len(), 2);
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["fmtrun", "config", "show", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommands::Show {
                format: commands::config::ConfigFormat::Json
            }))
        ));
    }
}
