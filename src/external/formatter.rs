//! Formatter invocation
//!
//! This module builds the command line for a single formatter run and
//! executes it, honouring the dry-run (`-n`) and echo (`-x`) modes.

use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One fully assembled formatter invocation: program, options, then the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: &Path, options: &[String], file: &Path) -> Self {
        let mut args: Vec<OsString> = options.iter().map(OsString::from).collect();
        args.push(file.as_os_str().to_os_string());

        Self {
            program: program.to_path_buf(),
            args,
        }
    }

    /// The file this invocation formats
    pub fn file(&self) -> Option<&Path> {
        self.args.last().map(Path::new)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// Quote an argument for display when it would not survive a shell as-is
fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Something that can run a formatter command line
///
/// Workers share one invoker, so implementations must be `Sync`.
pub trait Invoker: Sync {
    fn invoke(&self, command: &CommandLine) -> Result<()>;
}

/// Runs formatter commands as child processes with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner {
    dry_run: bool,
    echo: bool,
}

impl CommandRunner {
    pub fn new(dry_run: bool, echo: bool) -> Self {
        Self { dry_run, echo }
    }
}

impl Invoker for CommandRunner {
    fn invoke(&self, command: &CommandLine) -> Result<()> {
        if self.dry_run || self.echo {
            println!("{command}");
        }
        if self.dry_run {
            return Ok(());
        }

        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .with_context(|| format!("Failed to launch {}", command.program.display()))?;

        if !status.success() {
            bail!("{} {}", command.program.display(), status);
        }

        Ok(())
    }
}
