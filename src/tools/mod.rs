//! Formatter binary location
//!
//! The formatter is looked up once per run: first in the local binary
//! directory, then in the root installation's `bin` directory, and finally by
//! bare name so that process launch searches `PATH` itself.

use crate::config::ToolConfig;
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests;

/// Where a formatter path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSource {
    LocalBin,
    RootBin,
    SearchPath,
}

impl ToolSource {
    pub fn description(&self) -> &'static str {
        match self {
            ToolSource::LocalBin => "local bin directory",
            ToolSource::RootBin => "root installation",
            ToolSource::SearchPath => "PATH lookup",
        }
    }
}

/// A resolved formatter path, shared read-only by all workers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPath {
    pub path: PathBuf,
    pub source: ToolSource,
}

/// Resolves the formatter executable
#[derive(Debug, Clone)]
pub struct ToolLocator {
    name: String,
    local_bin_dir: Option<PathBuf>,
    root_dir: Option<PathBuf>,
}

impl ToolLocator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_bin_dir: None,
            root_dir: None,
        }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(&config.name)
            .with_local_bin_dir(config.local_bin_dir.clone())
            .with_root_dir(config.root_dir.clone())
    }

    pub fn with_local_bin_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.local_bin_dir = non_empty(dir);
        self
    }

    pub fn with_root_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.root_dir = non_empty(dir);
        self
    }

    /// Executable file name, with the platform suffix (`.exe` on Windows)
    pub fn executable_name(&self) -> String {
        format!("{}{}", self.name, std::env::consts::EXE_SUFFIX)
    }

    /// Best-known path to the formatter. Never fails; an unresolvable name
    /// surfaces later as a launch error.
    pub fn locate(&self) -> ToolPath {
        let executable = self.executable_name();

        if let Some(dir) = &self.local_bin_dir {
            let candidate = dir.join(&executable);
            if is_present(&candidate) {
                return ToolPath {
                    path: candidate,
                    source: ToolSource::LocalBin,
                };
            }
        }

        if let Some(root) = &self.root_dir {
            let candidate = root.join("bin").join(&executable);
            if is_present(&candidate) {
                return ToolPath {
                    path: candidate,
                    source: ToolSource::RootBin,
                };
            }
        }

        tracing::debug!("{} not found in configured directories, relying on PATH", executable);
        ToolPath {
            path: PathBuf::from(executable),
            source: ToolSource::SearchPath,
        }
    }
}

fn non_empty(dir: Option<PathBuf>) -> Option<PathBuf> {
    dir.filter(|d| !d.as_os_str().is_empty())
}

fn is_present(path: &Path) -> bool {
    path.is_file()
}
