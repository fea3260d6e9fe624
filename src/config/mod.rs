//! Configuration management for fmtrun
//!
//! Configuration is layered with figment, lowest priority first:
//!
//! 1. embedded `default-config.toml`
//! 2. `GOBIN` / `GOROOT` for the formatter directories
//! 3. user config `~/.config/fmtrun/config.{toml,json,yaml,yml}`
//! 4. repository config `fmtrun.{toml,json,yaml,yml}`
//! 5. `FMTRUN_*` environment variables (`__` separates sections)
//!
//! `--config FILE` replaces layers 3 and 4.

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::external::FormatOptions;


// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Main configuration structure for fmtrun
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FmtrunConfig {
    /// Formatter executable settings
    pub tool: ToolConfig,

    /// Worker pool settings
    pub parallel: ParallelConfig,

    /// Package file discovery settings
    pub discovery: DiscoveryConfig,

    /// Baseline options forwarded to the formatter
    pub options: FormatOptions,
}

/// Formatter executable configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable name without platform suffix
    pub name: String,

    /// Directory checked first for the executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_bin_dir: Option<PathBuf>,

    /// Installation root; `<root_dir>/bin` is checked second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: "gofmt".to_string(),
            local_bin_dir: None,
            root_dir: None,
        }
    }
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Maximum number of worker threads (0 = one per CPU)
    pub max_workers: usize,

    /// Channel buffer size multiplier (buffer = workers * multiplier)
    pub channel_buffer_multiplier: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_workers: 0,
            channel_buffer_multiplier: 2,
        }
    }
}

/// Package file discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Source file extension, without the dot
    pub extension: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extension: "go".to_string(),
        }
    }
}

impl FmtrunConfig {
    /// Load configuration from all standard layers
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        let figment = Self::figment(custom_config)?;
        Self::from_figment(&figment)
    }

    /// Build the layered figment without extracting it
    pub fn figment(custom_config: Option<&str>) -> Result<Figment> {
        tracing::trace!("CONFIG LOAD: Starting");
        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG)) // Embedded defaults
            // Go's own environment names the formatter directories
            .merge(Env::raw().only(&["GOBIN", "GOROOT"]).map(|key| {
                if key.as_str().eq_ignore_ascii_case("GOBIN") {
                    "tool.local_bin_dir".into()
                } else {
                    "tool.root_dir".into()
                }
            }));

        if let Some(custom_path) = custom_config {
            let path = Path::new(custom_path);
            if !path.is_file() {
                bail!("Configuration file not found: {}", custom_path);
            }
            tracing::trace!("CONFIG LOAD: Using custom config {}", custom_path);
            figment = merge_file(figment, path);
        } else {
            if let Some(user_config) = Self::user_config_path() {
                for ext in ["toml", "json", "yaml", "yml"] {
                    figment = merge_file(figment, &user_config.with_extension(ext));
                }
            }
            for ext in ["toml", "json", "yaml", "yml"] {
                figment = merge_file(figment, Path::new(&format!("fmtrun.{ext}")));
            }
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("FMTRUN_").split("__"));

        Ok(figment)
    }

    /// Extract and validate a typed configuration
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.tool.name.trim().is_empty() {
            bail!("tool.name must not be empty");
        }
        if self.discovery.extension.trim_start_matches('.').is_empty() {
            bail!("discovery.extension must not be empty");
        }
        if self.parallel.channel_buffer_multiplier == 0 {
            bail!("parallel.channel_buffer_multiplier must be at least 1");
        }
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config").join("fmtrun").join("config.toml"))
    }
}

/// Merge a config file, picking the provider from its extension
fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => figment.merge(Json::file(path)),
        Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}
