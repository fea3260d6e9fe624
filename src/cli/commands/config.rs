//! Config command implementation

use anyhow::{Context, Result};

use crate::config::FmtrunConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    /// TOML, as written in config files
    Toml,
    /// Pretty-printed JSON
    Json,
}

/// Print the merged configuration
pub fn show(config: &FmtrunConfig, format: ConfigFormat) -> Result<()> {
    println!("{}", render(config, format)?);
    Ok(())
}

fn render(config: &FmtrunConfig, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => toml::to_string_pretty(config).context("Failed to render config as TOML"),
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to render config as JSON")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml_round_trips() {
        let mut config = FmtrunConfig::default();
        config.options.list = true;

        let text = render(&config, ConfigFormat::Toml).unwrap();
        assert!(text.contains("[tool]"));
        assert!(text.contains("name = \"gofmt\""));
        assert!(!text.contains("local_bin_dir"));

        let parsed: FmtrunConfig = toml::from_str(&text).unwrap();
        assert!(parsed.options.list);
    }

    #[test]
    fn test_render_json() {
        let text = render(&FmtrunConfig::default(), ConfigFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["parallel"]["channel_buffer_multiplier"], 2);
    }
}
