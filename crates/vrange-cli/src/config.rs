use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = "vrange.toml";

/// The vrange configuration file structure (vrange.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VrangeConfig {
    /// Constraint evaluation defaults
    pub evaluation: EvaluationConfig,

    /// Output settings
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Let pre-releases match ranges that do not name their `[major, minor, patch]`
    pub include_prereleases: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How command results are printed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl VrangeConfig {
    /// Load configuration from vrange.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let config: VrangeConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                log::debug!("loaded configuration from {}", config_path.display());
                return Ok(Some(config));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config: VrangeConfig = toml::from_str("").unwrap();
        assert!(!config.evaluation.include_prereleases);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[evaluation]
include_prereleases = true

[output]
format = "json"
"#;
        let config: VrangeConfig = toml::from_str(toml).unwrap();
        assert!(config.evaluation.include_prereleases);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_unknown_format() {
        let toml = r#"
[output]
format = "yaml"
"#;
        assert!(toml::from_str::<VrangeConfig>(toml).is_err());
    }

    #[test]
    fn test_load_searches_parent_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[evaluation]\ninclude_prereleases = true\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = VrangeConfig::load(&nested).unwrap().expect("config found");
        assert!(config.evaluation.include_prereleases);
    }

    #[test]
    fn test_load_reports_invalid_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[output]\nformat = 3\n").unwrap();

        let err = VrangeConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));
    }
}
