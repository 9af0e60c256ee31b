//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use pulsecheck_extractor::ExtractorConfig;
use pulsecheck_llm::OracleConfig;
use pulsecheck_synthesizer::SynthesizerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion oracle
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Per-chunk extraction
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Synthesis and request limits
    #[serde(default)]
    pub synthesizer: SynthesizerConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path (`~/.pulsecheck/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".pulsecheck").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default one.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// The API key is never written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.oracle
            .validate()
            .map_err(|e| CliError::Config(format!("[oracle] {}", e)))?;
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.synthesizer
            .validate()
            .map_err(|e| CliError::Config(format!("[synthesizer] {}", e)))?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsecheck_llm::ProviderKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.oracle.model, OracleConfig::default().model);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.oracle.model = "mistral".to_string();
        config.extractor = ExtractorConfig::aggressive();
        config.settings.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.oracle.model, "mistral");
        assert_eq!(loaded.extractor, ExtractorConfig::aggressive());
        assert_eq!(loaded.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_api_key_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.oracle.api_key = Some("sk-do-not-store".to_string());
        config.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("sk-do-not-store"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[oracle]\nprovider = \"openai\"\nmodel = \"gpt-4o-mini\"\n\n[settings]\ncolor = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.oracle.provider, ProviderKind::OpenAi);
        assert!(!config.settings.color);
        assert_eq!(config.extractor, ExtractorConfig::default());
        // No key configured yet
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[extractor]\nmax_chunk_size = 1000\n\n[synthesizer]\nrequest_timeout_secs = 1200\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.extractor.max_chunk_size, 1000);
        assert_eq!(
            config.extractor.oracle_timeout_secs,
            ExtractorConfig::default().oracle_timeout_secs
        );
        assert_eq!(config.synthesizer.request_timeout_secs, 1200);
        assert_eq!(
            config.synthesizer.synthesis_timeout_secs,
            SynthesizerConfig::default().synthesis_timeout_secs
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[oracle\nmodel = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }
}
