//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Chat completion provider settings
    #[serde(default)]
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Directory for generated summaries (default: system temp dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (openai, gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Model name (empty = provider default)
    #[serde(default)]
    pub model: String,

    /// API endpoint override
    #[serde(default)]
    pub endpoint: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: String::new(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmSettings {
    /// Environment variable consulted when `api_key` is empty.
    pub fn api_key_env_var(&self) -> &'static str {
        match self.provider.to_lowercase().as_str() {
            "gemini" => "SIKUM_GEMINI_API_KEY",
            _ => "OPENAI_API_KEY",
        }
    }

    /// Configured model, or the provider's default.
    pub fn effective_model(&self) -> String {
        let model = self.model.trim();
        if !model.is_empty() {
            return model.to_string();
        }
        match self.provider.to_lowercase().as_str() {
            "gemini" => crate::llm::DEFAULT_GEMINI_MODEL.to_string(),
            _ => crate::llm::DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut settings = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::debug!("No config file found, using defaults");
            Self::default()
        };

        settings.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Parse a specific configuration file, without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Fill an empty API key from the environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = lookup(self.llm.api_key_env_var()) {
                if !key.trim().is_empty() {
                    self.llm.api_key = key;
                }
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "sikum", "sikum")
            .context("Could not determine config directory")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&Self::default())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Fallback log filter when `RUST_LOG` is unset; `--verbose` forces debug.
    pub fn log_filter(&self, verbose: bool) -> &str {
        if verbose {
            return "debug";
        }
        match self.general.log_level.trim() {
            "" => "info",
            level => level,
        }
    }

    /// Directory that receives generated summary documents
    pub fn output_dir(&self) -> PathBuf {
        self.general
            .output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_openai_without_key() {
        let settings = Settings::default();
        assert_eq!(settings.llm.provider, "openai");
        assert!(settings.llm.api_key.is_empty());
        assert_eq!(settings.llm.effective_model(), "gpt-3.5-turbo");
        assert_eq!(settings.output_dir(), std::env::temp_dir());
        assert_eq!(settings.general.log_level, "info");
    }

    #[test]
    fn log_level_is_the_filter_unless_verbose() {
        let mut settings = Settings::default();
        settings.general.log_level = "warn".to_string();
        assert_eq!(settings.log_filter(false), "warn");
        assert_eq!(settings.log_filter(true), "debug");

        settings.general.log_level = "  ".to_string();
        assert_eq!(settings.log_filter(false), "info");
    }

    #[test]
    fn gemini_default_model() {
        let mut settings = Settings::default();
        settings.llm.provider = "Gemini".to_string();
        assert_eq!(settings.llm.effective_model(), "gemini-2.5-flash");
        assert_eq!(settings.llm.api_key_env_var(), "SIKUM_GEMINI_API_KEY");
    }

    #[test]
    fn env_key_fills_empty_api_key() {
        let mut settings = Settings::default();
        settings.apply_env_overrides(|name| {
            (name == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        });
        assert_eq!(settings.llm.api_key, "sk-test");
    }

    #[test]
    fn file_key_wins_over_env() {
        let mut settings = Settings::default();
        settings.llm.api_key = "from-file".to_string();
        settings.apply_env_overrides(|_| Some("from-env".to_string()));
        assert_eq!(settings.llm.api_key, "from-file");
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_env_overrides(|_| Some("   ".to_string()));
        assert!(settings.llm.api_key.is_empty());
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\noutput_dir = \"/srv/summaries\"\n\n[llm]\nmodel = \"gpt-4o-mini\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.output_dir(), PathBuf::from("/srv/summaries"));
        assert_eq!(settings.llm.effective_model(), "gpt-4o-mini");
        assert_eq!(settings.llm.provider, "openai");
        assert_eq!(settings.llm.timeout_secs, 120);
        assert_eq!(settings.general.log_level, "info");
    }

    #[test]
    fn log_level_reads_from_general_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.log_filter(false), "debug");
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Settings::write_default(&path).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.llm.provider, "openai");
    }
}
