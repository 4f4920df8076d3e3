//! Configuration management for the CLI.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use lexicon_export::ExportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG: &str = "lexicon.toml";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database holding the lexicon
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Base URL that absolute links are built from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Export engine settings
    #[serde(default)]
    pub export: ExportConfig,
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
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

impl Config {
    /// Per-user configuration file path, if the platform has a config dir.
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lexicon").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `./lexicon.toml` and then
    /// the per-user file are tried, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG)).chain(Self::user_path());
        for path in candidates {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Read and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CliError::Config("base_url cannot be empty".to_string()));
        }
        self.export.validate().map_err(CliError::Config)
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(db) = &cli.db {
            self.database = db.clone();
        }
        if let Some(dir) = &cli.export_dir {
            self.export.export_dir = dir.clone();
        }
        if let Some(url) = &cli.base_url {
            self.base_url = url.clone();
        }
        if let Some(output) = cli.output {
            self.settings.format = output.into();
        }
        if cli.no_color {
            self.settings.color = false;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            base_url: default_base_url(),
            settings: Settings::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("data/lexicon.db")
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}
