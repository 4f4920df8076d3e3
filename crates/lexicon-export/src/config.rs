//! Configuration for the export engine
//!
//! Every path is injected here rather than held globally, so tests can
//! point the engine at temporary directories.

use lexicon_hunspell::Unmunch;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ExportError;

/// Placeholder replaced by the project code in URL paths and identifiers
const CODE_PLACEHOLDER: &str = "{code}";

/// Configuration for exports
///
/// # Examples
///
/// ```
/// use lexicon_export::ExportConfig;
///
/// let config = ExportConfig::default();
/// assert_eq!(config.update_url_path("kgu"), "/lexicon/kgu/oxt-update");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported files are published to
    pub export_dir: PathBuf,

    /// Directory holding the package templates
    pub template_dir: PathBuf,

    /// Expansion tool program, used as given (may contain spaces)
    pub unmunch_command: String,

    /// Arguments placed before the word list and affix file paths
    pub unmunch_args: Vec<String>,

    /// Maximum time for a single expansion run (seconds)
    pub expansion_timeout_secs: u64,

    /// Header count for seed lists that lack one
    pub default_count: usize,

    /// Update-check path embedded in the package description
    pub update_path: String,

    /// Download path advertised in update notifications
    pub download_path: String,

    /// Extension identifier advertised in update notifications
    pub extension_identifier: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("data/exports"),
            template_dir: PathBuf::from("templates/oxt"),
            unmunch_command: lexicon_hunspell::DEFAULT_COMMAND.to_string(),
            unmunch_args: Vec::new(),
            expansion_timeout_secs: lexicon_hunspell::DEFAULT_TIMEOUT.as_secs(),
            default_count: lexicon_hunspell::DEFAULT_COUNT,
            update_path: "/lexicon/{code}/oxt-update".to_string(),
            download_path: "/lexicon/{code}/latest-oxt".to_string(),
            extension_identifier: "NTMPNG {code} extension".to_string(),
        }
    }
}

impl ExportConfig {
    /// Get the expansion timeout as a Duration
    pub fn expansion_timeout(&self) -> Duration {
        Duration::from_secs(self.expansion_timeout_secs)
    }

    /// Update-check path for a project
    pub fn update_url_path(&self, code: &str) -> String {
        self.update_path.replace(CODE_PLACEHOLDER, code)
    }

    /// Package download path for a project
    pub fn download_url_path(&self, code: &str) -> String {
        self.download_path.replace(CODE_PLACEHOLDER, code)
    }

    /// Extension identifier for a project
    pub fn extension_identifier_for(&self, code: &str) -> String {
        self.extension_identifier.replace(CODE_PLACEHOLDER, code)
    }

    /// Build the expansion tool wrapper described by this configuration
    pub fn expander(&self) -> Unmunch {
        self.unmunch_args
            .iter()
            .fold(Unmunch::new(&self.unmunch_command), |unmunch, arg| unmunch.arg(arg))
            .with_timeout(self.expansion_timeout())
            .with_default_count(self.default_count)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.export_dir.as_os_str().is_empty() {
            return Err("export_dir must not be empty".to_string());
        }
        if self.template_dir.as_os_str().is_empty() {
            return Err("template_dir must not be empty".to_string());
        }
        if self.unmunch_command.trim().is_empty() {
            return Err("unmunch_command must not be empty".to_string());
        }
        if self.expansion_timeout_secs == 0 {
            return Err("expansion_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents).map_err(ExportError::Config)?;
        config.validate().map_err(ExportError::Config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export_dir, PathBuf::from("data/exports"));
        assert_eq!(config.expansion_timeout(), Duration::from_secs(60));
        assert_eq!(config.default_count, 100);
    }

    #[test]
    fn test_code_placeholders() {
        let config = ExportConfig::default();
        assert_eq!(config.update_url_path("kgu"), "/lexicon/kgu/oxt-update");
        assert_eq!(config.download_url_path("kgu"), "/lexicon/kgu/latest-oxt");
        assert_eq!(config.extension_identifier_for("kgu"), "NTMPNG kgu extension");
    }

    #[test]
    fn test_invalid_timeout() {
        let config = ExportConfig {
            expansion_timeout_secs: 0,
            ..ExportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_command_is_invalid() {
        let config = ExportConfig {
            unmunch_command: "  ".to_string(),
            ..ExportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExportConfig::from_toml("export_dir = \"/tmp/out\"\nexpansion_timeout_secs = 5").unwrap();
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.expansion_timeout_secs, 5);
        assert_eq!(config.template_dir, PathBuf::from("templates/oxt"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExportConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExportConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_expander_from_program_and_args() {
        let config = ExportConfig {
            unmunch_command: "sh".to_string(),
            unmunch_args: vec!["fake.sh".to_string()],
            expansion_timeout_secs: 9,
            ..ExportConfig::default()
        };
        let expander = config.expander();
        assert_eq!(expander.program(), "sh");
        assert_eq!(expander.args(), ["fake.sh"]);
        assert_eq!(expander.timeout(), Duration::from_secs(9));
    }

    #[test]
    fn test_program_path_with_spaces_is_not_split() {
        let config = ExportConfig::from_toml(
            "unmunch_command = \"/opt/hunspell tools/unmunch\"\nunmunch_args = [\"--flag value\"]",
        )
        .unwrap();
        let expander = config.expander();
        assert_eq!(expander.program(), "/opt/hunspell tools/unmunch");
        assert_eq!(expander.args(), ["--flag value"]);
    }
}
