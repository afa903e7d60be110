//! Configuration file resolution and loading
//!
//! Config file location follows a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`GAMELINK_CONFIG`)
//! 3. User config file (`<config dir>/gamelink/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A missing file never terminates the program: the loader logs a warning
//! and falls back to defaults. A file that exists but does not parse is an
//! error.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "GAMELINK_CONFIG";

/// Directory name under the platform config dir
const APP_DIR: &str = "gamelink";

/// File name of the user config file
const CONFIG_FILE_NAME: &str = "config.toml";

/// Where the effective configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line
    CommandLine(PathBuf),
    /// Path taken from `GAMELINK_CONFIG`
    Environment(PathBuf),
    /// Per-user config file found on disk
    UserFile(PathBuf),
    /// No file; compiled defaults apply
    Defaults,
}

impl ConfigSource {
    /// File path backing this source, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CommandLine(p) | ConfigSource::Environment(p) | ConfigSource::UserFile(p) => {
                Some(p.as_path())
            }
            ConfigSource::Defaults => None,
        }
    }
}

/// Resolves which config file (if any) to load
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
    env_var_name: String,
    user_config_dir: Option<PathBuf>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self {
            cli_path: None,
            env_var_name: CONFIG_ENV_VAR.to_string(),
            user_config_dir: dirs::config_dir().map(|d| d.join(APP_DIR)),
        }
    }

    /// Set the path passed on the command line
    pub fn with_cli_path(mut self, path: Option<PathBuf>) -> Self {
        self.cli_path = path;
        self
    }

    /// Override the directory searched for the user config file
    pub fn with_user_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_config_dir = dir;
        self
    }

    /// Apply the priority order and return the winning source
    pub fn resolve(&self) -> ConfigSource {
        if let Some(path) = &self.cli_path {
            return ConfigSource::CommandLine(path.clone());
        }

        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.trim().is_empty() {
                return ConfigSource::Environment(PathBuf::from(path));
            }
        }

        if let Some(dir) = &self.user_config_dir {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                return ConfigSource::UserFile(candidate);
            }
        }

        ConfigSource::Defaults
    }
}

/// Logging section shared by every gamelink binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter (overridden by `RUST_LOG`)
    pub level: String,
    /// Optional log file written in addition to stderr
    pub log_file: Option<PathBuf>,
    /// Emit ANSI colours on the console
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: None,
            ansi: true,
        }
    }
}

/// Load a TOML config of type `T` from `source`
///
/// Missing files degrade to `T::default()` with a warning.
pub fn load_toml_config<T>(source: &ConfigSource) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = source.path() else {
        tracing::debug!("No config file found, using compiled defaults");
        return Ok(T::default());
    };

    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Config file not found, using compiled defaults"
        );
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Parse TOML text into `T`; an empty document yields defaults
pub fn parse_toml_config<T>(content: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        logging: LoggingConfig,
        name: Option<String>,
    }

    #[test]
    fn cli_path_wins_over_everything() {
        let resolver = ConfigResolver::new()
            .with_cli_path(Some(PathBuf::from("/tmp/explicit.toml")))
            .with_user_config_dir(None);
        assert_eq!(
            resolver.resolve(),
            ConfigSource::CommandLine(PathBuf::from("/tmp/explicit.toml"))
        );
    }

    #[test]
    fn empty_document_yields_defaults() {
        let parsed: Sample = parse_toml_config("   \n").unwrap();
        assert_eq!(parsed, Sample::default());
    }

    #[test]
    fn partial_logging_section_keeps_other_defaults() {
        let parsed: Sample = parse_toml_config("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(parsed.logging.level, "debug");
        assert!(parsed.logging.ansi);
        assert!(parsed.logging.log_file.is_none());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let result: Result<Sample> = parse_toml_config("[logging\nlevel = 3");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
