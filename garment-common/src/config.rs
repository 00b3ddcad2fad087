//! Configuration file resolution and TOML loading
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`GARMENT_<MODULE>_CONFIG`)
//! 3. Platform config directory (`<config_dir>/garment/garment-<module>.toml`)
//! 4. Compiled defaults (no file)

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default log level when neither `RUST_LOG` nor the config file set one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `[logging]` section shared by every garment service config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive string (e.g. "info", "garment_ai=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Where a resolved config file path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    UserConfigDir,
}

/// Resolves the config file for one garment module
pub struct ConfigFileResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
}

impl ConfigFileResolver {
    /// Create resolver for a module (e.g. "ai" → `GARMENT_AI_CONFIG`, `garment-ai.toml`)
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_arg: None,
        }
    }

    /// Set the command-line override (highest priority)
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Environment variable consulted at priority 2
    pub fn env_var_name(&self) -> String {
        format!(
            "GARMENT_{}_CONFIG",
            self.module_name.to_uppercase().replace('-', "_")
        )
    }

    /// File name looked up in the platform config directory
    pub fn file_name(&self) -> String {
        format!("garment-{}.toml", self.module_name)
    }

    /// Resolve the config file path, or `None` when compiled defaults apply
    ///
    /// Command-line and environment paths are returned even when the file does
    /// not exist; [`load_toml_config`] reports that case. The platform default is
    /// only returned when the file exists.
    pub fn resolve(&self) -> Option<(PathBuf, ConfigSource)> {
        if let Some(path) = &self.cli_arg {
            return Some((path.clone(), ConfigSource::CommandLine));
        }

        if let Ok(path) = std::env::var(self.env_var_name()) {
            if !path.trim().is_empty() {
                return Some((PathBuf::from(path), ConfigSource::Environment));
            }
        }

        let user_config = dirs::config_dir().map(|d| d.join("garment").join(self.file_name()));
        match user_config {
            Some(path) if path.exists() => Some((path, ConfigSource::UserConfigDir)),
            _ => None,
        }
    }
}

/// Load and parse a TOML config file, falling back to `T::default()`
///
/// - `None` path: compiled defaults
/// - path that does not exist: warning + compiled defaults
/// - file that exists but does not parse: `Error::Config`
/// - file that exists but cannot be read: `Error::Io`
pub fn load_toml_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        info!("No config file found, using compiled defaults");
        return Ok(T::default());
    };

    if !path.exists() {
        warn!(
            "Config file {} does not exist, using compiled defaults",
            path.display()
        );
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Read a non-empty environment variable
pub fn env_override(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
