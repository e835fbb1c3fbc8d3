//! Application configuration management.
//!
//! Settings are layered with figment, later layers overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory, or the file given
//!    with `--config`
//! 3. `NAMEDUPE_*` environment variables (e.g. `NAMEDUPE_TARGET_DIR`)
//!
//! Command-line flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::report::DEFAULT_MAX_REPORT_NAMES;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "NAMEDUPE_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base name of duplication reports.
    pub report_name: String,
    /// Base name of the unreadable-files log written during consolidation.
    pub unreadable_report_name: String,
    /// Top-level directory consolidated files are copied into.
    pub target_dir: PathBuf,
    /// Number of candidate report names tried before giving up.
    pub max_report_names: usize,
    /// Skip files whose names start with `.`.
    pub skip_hidden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_name: "duplication-report".to_string(),
            unreadable_report_name: "unreadable-files-report".to_string(),
            target_dir: PathBuf::from("DEDUPLICATED"),
            max_report_names: DEFAULT_MAX_REPORT_NAMES,
            skip_hidden: true,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// With `explicit` set, that file must exist; otherwise the default
    /// config file is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or any layer fails
    /// to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::config_path(),
        };

        let config: Config = Self::figment(path.as_deref())
            .extract()
            .with_context(|| match &path {
                Some(p) => format!("Invalid configuration in {}", p.display()),
                None => "Invalid configuration".to_string(),
            })?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Build the figment for an optional config file.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Default platform-specific configuration path, if one can be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "namedupe", "namedupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
