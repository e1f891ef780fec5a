//! Configuration for the `agency` binary
//!
//! Read from `agency.toml` in the working directory, or from the file named
//! by `--config`. Every key is optional:
//!
//! ```toml
//! database_path = "agency.db"
//! startup_script = "user_inputs.txt"
//! fresh_start = true
//! log_profile = "quiet"
//! ```

use agency_core::errors::{ExError, ExErrorKind, Result};
use agency_core::logging_facility::Profile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "agency.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database_path: PathBuf,
    /// Run silently before the interactive menu when the file exists
    pub startup_script: PathBuf,
    /// Drop and recreate every table when a session starts
    pub fresh_start: bool,
    pub log_profile: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("agency.db"),
            startup_script: PathBuf::from("user_inputs.txt"),
            fresh_start: true,
            log_profile: "quiet".to_string(),
        }
    }
}

fn config_error(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(message)
}

impl Config {
    pub fn parse(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| config_error(e.to_string()))
    }

    /// Load from `explicit`, else from `agency.toml` if present, else defaults
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| config_error(format!("cannot read {}: {}", path.display(), e)))?;
        Config::parse(&content)
            .map_err(|e| config_error(format!("{}: {}", path.display(), e.message())))
    }

    /// Apply command-line flags on top of file values
    pub fn with_overrides(
        mut self,
        database_path: Option<PathBuf>,
        log_profile: Option<String>,
        keep_data: bool,
    ) -> Self {
        if let Some(path) = database_path {
            self.database_path = path;
        }
        if let Some(profile) = log_profile {
            self.log_profile = profile;
        }
        if keep_data {
            self.fresh_start = false;
        }
        self
    }

    pub fn profile(&self) -> Result<Profile> {
        self.log_profile.parse().map_err(config_error)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(config_error("database_path must not be empty"));
        }
        self.profile().map(|_| ())
    }
}
