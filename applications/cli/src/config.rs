/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "lollypop.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Options for the `play` command
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Tracks to print when `--count` is not given
    #[serde(default = "default_count")]
    pub count: usize,

    /// Fixed shuffle seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `lollypop.toml` is read when
    /// present. `LOLLYPOP_*` variables override both, nested keys use `__`
    /// (e.g. `LOLLYPOP_PLAYBACK__SEED`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("LOLLYPOP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(CliError::Config(format!(
                "database_url must be a sqlite URL, got {:?}",
                self.database_url
            )));
        }

        Ok(())
    }
}

// Default values
fn default_database_url() -> String {
    "sqlite://lollypop.db".to_string()
}

fn default_count() -> usize {
    10
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            seed: None,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            playback: PlaybackConfig::default(),
        }
    }
}
