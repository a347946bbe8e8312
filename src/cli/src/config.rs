use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{WrapErr, ensure};
use log::{debug, info};
use ncube_core::DEFAULT_SIDE_LENGTH;
use serde::{Deserialize, Serialize};

/// The largest cube the shell will build. Every line of history keeps a full
/// copy of the cube.
pub const MAX_SIDE_LENGTH: usize = 100;

/// Shell settings, read from a TOML file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Side length of the cube; zero falls back to 3
    pub side_length: usize,
    /// Color the stickers with terminal escape codes
    pub color: bool,
    /// Characters kept from each line typed at the prompt
    pub max_input_len: usize,
    /// How many commands can be undone
    pub history_limit: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            side_length: DEFAULT_SIDE_LENGTH,
            color: true,
            max_input_len: 16,
            history_limit: 1000,
        }
    }
}

impl ShellConfig {
    /// `<config dir>/ncube/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ncube").join("config.toml"))
    }

    /// Load the configuration from `path`, or from [`ShellConfig::default_path`]
    /// when no path is given. A missing default file gives the defaults; a
    /// missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<ShellConfig> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                other => {
                    debug!(target: "config", "No configuration file at {other:?}, using defaults");
                    return Ok(ShellConfig::default());
                }
            },
        };

        let text = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read configuration file {}", path.display()))?;
        let config = Self::parse(&text)
            .wrap_err_with(|| format!("Failed to parse configuration file {}", path.display()))?;

        info!(target: "config", "Loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> color_eyre::Result<ShellConfig> {
        let config = toml::from_str::<ShellConfig>(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Check the values that serde cannot. Run again after command line
    /// overrides.
    pub fn validate(&self) -> color_eyre::Result<()> {
        ensure!(
            self.side_length <= MAX_SIDE_LENGTH,
            "side_length must be at most {MAX_SIDE_LENGTH}, got {}",
            self.side_length
        );
        ensure!(self.max_input_len > 0, "max_input_len must be at least 1");

        Ok(())
    }
}
