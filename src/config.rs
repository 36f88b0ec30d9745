use crate::consts;
use crate::session::SessionConfig;
use crate::util::Rgb;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file.
///
/// Only the fields in [`SessionConfig`] reach the game engine, and only as
/// a snapshot taken at session creation; `command_prefix` and
/// `startup_activity` are carried for the host chat shell.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    pub grid_height: usize,
    pub grid_width: usize,
    /// Minutes between ticks
    pub update_frequency: u64,
    pub twitter_controls: bool,
    pub tie_threshold: u8,
    pub embed_color: Rgb,
    pub command_prefix: String,
    pub startup_activity: String,
}

impl Config {
    /// Return the default configuration file path
    ///
    /// # Errors
    ///
    /// Returns `Err` if the local configuration directory could not be
    /// determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snakevote").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist
    /// and `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's
    /// contents could not be deserialized or validated.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Capture the session-creation snapshot of this configuration
    pub fn snapshot(&self) -> SessionConfig {
        SessionConfig {
            grid_height: self.grid_height,
            grid_width: self.grid_width,
            update_frequency: self.update_frequency,
            twitter_controls: self.twitter_controls,
            tie_threshold: self.tie_threshold,
            embed_color: self.embed_color,
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            grid_height: consts::DEFAULT_GRID_HEIGHT,
            grid_width: consts::DEFAULT_GRID_WIDTH,
            update_frequency: consts::DEFAULT_UPDATE_FREQUENCY,
            twitter_controls: false,
            tie_threshold: consts::DEFAULT_TIE_THRESHOLD,
            embed_color: consts::DEFAULT_EMBED_COLOR,
            command_prefix: consts::DEFAULT_COMMAND_PREFIX.to_owned(),
            startup_activity: consts::DEFAULT_STARTUP_ACTIVITY.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawConfig {
    grid_height: usize,
    grid_width: usize,
    update_frequency: u64,
    twitter_controls: bool,
    tie_threshold: u8,
    embed_color: Rgb,
    command_prefix: String,
    startup_activity: String,
}

impl Default for RawConfig {
    fn default() -> RawConfig {
        let defaults = Config::default();
        RawConfig {
            grid_height: defaults.grid_height,
            grid_width: defaults.grid_width,
            update_frequency: defaults.update_frequency,
            twitter_controls: defaults.twitter_controls,
            tie_threshold: defaults.tie_threshold,
            embed_color: defaults.embed_color,
            command_prefix: defaults.command_prefix,
            startup_activity: defaults.startup_activity,
        }
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = InvalidConfig;

    fn try_from(value: RawConfig) -> Result<Config, InvalidConfig> {
        if value.grid_height.saturating_mul(value.grid_width) < 2 {
            return Err(InvalidConfig::GridTooSmall);
        }
        if value.update_frequency == 0 {
            return Err(InvalidConfig::ZeroFrequency);
        }
        if value.tie_threshold > 100 {
            return Err(InvalidConfig::TieThreshold(value.tie_threshold));
        }
        Ok(Config {
            grid_height: value.grid_height,
            grid_width: value.grid_width,
            update_frequency: value.update_frequency,
            twitter_controls: value.twitter_controls,
            tie_threshold: value.tie_threshold,
            embed_color: value.embed_color,
            command_prefix: value.command_prefix,
            startup_activity: value.startup_activity,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum InvalidConfig {
    #[error("grid must have at least two cells")]
    GridTooSmall,
    #[error("update-frequency must be at least one minute")]
    ZeroFrequency,
    #[error("tie-threshold {0} is not a percentage")]
    TieThreshold(u8),
}
