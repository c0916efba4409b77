/// Player configuration, loaded once at startup from a TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FPS;
use crate::error::GameError;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "ARCHERY_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frames per second of the game loop.
    pub fps: u32,
    /// Play the shoot effect when an arrow is loosed.
    pub sound_effects: bool,
    /// Background music on/off.
    pub music: bool,
    /// Text tile map to draw behind the play field.  A meadow is
    /// generated when unset.
    pub tile_map: Option<PathBuf>,
    /// Seed for the generated meadow.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            sound_effects: true,
            music: true,
            tile_map: None,
            seed: None,
        }
    }
}

impl Config {
    /// Time budget for one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Where the config file lives: `$ARCHERY_CONFIG`, else the platform
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "archery").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from `path`.  A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, GameError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(GameError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml_str(&text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load() -> Result<Self, GameError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}
