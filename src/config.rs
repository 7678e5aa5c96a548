//! Dashboard Configuration
//! Optional JSON settings file; every field falls back to a default.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "HOOPSCOPE_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hoopscope.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// User-tunable dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub games_file: String,
    pub players_file: String,
    pub rankings_file: String,
    pub default_season_range: (i32, i32),
    pub default_player: String,
    pub leader_min_points: f64,
    pub export_dir: PathBuf,
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            games_file: "master_games.csv".to_string(),
            players_file: "master_player_stats.csv".to_string(),
            rankings_file: "ranking.csv".to_string(),
            default_season_range: (2010, 2022),
            default_player: "LeBron James".to_string(),
            leader_min_points: 10.0,
            export_dir: PathBuf::from("exports"),
            log_filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file from disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Resolve the config: `HOOPSCOPE_CONFIG` first, then `hoopscope.json`,
    /// then defaults. An explicitly named file must exist.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            Self::from_file(local)
        } else {
            Ok(Self::default())
        }
    }

    /// Full path of the games file.
    pub fn games_path(&self) -> PathBuf {
        self.data_dir.join(&self.games_file)
    }

    /// Full path of the player stats file.
    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(&self.players_file)
    }

    /// Full path of the rankings file.
    pub fn rankings_path(&self) -> PathBuf {
        self.data_dir.join(&self.rankings_file)
    }
}
