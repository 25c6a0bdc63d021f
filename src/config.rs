//! Configuration loading from config.toml.
//!
//! Settings are resolved with the following priority (highest to lowest):
//! 1. Command line flags
//! 2. Environment variables (`TILE_MERGE_<SECTION>_<KEY>`)
//! 3. The config file: `--config`, `TILE_MERGE_CONFIG`, or one of
//!    [`CONFIG_SEARCH_PATHS`]
//! 4. Built-in defaults
//!
//! ```text
//! TILE_MERGE_LOG_LEVEL=debug
//! TILE_MERGE_BOARD_WIDTH=5
//! TILE_MERGE_GAME_SEED=42
//! TILE_MERGE_GAME_HIGH_SCORE_PATH=/tmp/scores.json
//! ```

use std::path::{Path, PathBuf};

use model::BoardConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

fn d_log_level() -> String {
    "info".into()
}
fn d_high_score_path() -> String {
    "high_score.json".into()
}
fn d_settle_delay_ms() -> u64 {
    100
}
fn d_color() -> bool {
    true
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub game: GameSection,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSection {
    /// Fixed seed for reproducible games; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "d_high_score_path")]
    pub high_score_path: String,
    /// Pause after an accepted move before the next command is read.
    #[serde(default = "d_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "d_color")]
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: d_log_level(),
            board: BoardConfig::default(),
            game: GameSection::default(),
        }
    }
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            seed: None,
            high_score_path: d_high_score_path(),
            settle_delay_ms: d_settle_delay_ms(),
            color: d_color(),
        }
    }
}

/// Loads the configuration, preferring `explicit` over the search paths.
pub fn load_config(explicit: Option<&Path>) -> AppConfig {
    if let Some(path) = explicit {
        info!("Loading config from {}", path.display());
        return load_from_path(path);
    }

    if let Ok(path) = std::env::var("TILE_MERGE_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from TILE_MERGE_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "TILE_MERGE_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(AppConfig::default())
}

/// Load configuration from a specific path, falling back to defaults on failure.
pub fn load_from_path(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(AppConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(AppConfig::default())
        }
    }
}

macro_rules! env_override {
    ($config:expr, $($field:ident).+, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$($field).+ = v;
        }
    };
    ($config:expr, $($field:ident).+, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$($field).+ = v;
        }
    };
    ($config:expr, $($field:ident).+, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$($field).+ = Some(v);
        }
    };
}

/// Apply `TILE_MERGE_<SECTION>_<KEY>` environment variables. Values that
/// fail to parse are ignored.
pub fn apply_env_overrides(mut config: AppConfig) -> AppConfig {
    env_override!(config, log_level, "TILE_MERGE_LOG_LEVEL");

    env_override!(config, board.width, "TILE_MERGE_BOARD_WIDTH", parse);
    env_override!(config, board.height, "TILE_MERGE_BOARD_HEIGHT", parse);
    env_override!(
        config,
        board.initial_tiles,
        "TILE_MERGE_BOARD_INITIAL_TILES",
        parse
    );

    env_override!(config, game.seed, "TILE_MERGE_GAME_SEED", optional_parse);
    env_override!(
        config,
        game.high_score_path,
        "TILE_MERGE_GAME_HIGH_SCORE_PATH"
    );
    env_override!(
        config,
        game.settle_delay_ms,
        "TILE_MERGE_GAME_SETTLE_DELAY_MS",
        parse
    );
    env_override!(config, game.color, "TILE_MERGE_GAME_COLOR", parse);

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.board, BoardConfig::default());
        assert_eq!(config.game.seed, None);
        assert_eq!(config.game.high_score_path, "high_score.json");
        assert_eq!(config.game.settle_delay_ms, 100);
        assert!(config.game.color);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
log_level = "debug"

[board]
height = 6
initial_tiles = 3

[game]
high_score_path = "/tmp/best.json"
color = false
"#,
        )
        .unwrap();
        let config = load_from_path(&path);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.board.height, 6);
        assert_eq!(config.board.initial_tiles, 3);
        assert_eq!(config.game.high_score_path, "/tmp/best.json");
        assert!(!config.game.color);
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[board\nwidth = ").unwrap();
        let config = load_from_path(&path);
        assert_eq!(config.board.height, 4);
        assert_eq!(config.game.high_score_path, "high_score.json");

        let config = load_from_path(&dir.path().join("missing.toml"));
        assert_eq!(config.log_level, AppConfig::default().log_level);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("TILE_MERGE_GAME_SEED", "1234");
        std::env::set_var("TILE_MERGE_GAME_SETTLE_DELAY_MS", "not a number");
        let config = apply_env_overrides(AppConfig::default());
        std::env::remove_var("TILE_MERGE_GAME_SEED");
        std::env::remove_var("TILE_MERGE_GAME_SETTLE_DELAY_MS");

        assert_eq!(config.game.seed, Some(1234));
        assert_eq!(config.game.settle_delay_ms, 100);
    }
}
