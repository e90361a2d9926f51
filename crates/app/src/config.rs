//! Runtime configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `WASTE_DROP_SEED` | item sequence seed | wall clock |
//! | `WASTE_DROP_CONFIG` | JSON file with a `GameConfig` | built-in table |
//! | `WASTE_DROP_THEME` | JSON theme file | built-in theme |
//! | `WASTE_DROP_START_LEVEL` | skip the menu and start here | unset |
//! | `WASTE_DROP_LOG` | log file | `waste-drop.log` |
//! | `WASTE_DROP_MUSIC_VOLUME` | music volume `0.0..=1.0` | `0.1` |

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use waste_drop_core::GameConfig;

use crate::types::DEFAULT_MUSIC_VOLUME;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: u32,
    pub game_config_path: Option<PathBuf>,
    pub theme_path: Option<PathBuf>,
    pub start_level: Option<u32>,
    pub log_path: PathBuf,
    pub music_volume: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            game_config_path: None,
            theme_path: None,
            start_level: None,
            log_path: PathBuf::from("waste-drop.log"),
            music_volume: DEFAULT_MUSIC_VOLUME,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::from_lookup(|key| env::var(key).ok());
        if env::var("WASTE_DROP_SEED").is_err() {
            config.seed = clock_seed();
        }
        config
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let seed = lookup("WASTE_DROP_SEED")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(defaults.seed);
        let game_config_path = lookup("WASTE_DROP_CONFIG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let theme_path = lookup("WASTE_DROP_THEME")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let start_level = lookup("WASTE_DROP_START_LEVEL")
            .and_then(|v| v.trim().parse::<u32>().ok());
        let log_path = lookup("WASTE_DROP_LOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);
        let music_volume = lookup("WASTE_DROP_MUSIC_VOLUME")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(defaults.music_volume);

        Self {
            seed,
            game_config_path,
            theme_path,
            start_level,
            log_path,
            music_volume,
        }
    }

    /// The game rules: the configured JSON file, or the built-in table.
    pub fn load_game_config(&self) -> Result<GameConfig> {
        match &self.game_config_path {
            Some(path) => load_game_config(path),
            None => Ok(GameConfig::default()),
        }
    }
}

pub fn load_game_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read game config {}", path.display()))?;
    parse_game_config(&text).with_context(|| format!("invalid game config {}", path.display()))
}

pub fn parse_game_config(text: &str) -> Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(text)?;
    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
