//! Game tuning: level table, clocks, speeds and scoring deltas.
//!
//! Every field has a default matching the shipped game, so a JSON override
//! file only needs the keys it changes:
//!
//! ```
//! use waste_drop_core::GameConfig;
//!
//! let cfg: GameConfig = serde_json::from_str(r#"{ "reward": 20 }"#).unwrap();
//! assert_eq!(cfg.reward, 20);
//! assert_eq!(cfg.target_score(1), Some(250));
//! assert_eq!(cfg.time_budget(5), 40);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{
    BASE_DROP_SPEED, BASE_TIME_SECS, CORRECT_REWARD, COUNTDOWN_INTERVAL_MS, DROP_INTERVAL_MS,
    DROP_SPEED_STEP, LEVEL_TARGETS, MIN_TIME_SECS, TIME_STEP_SECS, WRONG_PENALTY,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target score per level; its length is the number of levels.
    pub level_targets: Vec<u32>,
    pub base_time_secs: u32,
    pub time_step_secs: u32,
    pub min_time_secs: u32,
    pub base_drop_speed: f32,
    pub drop_speed_step: f32,
    pub reward: u32,
    pub penalty: u32,
    pub drop_interval_ms: u32,
    pub countdown_interval_ms: u32,
    /// Items queued per level. `None` queues one item per second of budget.
    pub items_per_level: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level_targets: LEVEL_TARGETS.to_vec(),
            base_time_secs: BASE_TIME_SECS,
            time_step_secs: TIME_STEP_SECS,
            min_time_secs: MIN_TIME_SECS,
            base_drop_speed: BASE_DROP_SPEED,
            drop_speed_step: DROP_SPEED_STEP,
            reward: CORRECT_REWARD,
            penalty: WRONG_PENALTY,
            drop_interval_ms: DROP_INTERVAL_MS,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            items_per_level: None,
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoLevels,
    ZeroInterval(&'static str),
    ZeroTimeBudget,
    NegativeSpeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoLevels => write!(f, "level_targets must not be empty"),
            ConfigError::ZeroInterval(name) => write!(f, "{name} must be greater than zero"),
            ConfigError::ZeroTimeBudget => write!(f, "every level needs at least one second"),
            ConfigError::NegativeSpeed => write!(f, "drop speeds must not be negative"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level_targets.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("drop_interval_ms"));
        }
        if self.countdown_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("countdown_interval_ms"));
        }
        if (1..=self.max_level()).any(|l| self.time_budget(l) == 0) {
            return Err(ConfigError::ZeroTimeBudget);
        }
        if self.base_drop_speed < 0.0 || self.drop_speed_step < 0.0 {
            return Err(ConfigError::NegativeSpeed);
        }
        Ok(())
    }

    pub fn max_level(&self) -> u32 {
        self.level_targets.len() as u32
    }

    /// Target score of a 1-based level, `None` outside the table.
    pub fn target_score(&self, level: u32) -> Option<u32> {
        let idx = level.checked_sub(1)? as usize;
        self.level_targets.get(idx).copied()
    }

    /// `max(min_time, base_time - (level - 1) * step)` in seconds.
    pub fn time_budget(&self, level: u32) -> u32 {
        let cut = level.saturating_sub(1).saturating_mul(self.time_step_secs);
        self.base_time_secs
            .saturating_sub(cut)
            .max(self.min_time_secs)
    }

    /// Fall speed of items released during `level`.
    pub fn drop_speed(&self, level: u32) -> f32 {
        self.base_drop_speed + level.saturating_sub(1) as f32 * self.drop_speed_step
    }

    pub fn items_for_level(&self, level: u32) -> u32 {
        self.items_per_level
            .unwrap_or_else(|| self.time_budget(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_levels() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.max_level(), 5);
        let expected = [(1, 250), (2, 300), (3, 400), (4, 500), (5, 550)];
        for (level, target) in expected {
            assert_eq!(cfg.target_score(level), Some(target));
        }
        assert_eq!(cfg.target_score(0), None);
        assert_eq!(cfg.target_score(6), None);
    }

    #[test]
    fn time_budget_formula() {
        let cfg = GameConfig::default();
        for level in 1..=5u32 {
            let expected = 60i64 - (level as i64 - 1) * 5;
            assert_eq!(cfg.time_budget(level) as i64, expected.max(30));
        }
        // Floor kicks in past the shipped table.
        assert_eq!(cfg.time_budget(8), 30);
        assert_eq!(cfg.time_budget(100), 30);
    }

    #[test]
    fn drop_speed_grows_per_level() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.drop_speed(1), 150.0);
        assert_eq!(cfg.drop_speed(2), 200.0);
        assert_eq!(cfg.drop_speed(5), 350.0);
        for level in 1..5 {
            assert!(cfg.drop_speed(level + 1) > cfg.drop_speed(level));
        }
    }

    #[test]
    fn items_default_to_time_budget() {
        let mut cfg = GameConfig::default();
        assert_eq!(cfg.items_for_level(1), 60);
        assert_eq!(cfg.items_for_level(5), 40);
        cfg.items_per_level = Some(3);
        assert_eq!(cfg.items_for_level(5), 3);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert_eq!(GameConfig::default().validate(), Ok(()));

        let cfg = GameConfig {
            level_targets: vec![],
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoLevels));

        let cfg = GameConfig {
            drop_interval_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroInterval("drop_interval_ms")));

        let cfg = GameConfig {
            base_time_secs: 0,
            min_time_secs: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTimeBudget));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{ "level_targets": [10, 20], "penalty": 1 }"#).unwrap();
        assert_eq!(cfg.max_level(), 2);
        assert_eq!(cfg.penalty, 1);
        assert_eq!(cfg.reward, 10);
        assert_eq!(cfg.base_time_secs, 60);
    }
}
