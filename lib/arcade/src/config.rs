//! Session settings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tetrion::LockDelay;

/// Fewest visible rows that still fit a spawned piece box.
pub const MIN_ROWS: i8 = 4;
/// Most visible rows the playfield can address, leaving room for the floor and guard rows.
pub const MAX_ROWS: i8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Frames per row of gravity.
    pub gravity: u16,
    pub lock_delay_move: u8,
    pub lock_delay_step: u8,
    /// Visible rows above the floor.
    pub rows: i8,
}

impl Default for Config {
    fn default() -> Self {
        let delay = LockDelay::default();
        Self {
            gravity: 60,
            lock_delay_move: delay.moves,
            lock_delay_step: delay.steps,
            rows: 20,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity == 0 {
            return Err(ConfigError::Gravity);
        }
        if !(MIN_ROWS..=MAX_ROWS).contains(&self.rows) {
            return Err(ConfigError::Rows(self.rows));
        }
        Ok(())
    }

    pub fn lock_delay(&self) -> LockDelay {
        LockDelay {
            moves: self.lock_delay_move,
            steps: self.lock_delay_step,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("gravity must be at least one frame per row")]
    Gravity,
    #[error("visible rows out of range: {0}")]
    Rows(i8),
}

impl FromStr for Config {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serde_json::to_string(self)
            .map_err(|_| std::fmt::Error)
            .and_then(|s| f.write_str(&s))
    }
}
