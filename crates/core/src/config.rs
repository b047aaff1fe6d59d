//! Game configuration
//!
//! Everything the engine needs is passed in once at construction; there are
//! no process-wide settings.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, STARTING_LIVES};

/// Smallest board edge that can hold a 3x3 piece
pub const MIN_BOARD_EDGE: u8 = 3;

/// Largest supported board edge
pub const MAX_BOARD_EDGE: u8 = 64;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cols: u8,
    pub rows: u8,
    pub lives: u32,
    /// Seed for the random piece source (single-player)
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            lives: STARTING_LIVES,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// Reads `TETRECS_COLS`, `TETRECS_ROWS`, `TETRECS_LIVES` and `TETRECS_SEED`.
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let cols = env::var("TETRECS_COLS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cols);
        let rows = env::var("TETRECS_ROWS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.rows);
        let lives = env::var("TETRECS_LIVES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.lives);
        let seed = env::var("TETRECS_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            cols,
            rows,
            lives,
            seed,
        }
    }

    /// Square board of the given edge, other settings default
    pub fn with_size(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        for (name, edge) in [("cols", self.cols), ("rows", self.rows)] {
            if !(MIN_BOARD_EDGE..=MAX_BOARD_EDGE).contains(&edge) {
                return Err(GameError::InvalidConfig {
                    reason: format!(
                        "{name} must be within {MIN_BOARD_EDGE}..={MAX_BOARD_EDGE}, got {edge}"
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_by_five_with_three_lives() {
        let config = GameConfig::default();
        assert_eq!((config.cols, config.rows), (5, 5));
        assert_eq!(config.lives, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_tiny_and_huge_boards() {
        assert!(GameConfig::with_size(2, 5).validate().is_err());
        assert!(GameConfig::with_size(5, 65).validate().is_err());
        assert!(GameConfig::with_size(3, 64).validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"cols": 8}"#).unwrap();
        assert_eq!(config.cols, 8);
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.lives, STARTING_LIVES);
    }
}
