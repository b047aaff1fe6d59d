use crate::engine::Phase;

/// Errors returned by board and engine operations.
///
/// None of these are fatal: the operation that produced them left all
/// engine state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("piece cannot be placed at ({x}, {y})")]
    InvalidPlacement { x: i8, y: i8 },

    #[error("block ({x}, {y}) is outside the board")]
    OutOfBounds { x: u8, y: u8 },

    #[error("cell value {value} is outside 0..=15")]
    InvalidCellValue { value: u8 },

    #[error("game is not running (phase: {phase})")]
    NotRunning { phase: Phase },

    #[error("game has already been started")]
    AlreadyStarted,

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
