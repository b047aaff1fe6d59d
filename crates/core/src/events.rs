//! Engine events
//!
//! The engine never holds a reference to its presentation. Observers register
//! a [`Listener`] with `GameEngine::subscribe` and receive every event
//! synchronously, in registration order, right after the state change that
//! produced it.

use crate::pieces::Piece;
use crate::types::BlockCoord;

/// Something that happened inside the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Current and/or following piece changed (advance, rotate, swap)
    PieceChanged { current: Piece, following: Piece },
    /// A piece was written onto the board at anchor (x, y)
    PiecePlaced { piece: Piece, x: i8, y: i8 },
    /// Full lines were cleared; cells are the distinct blocks emptied
    LineCleared { cells: Vec<BlockCoord> },
    ScoreChanged { score: u32 },
    MultiplierChanged { multiplier: u32 },
    LevelUp { level: u32 },
    /// The turn timer ran out and a life was taken
    LifeLost { remaining: u32 },
    GameOver,
    /// A new turn timer was scheduled
    TurnTick { delay_ms: u32 },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PieceChanged { .. } => "piece-changed",
            GameEvent::PiecePlaced { .. } => "piece-placed",
            GameEvent::LineCleared { .. } => "line-cleared",
            GameEvent::ScoreChanged { .. } => "score-changed",
            GameEvent::MultiplierChanged { .. } => "multiplier-changed",
            GameEvent::LevelUp { .. } => "level-up",
            GameEvent::LifeLost { .. } => "life-lost",
            GameEvent::GameOver => "game-over",
            GameEvent::TurnTick { .. } => "turn-tick",
        }
    }
}

/// Event callback registered on the engine
pub type Listener = Box<dyn FnMut(&GameEvent) + Send>;
