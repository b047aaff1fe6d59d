//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and turn logic.
//! It has **no dependencies** on rendering, audio, input, networking, or I/O,
//! making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is exercised without a clock or a window
//! - **Portable**: Drives a headless runner, a multiplayer client, or a benchmark
//!
//! # Module Structure
//!
//! - [`pieces`]: The fifteen 3x3 shapes and 90° rotation
//! - [`board`]: Grid with placement, collision and row/column detection
//! - [`scoring`]: Line-clear points, level curve and turn delay
//! - [`rng`]: Piece sources (seeded random, server-fed queue)
//! - [`timer`]: Single-shot cancellable turn countdown
//! - [`events`]: Typed events delivered to subscribers
//! - [`engine`]: The turn state machine tying it all together
//! - [`snapshot`]: Serializable view of an engine
//! - [`config`]: Construction-time configuration
//!
//! # Game Rules
//!
//! - **Placement**: The current piece is centred on the chosen block; it must
//!   land entirely on empty, in-bounds cells.
//! - **Line clears**: Full rows *and* full columns are emptied after every
//!   placement.
//! - **Scoring**: `lines x distinct blocks x multiplier x 10`.
//! - **Multiplier**: +1 after each clearing placement, back to 1 otherwise.
//! - **Levels**: One per 1000 points; each level shortens the turn by 500ms
//!   down to 2500ms.
//! - **Lives**: Letting the turn timer run out costs a life and skips the
//!   piece; running out with no lives left ends the game.
//!
//! # Example
//!
//! ```
//! use tetrecs_core::{GameConfig, GameEngine};
//!
//! let mut game = GameEngine::single_player(GameConfig::default()).unwrap();
//! game.start().unwrap();
//!
//! // Find somewhere the current piece fits and place it there
//! let piece = game.current_piece().unwrap();
//! let (x, y) = (1..4)
//!     .flat_map(|x| (1..4).map(move |y| (x, y)))
//!     .find(|&(x, y)| game.board().can_place(&piece, x, y))
//!     .unwrap();
//! game.attempt_place(x, y).unwrap();
//!
//! assert_eq!(game.lives(), 3);
//! assert_eq!(game.turn_timer().remaining_ms(), Some(12_000));
//! ```
//!
//! # Timing
//!
//! The engine never reads a clock. Call [`GameEngine::tick`](engine::GameEngine::tick)
//! with elapsed milliseconds; when the pending turn deadline is reached the
//! engine handles the expiry itself.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use tetrecs_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LineScan};
pub use config::GameConfig;
pub use engine::{GameEngine, Phase, PiecePair, PlacementOutcome, TurnExpiry};
pub use error::GameError;
pub use events::{GameEvent, Listener};
pub use pieces::{create_piece, rotate, Piece};
pub use rng::{PieceSource, QueuedPieceSource, RandomPieceSource, SimpleRng};
pub use scoring::{calculate_score, compute_delay, level_for_score, ScoreResult};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use timer::TurnTimer;
