//! Multiplayer module - server-fed pieces and a shared leaderboard
//!
//! A multiplayer game is an ordinary [`GameEngine`](tetrecs_core::GameEngine)
//! whose pieces come from the server instead of a local RNG. This crate adds
//! the pieces around it:
//!
//! - [`protocol`]: the line-oriented text messages, parsed and rendered
//! - [`leaderboard`]: per-player scores kept across `SCORES` snapshots, sorted for display
//! - [`coordinator`]: wires the engine to the server; asks for pieces, starts
//!   the engine once enough have arrived and publishes score, lives, board and
//!   death as they change
//! - [`runtime`]: the single task that owns a game and serialises commands,
//!   transport messages and turn expiry
//!
//! # Piece resupply
//!
//! - `begin()` asks for the leaderboard and a batch of 5 pieces.
//! - Every committed placement asks for one more.
//! - Every lost life asks for another batch of 5.
//! - The engine starts when 5 pieces are queued.
//!
//! If the queue still runs dry a locally seeded piece is used and a warning is
//! logged; the turn loop never stalls waiting for the server.
//!
//! # Transport
//!
//! Outbound messages go to an unbounded `tokio::sync::mpsc` channel; how they
//! reach the server is up to the caller. Inbound text is handed to
//! [`MultiplayerCoordinator::handle_message`] or, inside a session, sent as
//! [`SessionInput::Transport`].

pub mod coordinator;
pub mod leaderboard;
pub mod protocol;
pub mod runtime;

pub use coordinator::{MultiplayerConfig, MultiplayerCoordinator};
pub use leaderboard::{Leaderboard, PlayerStanding};
pub use protocol::{ClientMessage, PlayerStatus, ProtocolError, ScoreEntry, ServerMessage};
pub use runtime::{run_session, SessionDriver, SessionInput};
