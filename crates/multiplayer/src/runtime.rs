//! Session runtime.
//!
//! A single task owns the game and is the only place its state changes.
//! Player commands, transport lines and the turn deadline are all awaited in
//! one `select!`, so a timer expiry can never race a placement.

use std::future;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};

use tetrecs_core::types::GameCommand;
use tetrecs_core::{GameEngine, GameError, GameSnapshot, PieceSource};

use crate::coordinator::MultiplayerCoordinator;

/// Input delivered to the session task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Command(GameCommand),
    /// One inbound transport message
    Transport(String),
    Shutdown,
}

/// Anything the session task can drive.
pub trait SessionDriver {
    fn apply_command(&mut self, command: GameCommand) -> Result<(), GameError>;

    /// Handle one inbound transport message.
    fn receive(&mut self, text: &str);

    /// Advance the turn clock; true if the turn expired.
    fn tick(&mut self, elapsed_ms: u32) -> bool;

    /// Time left on the pending turn, if one is pending.
    fn remaining_ms(&self) -> Option<u32>;

    fn is_finished(&self) -> bool;

    fn snapshot(&self) -> GameSnapshot;
}

impl<S: PieceSource> SessionDriver for GameEngine<S> {
    fn apply_command(&mut self, command: GameCommand) -> Result<(), GameError> {
        GameEngine::apply_command(self, command)
    }

    fn receive(&mut self, text: &str) {
        tracing::warn!(text, "single-player session has no transport, ignoring");
    }

    fn tick(&mut self, elapsed_ms: u32) -> bool {
        GameEngine::tick(self, elapsed_ms)
    }

    fn remaining_ms(&self) -> Option<u32> {
        self.turn_timer().remaining_ms()
    }

    fn is_finished(&self) -> bool {
        self.is_game_over()
    }

    fn snapshot(&self) -> GameSnapshot {
        GameEngine::snapshot(self)
    }
}

impl SessionDriver for MultiplayerCoordinator {
    fn apply_command(&mut self, command: GameCommand) -> Result<(), GameError> {
        MultiplayerCoordinator::apply_command(self, command)
    }

    fn receive(&mut self, text: &str) {
        // Errors are already logged by the coordinator
        let _ = self.handle_message(text);
    }

    fn tick(&mut self, elapsed_ms: u32) -> bool {
        MultiplayerCoordinator::tick(self, elapsed_ms)
    }

    fn remaining_ms(&self) -> Option<u32> {
        self.engine().turn_timer().remaining_ms()
    }

    fn is_finished(&self) -> bool {
        self.engine().is_game_over()
    }

    fn snapshot(&self) -> GameSnapshot {
        MultiplayerCoordinator::snapshot(self)
    }
}

/// Whole milliseconds elapsed since `last`, moving `last` forward by exactly
/// that much so sub-millisecond remainders carry over.
fn take_elapsed(last: &mut Instant) -> u32 {
    let ms = Instant::now()
        .saturating_duration_since(*last)
        .as_millis()
        .min(u32::MAX as u128) as u32;
    *last += Duration::from_millis(ms as u64);
    ms
}

/// Drive a game until it ends, `Shutdown` arrives or the input channel closes.
///
/// Returns the final snapshot.
pub async fn run_session<D: SessionDriver>(
    mut driver: D,
    mut inputs: mpsc::Receiver<SessionInput>,
) -> GameSnapshot {
    let mut last = Instant::now();

    while !driver.is_finished() {
        let deadline = driver
            .remaining_ms()
            .map(|ms| last + Duration::from_millis(ms as u64));
        let turn_expired = async {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => future::pending::<()>().await,
            }
        };

        tokio::select! {
            input = inputs.recv() => {
                driver.tick(take_elapsed(&mut last));
                if driver.is_finished() {
                    break;
                }

                match input {
                    Some(SessionInput::Command(command)) => {
                        if let Err(err) = driver.apply_command(command) {
                            tracing::debug!(command = command.as_str(), error = %err, "command rejected");
                        }
                    }
                    Some(SessionInput::Transport(text)) => driver.receive(&text),
                    Some(SessionInput::Shutdown) | None => {
                        tracing::info!("session shutting down");
                        break;
                    }
                }
            }
            _ = turn_expired => {
                let elapsed = take_elapsed(&mut last);
                if driver.tick(elapsed) {
                    tracing::debug!(elapsed, "turn expired");
                }
            }
        }
    }

    driver.snapshot()
}
