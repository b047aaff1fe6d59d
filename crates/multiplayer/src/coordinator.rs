//! Multiplayer coordinator
//!
//! Wraps a [`GameEngine`] whose pieces come from the server. Local changes
//! are published on an outbound channel as they happen; inbound server text
//! is parsed here and only well-formed messages reach the engine.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use tetrecs_core::types::{GameCommand, REPLENISH_BATCH};
use tetrecs_core::{
    GameConfig, GameEngine, GameError, GameEvent, GameSnapshot, Phase, Piece, PiecePair,
    PlacementOutcome, QueuedPieceSource,
};

use crate::leaderboard::{Leaderboard, PlayerStanding};
use crate::protocol::{ClientMessage, ProtocolError, ServerMessage};

/// Piece resupply policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplayerConfig {
    /// Pieces requested at the start and after each lost life
    pub replenish_batch: u32,
    /// Pieces requested after each committed placement
    pub pieces_per_placement: u32,
    /// Queued pieces needed before the engine starts
    pub start_threshold: usize,
    /// Seed for pieces drawn locally when the queue runs dry
    pub fallback_seed: u32,
}

impl Default for MultiplayerConfig {
    fn default() -> Self {
        Self {
            replenish_batch: REPLENISH_BATCH as u32,
            pieces_per_placement: 1,
            start_threshold: REPLENISH_BATCH,
            fallback_seed: 1,
        }
    }
}

type Outbox = mpsc::UnboundedSender<ClientMessage>;

fn send(outbox: &Outbox, message: ClientMessage) {
    if outbox.send(message).is_err() {
        tracing::warn!("outbound channel closed, dropping message");
    }
}

fn request_pieces(outbox: &Outbox, count: u32) {
    for _ in 0..count {
        send(outbox, ClientMessage::RequestPiece);
    }
}

/// One local player in a multiplayer session
#[derive(Debug)]
pub struct MultiplayerCoordinator {
    engine: GameEngine<QueuedPieceSource>,
    config: MultiplayerConfig,
    outbox: Outbox,
    leaderboard: Leaderboard,
    members: Vec<String>,
    begun: bool,
}

impl MultiplayerCoordinator {
    pub fn new(
        game: GameConfig,
        config: MultiplayerConfig,
        outbox: mpsc::UnboundedSender<ClientMessage>,
    ) -> Result<Self, GameError> {
        let source = QueuedPieceSource::new(config.fallback_seed);
        let mut engine = GameEngine::new(game, source)?;

        let events_out = outbox.clone();
        let batch = config.replenish_batch;
        engine.subscribe(move |event| match event {
            GameEvent::ScoreChanged { score } => send(&events_out, ClientMessage::Score(*score)),
            GameEvent::LifeLost { remaining } => {
                send(&events_out, ClientMessage::Lives(*remaining));
                request_pieces(&events_out, batch);
            }
            GameEvent::GameOver => send(&events_out, ClientMessage::Die),
            _ => {}
        });

        Ok(Self {
            engine,
            config,
            outbox,
            leaderboard: Leaderboard::new(),
            members: Vec::new(),
            begun: false,
        })
    }

    /// Ask for the leaderboard and the first batch of pieces
    ///
    /// The engine itself starts once enough pieces have arrived.
    pub fn begin(&mut self) -> Result<(), GameError> {
        if self.begun {
            return Err(GameError::AlreadyStarted);
        }
        self.begun = true;

        tracing::info!(batch = self.config.replenish_batch, "joining multiplayer game");
        send(&self.outbox, ClientMessage::RequestScores);
        request_pieces(&self.outbox, self.config.replenish_batch);
        self.start_if_ready();
        Ok(())
    }

    /// Handle one inbound server message
    ///
    /// Malformed or unknown text is logged and dropped; the error is returned
    /// for callers that want to count it.
    pub fn handle_message(&mut self, text: &str) -> Result<(), ProtocolError> {
        let message = match text.parse::<ServerMessage>() {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, "dropping server message");
                return Err(err);
            }
        };

        match message {
            ServerMessage::Piece(kind) => {
                self.engine.piece_source_mut().push(kind);
                tracing::debug!(
                    piece = kind.name(),
                    queued = self.engine.piece_source().len(),
                    "piece received"
                );
                self.start_if_ready();
            }
            ServerMessage::Scores(entries) => self.leaderboard.apply_snapshot(&entries),
            ServerMessage::Users(members) => {
                tracing::debug!(count = members.len(), "channel members updated");
                self.members = members;
            }
        }
        Ok(())
    }

    fn start_if_ready(&mut self) {
        if !self.begun || self.engine.phase() != Phase::Idle {
            return;
        }
        if self.engine.piece_source().len() < self.config.start_threshold {
            return;
        }
        if let Err(err) = self.engine.start() {
            tracing::error!(error = %err, "engine failed to start");
        }
    }

    /// Place the current piece and publish the resulting board
    pub fn attempt_place(&mut self, x: i8, y: i8) -> Result<PlacementOutcome, GameError> {
        let outcome = self.engine.attempt_place(x, y)?;
        send(
            &self.outbox,
            ClientMessage::Board(self.engine.board().column_major_values()),
        );
        request_pieces(&self.outbox, self.config.pieces_per_placement);
        Ok(outcome)
    }

    pub fn rotate(&mut self) -> Result<Piece, GameError> {
        self.engine.rotate()
    }

    pub fn rotate_counter_clockwise(&mut self) -> Result<Piece, GameError> {
        self.engine.rotate_counter_clockwise()
    }

    pub fn swap(&mut self) -> Result<PiecePair, GameError> {
        self.engine.swap()
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.engine.tick(elapsed_ms)
    }

    pub fn apply_command(&mut self, command: GameCommand) -> Result<(), GameError> {
        match command {
            GameCommand::Place { x, y } => self.attempt_place(x, y).map(|_| ()),
            other => self.engine.apply_command(other),
        }
    }

    /// Current standings, highest score first
    pub fn leaderboard(&self) -> Vec<PlayerStanding> {
        self.leaderboard.standings().to_vec()
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn has_begun(&self) -> bool {
        self.begun
    }

    pub fn engine(&self) -> &GameEngine<QueuedPieceSource> {
        &self.engine
    }

    pub fn config(&self) -> &MultiplayerConfig {
        &self.config
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }
}
