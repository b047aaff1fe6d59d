//! Game engine - the turn state machine
//!
//! This module ties together all core components: board, pieces, piece
//! source, scoring and the turn timer. It handles placement, rotation,
//! swapping, line clears, lives and the game lifecycle.
//!
//! ```text
//! Idle --start()--> Running --timer expires with 0 lives--> GameOver
//! ```
//!
//! Every mutation happens through `&mut self`, so a single owner (the session
//! runtime, a test, a benchmark) serialises placement, timer expiry and piece
//! delivery without any locking.

use std::fmt;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::{GameEvent, Listener};
use crate::pieces::Piece;
use crate::rng::{PieceSource, RandomPieceSource};
use crate::scoring::{calculate_score, compute_delay, level_for_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::timer::TurnTimer;
use crate::types::{GameCommand, BASE_MULTIPLIER};

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::GameOver => "game-over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current and following piece; both exist from `start()` onwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePair {
    pub current: Piece,
    pub following: Piece,
}

/// What a successful placement did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementOutcome {
    pub lines_cleared: u32,
    pub blocks_cleared: u32,
    pub points: u32,
    /// Multiplier after the placement
    pub multiplier: u32,
    pub level_up: bool,
}

/// What a turn timer expiry did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnExpiry {
    LifeLost { remaining: u32 },
    GameOver,
}

/// The game engine
pub struct GameEngine<S> {
    config: GameConfig,
    board: Board,
    source: S,
    pieces: Option<PiecePair>,
    phase: Phase,
    score: u32,
    level: u32,
    lives: u32,
    multiplier: u32,
    timer: TurnTimer,
    listeners: Vec<Listener>,
}

impl GameEngine<RandomPieceSource> {
    /// Single-player engine drawing random pieces seeded from the config
    pub fn single_player(config: GameConfig) -> Result<Self, GameError> {
        let source = RandomPieceSource::new(config.seed);
        Self::new(config, source)
    }
}

impl<S: PieceSource> GameEngine<S> {
    /// Create an idle engine
    pub fn new(config: GameConfig, source: S) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.cols, config.rows),
            source,
            pieces: None,
            phase: Phase::Idle,
            score: 0,
            level: 0,
            lives: config.lives,
            multiplier: BASE_MULTIPLIER,
            timer: TurnTimer::new(),
            listeners: Vec::new(),
            config,
        })
    }

    /// Register an event listener
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Start the game: draw the first two pieces and schedule the first turn
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Idle {
            return Err(GameError::AlreadyStarted);
        }

        let current = self.source.next_piece();
        let following = self.source.next_piece();
        self.pieces = Some(PiecePair { current, following });
        self.phase = Phase::Running;

        tracing::info!(
            cols = self.config.cols,
            rows = self.config.rows,
            lives = self.lives,
            "game started"
        );

        self.emit(GameEvent::PieceChanged { current, following });
        self.schedule_turn();
        Ok(())
    }

    /// Place the current piece centred on (x, y)
    ///
    /// On `InvalidPlacement` nothing changes: not the board, not the pieces,
    /// not the timer.
    pub fn attempt_place(&mut self, x: i8, y: i8) -> Result<PlacementOutcome, GameError> {
        let pair = self.running_pieces()?;

        self.board.place(&pair.current, x, y)?;
        tracing::debug!(piece = pair.current.kind.name(), x, y, "piece placed");
        self.emit(GameEvent::PiecePlaced {
            piece: pair.current,
            x,
            y,
        });

        self.advance_pieces();
        let outcome = self.after_placement();
        self.schedule_turn();
        Ok(outcome)
    }

    /// Clear full lines and update score, multiplier and level
    fn after_placement(&mut self) -> PlacementOutcome {
        let scan = self.board.detect_full_lines();
        let blocks = scan.cells.len() as u32;
        let result = calculate_score(scan.line_count, blocks, self.multiplier);

        if !scan.is_empty() {
            // The scan came from this board, so every cell is in range.
            if let Err(err) = self.board.clear(&scan.cells) {
                tracing::error!(error = %err, "line clear rejected");
            }
            tracing::debug!(lines = scan.line_count, blocks, "lines cleared");
            self.emit(GameEvent::LineCleared {
                cells: scan.cells.iter().copied().collect(),
            });

            self.score = self.score.saturating_add(result.points);
            self.emit(GameEvent::ScoreChanged { score: self.score });
        }

        self.set_multiplier(result.next_multiplier);
        let level_up = self.update_level();

        PlacementOutcome {
            lines_cleared: scan.line_count,
            blocks_cleared: blocks,
            points: result.points,
            multiplier: self.multiplier,
            level_up,
        }
    }

    /// Rotate the current piece 90° clockwise
    pub fn rotate(&mut self) -> Result<Piece, GameError> {
        self.replace_current(|p| p.rotated_cw())
    }

    /// Rotate the current piece 90° counter-clockwise
    pub fn rotate_counter_clockwise(&mut self) -> Result<Piece, GameError> {
        self.replace_current(|p| p.rotated_ccw())
    }

    /// Exchange the current and following pieces
    pub fn swap(&mut self) -> Result<PiecePair, GameError> {
        let pair = self.running_pieces()?;
        let swapped = PiecePair {
            current: pair.following,
            following: pair.current,
        };
        self.pieces = Some(swapped);
        self.emit(GameEvent::PieceChanged {
            current: swapped.current,
            following: swapped.following,
        });
        Ok(swapped)
    }

    /// Handle the turn timer running out
    ///
    /// With lives left: take one, reset the multiplier, skip to the next
    /// piece and start a new turn. With none left: the game is over.
    pub fn on_timer_expire(&mut self) -> Result<TurnExpiry, GameError> {
        self.running_pieces()?;

        if self.lives == 0 {
            self.timer.cancel();
            self.phase = Phase::GameOver;
            tracing::info!(score = self.score, level = self.level, "game over");
            self.emit(GameEvent::GameOver);
            return Ok(TurnExpiry::GameOver);
        }

        self.lives -= 1;
        self.set_multiplier(BASE_MULTIPLIER);
        tracing::info!(remaining = self.lives, "turn expired, life lost");
        self.emit(GameEvent::LifeLost {
            remaining: self.lives,
        });
        self.advance_pieces();
        self.schedule_turn();
        Ok(TurnExpiry::LifeLost {
            remaining: self.lives,
        })
    }

    /// Advance the turn clock by `elapsed_ms`
    ///
    /// Returns true if the turn expired during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        if !self.timer.advance(elapsed_ms) {
            return false;
        }
        if let Err(err) = self.on_timer_expire() {
            tracing::error!(error = %err, "turn expiry failed");
        }
        true
    }

    /// Apply a parsed player command
    pub fn apply_command(&mut self, command: GameCommand) -> Result<(), GameError> {
        match command {
            GameCommand::Place { x, y } => self.attempt_place(x, y).map(|_| ()),
            GameCommand::Rotate => self.rotate().map(|_| ()),
            GameCommand::RotateLeft => self.rotate_counter_clockwise().map(|_| ()),
            GameCommand::Swap => self.swap().map(|_| ()),
        }
    }

    /// Turn length for the current level
    pub fn turn_delay_ms(&self) -> u32 {
        compute_delay(self.level)
    }

    fn replace_current(&mut self, f: impl FnOnce(&Piece) -> Piece) -> Result<Piece, GameError> {
        let pair = self.running_pieces()?;
        let current = f(&pair.current);
        self.pieces = Some(PiecePair { current, ..pair });
        self.emit(GameEvent::PieceChanged {
            current,
            following: pair.following,
        });
        Ok(current)
    }

    fn advance_pieces(&mut self) {
        let Some(pair) = self.pieces else {
            return;
        };
        let next = PiecePair {
            current: pair.following,
            following: self.source.next_piece(),
        };
        self.pieces = Some(next);
        self.emit(GameEvent::PieceChanged {
            current: next.current,
            following: next.following,
        });
    }

    fn schedule_turn(&mut self) {
        let delay_ms = self.turn_delay_ms();
        self.timer.schedule(delay_ms);
        self.emit(GameEvent::TurnTick { delay_ms });
    }

    fn set_multiplier(&mut self, multiplier: u32) {
        if self.multiplier != multiplier {
            self.multiplier = multiplier;
            self.emit(GameEvent::MultiplierChanged { multiplier });
        }
    }

    fn update_level(&mut self) -> bool {
        let level = level_for_score(self.score);
        if level <= self.level {
            return false;
        }
        self.level = level;
        tracing::info!(level, score = self.score, "level up");
        self.emit(GameEvent::LevelUp { level });
        true
    }

    fn running_pieces(&self) -> Result<PiecePair, GameError> {
        match (self.phase, self.pieces) {
            (Phase::Running, Some(pair)) => Ok(pair),
            (phase, _) => Err(GameError::NotRunning { phase }),
        }
    }

    fn emit(&mut self, event: GameEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl<S> GameEngine<S> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn current_piece(&self) -> Option<Piece> {
        self.pieces.map(|p| p.current)
    }

    pub fn following_piece(&self) -> Option<Piece> {
        self.pieces.map(|p| p.following)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn turn_timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn piece_source(&self) -> &S {
        &self.source
    }

    pub fn piece_source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_rows(),
            cols: self.board.cols(),
            rows: self.board.rows(),
            phase: self.phase.as_str(),
            score: self.score,
            level: self.level,
            lives: self.lives,
            multiplier: self.multiplier,
            current: self.pieces.map(|p| PieceSnapshot::from(p.current)),
            following: self.pieces.map(|p| PieceSnapshot::from(p.following)),
            turn_remaining_ms: self.timer.remaining_ms(),
            turn_delay_ms: self.timer.delay_ms(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for GameEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("lives", &self.lives)
            .field("multiplier", &self.multiplier)
            .field("pieces", &self.pieces)
            .field("timer", &self.timer)
            .field("source", &self.source)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
