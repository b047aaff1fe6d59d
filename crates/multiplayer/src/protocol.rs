//! Protocol module - line-oriented text messages exchanged with the game server
//!
//! Inbound messages are parsed with [`str::parse`] into a [`ServerMessage`];
//! outbound messages render with `Display`. One message per transport unit.
//!
//! ```text
//! -> PIECE                  request one piece
//! <- PIECE 7                deliver piece id 7
//! -> BOARD 0 0 3 ...        board values, column by column
//! -> SCORE 180
//! -> LIVES 2
//! -> SCORES                 request a leaderboard snapshot
//! <- SCORES                 snapshot, one name:score:status per line
//!    alice:500:0
//!    bob:800:DEAD
//! <- USERS                  channel membership, one name per line
//!    alice
//!    bob
//! -> DIE
//! ```

use std::fmt;
use std::str::FromStr;

use tetrecs_core::types::{Cell, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,

    #[error("unknown message: {0}")]
    UnknownMessage(String),

    #[error("malformed piece message: {0}")]
    MalformedPiece(String),

    #[error("piece id {0} out of range")]
    PieceOutOfRange(u8),

    #[error("malformed score line: {0}")]
    MalformedScore(String),
}

/// Status field of a score line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// Integer status reported by the server; negative means eliminated
    Delta(i32),
    Dead,
}

impl PlayerStatus {
    pub fn is_dead(&self) -> bool {
        match self {
            PlayerStatus::Dead => true,
            PlayerStatus::Delta(delta) => *delta < 0,
        }
    }
}

impl FromStr for PlayerStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("DEAD") {
            return Ok(PlayerStatus::Dead);
        }
        s.parse().map(PlayerStatus::Delta).map_err(|_| ())
    }
}

/// One `name:score[:status]` line of a scores snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub status: PlayerStatus,
}

impl ScoreEntry {
    fn parse_line(line: &str) -> Result<Self, ProtocolError> {
        let malformed = || ProtocolError::MalformedScore(line.to_string());

        let mut parts = line.splitn(3, ':');
        let name = parts.next().map(str::trim).filter(|n| !n.is_empty());
        let name = name.ok_or_else(malformed)?;
        let score = parts
            .next()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(malformed)?;
        // A missing status means the player is still in
        let status = match parts.next() {
            Some(status) => status.parse().map_err(|_| malformed())?,
            None => PlayerStatus::Delta(0),
        };

        Ok(Self {
            name: name.to_string(),
            score,
            status,
        })
    }
}

/// Message received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Piece(PieceKind),
    Scores(Vec<ScoreEntry>),
    Users(Vec<String>),
}

impl FromStr for ServerMessage {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ProtocolError::Empty);
        }

        let (keyword, body) = text
            .split_once(|c: char| c == ' ' || c == '\n')
            .unwrap_or((text, ""));

        match keyword.trim_end_matches('\r') {
            "PIECE" => parse_piece(body.trim()).map(ServerMessage::Piece),
            "SCORES" => body_lines(body)
                .map(ScoreEntry::parse_line)
                .collect::<Result<Vec<_>, _>>()
                .map(ServerMessage::Scores),
            "USERS" => Ok(ServerMessage::Users(
                body_lines(body).map(str::to_string).collect(),
            )),
            other => Err(ProtocolError::UnknownMessage(other.to_string())),
        }
    }
}

fn parse_piece(arg: &str) -> Result<PieceKind, ProtocolError> {
    let id: u8 = arg
        .parse()
        .map_err(|_| ProtocolError::MalformedPiece(arg.to_string()))?;
    PieceKind::from_id(id).ok_or(ProtocolError::PieceOutOfRange(id))
}

fn body_lines(body: &str) -> impl Iterator<Item = &str> {
    body.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Message sent to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    RequestPiece,
    /// Board values in column-major order
    Board(Vec<Cell>),
    Score(u32),
    Lives(u32),
    RequestScores,
    Die,
}

impl fmt::Display for ClientMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientMessage::RequestPiece => f.write_str("PIECE"),
            ClientMessage::Board(values) => {
                f.write_str("BOARD")?;
                for value in values {
                    write!(f, " {value}")?;
                }
                Ok(())
            }
            ClientMessage::Score(score) => write!(f, "SCORE {score}"),
            ClientMessage::Lives(lives) => write!(f, "LIVES {lives}"),
            ClientMessage::RequestScores => f.write_str("SCORES"),
            ClientMessage::Die => f.write_str("DIE"),
        }
    }
}
