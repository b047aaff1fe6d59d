//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, multiplayer wire protocol, score ledger).
//!
//! # Board Dimensions
//!
//! The default playfield is a 5x5 grid:
//!
//! - **Width**: 5 columns (indexed 0-4)
//! - **Height**: 5 rows (indexed 0-4)
//!
//! Both are configurable per game; see `GameConfig` in the core crate.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TURN_DELAY_MS` | 12000 | Turn length at level 0 |
//! | `TURN_DELAY_STEP_MS` | 500 | Reduction per level |
//! | `MIN_TURN_DELAY_MS` | 2500 | Floor, reached at level 19 |
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_SCORE_UNIT` | 10 | Points per (line x block x multiplier) |
//! | `POINTS_PER_LEVEL` | 1000 | Score needed for each level |
//! | `STARTING_LIVES` | 3 | Lives at the start of a game |
//!
//! # Examples
//!
//! ```
//! use tetrecs_types::{GameCommand, PieceKind, Rotation, PIECE_COUNT};
//!
//! // Piece ids arrive from the wire as 0..=14
//! let piece = PieceKind::from_id(2).unwrap();
//! assert_eq!(piece, PieceKind::Plus);
//! assert_eq!(piece.value(), 3);
//! assert_eq!(PieceKind::from_id(PIECE_COUNT), None);
//!
//! // Rotate
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! // Parse a text command
//! assert_eq!(GameCommand::parse("place 2 3"), Some(GameCommand::Place { x: 2, y: 3 }));
//! ```

/// Default board width in cells (5 columns)
pub const DEFAULT_COLS: u8 = 5;

/// Default board height in cells (5 rows)
pub const DEFAULT_ROWS: u8 = 5;

/// Number of canonical piece shapes
pub const PIECE_COUNT: u8 = 15;

/// Highest cell value a board may hold (one per piece shape)
pub const MAX_CELL_VALUE: u8 = PIECE_COUNT;

/// Lives at the start of every game
pub const STARTING_LIVES: u32 = 3;

/// Starting (and reset) value of the score multiplier
pub const BASE_MULTIPLIER: u32 = 1;

/// Points awarded per line x cleared block x multiplier
pub const LINE_SCORE_UNIT: u32 = 10;

/// Score required to advance one level
pub const POINTS_PER_LEVEL: u32 = 1000;

/// Turn timer length at level 0
pub const BASE_TURN_DELAY_MS: u32 = 12_000;

/// Turn timer reduction per level
pub const TURN_DELAY_STEP_MS: u32 = 500;

/// Shortest possible turn timer
pub const MIN_TURN_DELAY_MS: u32 = 2_500;

/// Pieces requested from the server per replenishment batch
pub const REPLENISH_BATCH: usize = 5;

/// A cell on the game board
///
/// - `0`: Empty cell
/// - `1..=15`: Cell filled with the colour value of a piece
pub type Cell = u8;

/// Coordinate of a single block on the board (x = column, y = row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockCoord {
    pub x: u8,
    pub y: u8,
}

impl BlockCoord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// The fifteen canonical piece shapes
///
/// Discriminants are the wire ids (0..=14). The colour value written to the
/// board is `id + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Line,
    C,
    Plus,
    Dot,
    Square,
    L,
    J,
    S,
    Z,
    T,
    X,
    Corner,
    InverseCorner,
    Diagonal,
    Double,
}

impl PieceKind {
    /// Every shape in id order
    pub const ALL: [PieceKind; PIECE_COUNT as usize] = [
        PieceKind::Line,
        PieceKind::C,
        PieceKind::Plus,
        PieceKind::Dot,
        PieceKind::Square,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::X,
        PieceKind::Corner,
        PieceKind::InverseCorner,
        PieceKind::Diagonal,
        PieceKind::Double,
    ];

    /// Look up a shape by wire id
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrecs_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(0), Some(PieceKind::Line));
    /// assert_eq!(PieceKind::from_id(14), Some(PieceKind::Double));
    /// assert_eq!(PieceKind::from_id(15), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Wire id (0..=14)
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Colour value written into board cells (1..=15)
    pub fn value(&self) -> Cell {
        self.id() + 1
    }

    /// Display name of the shape
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Line => "Line",
            PieceKind::C => "C",
            PieceKind::Plus => "Plus",
            PieceKind::Dot => "Dot",
            PieceKind::Square => "Square",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::T => "T",
            PieceKind::X => "X",
            PieceKind::Corner => "Corner",
            PieceKind::InverseCorner => "Inverse Corner",
            PieceKind::Diagonal => "Diagonal",
            PieceKind::Double => "Double",
        }
    }
}

/// Orientation of a piece in 90° steps
///
/// - **North**: Default orientation (0° rotation)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 90° counter-clockwise (270° clockwise)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrecs_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns away from North
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Player commands accepted by the engine
///
/// These are what presentation (or the headless stdin driver) issues.
/// Rendering and input mapping stay outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Place the current piece centred on block (x, y)
    Place { x: i8, y: i8 },
    /// Rotate the current piece 90° clockwise
    Rotate,
    /// Rotate the current piece 90° counter-clockwise
    RotateLeft,
    /// Exchange the current and following pieces
    Swap,
}

impl GameCommand {
    /// Parse a whitespace-separated text command (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrecs_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::parse("rotate"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::parse("ROTATE-LEFT"), Some(GameCommand::RotateLeft));
    /// assert_eq!(GameCommand::parse("swap"), Some(GameCommand::Swap));
    /// assert_eq!(GameCommand::parse("place 1 4"), Some(GameCommand::Place { x: 1, y: 4 }));
    /// assert_eq!(GameCommand::parse("place 1"), None);
    /// assert_eq!(GameCommand::parse("jump"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let verb = parts.next()?.to_lowercase();
        let command = match verb.as_str() {
            "place" => {
                let x = parts.next()?.parse().ok()?;
                let y = parts.next()?.parse().ok()?;
                GameCommand::Place { x, y }
            }
            "rotate" | "rotate-right" => GameCommand::Rotate,
            "rotate-left" => GameCommand::RotateLeft,
            "swap" => GameCommand::Swap,
            _ => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(command)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Place { .. } => "place",
            GameCommand::Rotate => "rotate",
            GameCommand::RotateLeft => "rotate-left",
            GameCommand::Swap => "swap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_delay_defaults() {
        assert_eq!(BASE_TURN_DELAY_MS, 12_000);
        assert_eq!(TURN_DELAY_STEP_MS, 500);
        assert_eq!(MIN_TURN_DELAY_MS, 2_500);
        // The floor is reached exactly at level 19.
        assert_eq!(BASE_TURN_DELAY_MS - 19 * TURN_DELAY_STEP_MS, MIN_TURN_DELAY_MS);
    }

    #[test]
    fn piece_ids_round_trip_through_kind() {
        for id in 0..PIECE_COUNT {
            let kind = PieceKind::from_id(id).unwrap();
            assert_eq!(kind.id(), id);
            assert_eq!(kind.value(), id + 1);
        }
    }

    #[test]
    fn rotation_cw_and_ccw_are_inverse() {
        for r in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
        }
    }

    #[test]
    fn command_rejects_trailing_tokens() {
        assert_eq!(GameCommand::parse("swap now"), None);
        assert_eq!(GameCommand::parse("place 1 2 3"), None);
        assert_eq!(GameCommand::parse(""), None);
    }
}
