use serde::Serialize;

use crate::pieces::Piece;
use crate::types::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub id: u8,
    pub name: &'static str,
    pub rotation: &'static str,
    pub value: Cell,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            id: value.kind.id(),
            name: value.kind.name(),
            rotation: value.rotation.as_str(),
            value: value.value(),
        }
    }
}

/// Point-in-time view of an engine, for observers and logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Rows top to bottom, each `cols` wide
    pub board: Vec<Vec<Cell>>,
    pub cols: u8,
    pub rows: u8,
    pub phase: &'static str,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub multiplier: u32,
    pub current: Option<PieceSnapshot>,
    pub following: Option<PieceSnapshot>,
    pub turn_remaining_ms: Option<u32>,
    pub turn_delay_ms: u32,
}

impl GameSnapshot {
    /// Stable 64-bit FNV-1a hash of the board contents
    pub fn board_hash(&self) -> u64 {
        const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const PRIME: u64 = 0x100000001b3;

        self.board
            .iter()
            .flatten()
            .fold(OFFSET_BASIS, |state, &b| (state ^ b as u64).wrapping_mul(PRIME))
    }
}
