//! Pieces module - the fifteen 3x3 shapes and their rotation
//!
//! Each shape is a 3x3 matrix indexed `blocks[x][y]`, with `x` the column
//! offset and `y` the row offset from the top-left of the matrix. When a piece
//! is placed at anchor (ax, ay), matrix cell (1, 1) lands on the anchor.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, Rotation};

/// 3x3 occupancy matrix, indexed `[x][y]`
pub type PieceBlocks = [[bool; 3]; 3];

/// Offsets of occupied cells relative to the matrix top-left
pub type PieceCells = ArrayVec<(i8, i8), 9>;

/// A piece: a shape in one of four orientations
///
/// Pieces are immutable values; rotation returns a new piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
}

/// Create a piece of the given shape in its default orientation
pub fn create_piece(kind: PieceKind) -> Piece {
    Piece::new(kind)
}

/// Return the piece rotated 90° clockwise
pub fn rotate(piece: Piece) -> Piece {
    piece.rotated_cw()
}

impl Piece {
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    /// Colour value written into the board for this piece
    pub fn value(&self) -> Cell {
        self.kind.value()
    }

    pub fn rotated_cw(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }

    pub fn rotated_ccw(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_ccw(),
            ..*self
        }
    }

    /// Occupancy matrix for the current orientation
    pub fn blocks(&self) -> PieceBlocks {
        let mut blocks = base_blocks(self.kind);
        for _ in 0..self.rotation.quarter_turns() {
            blocks = rotate_blocks_cw(&blocks);
        }
        blocks
    }

    /// Occupied `(x, y)` offsets within the 3x3 matrix
    pub fn cells(&self) -> PieceCells {
        let blocks = self.blocks();
        let mut cells = PieceCells::new();
        for (x, column) in blocks.iter().enumerate() {
            for (y, &filled) in column.iter().enumerate() {
                if filled {
                    cells.push((x as i8, y as i8));
                }
            }
        }
        cells
    }

    /// Number of blocks in the shape
    pub fn block_count(&self) -> usize {
        self.cells().len()
    }
}

/// Rotate a 3x3 matrix 90° clockwise (screen coordinates, y down)
///
/// Block (x, y) moves to (2 - y, x).
pub fn rotate_blocks_cw(blocks: &PieceBlocks) -> PieceBlocks {
    let mut rotated = [[false; 3]; 3];
    for (x, column) in blocks.iter().enumerate() {
        for (y, &filled) in column.iter().enumerate() {
            rotated[2 - y][x] = filled;
        }
    }
    rotated
}

/// Default-orientation matrix for a shape
fn base_blocks(kind: PieceKind) -> PieceBlocks {
    const O: bool = false;
    const B: bool = true;

    match kind {
        PieceKind::Line => [[O, O, O], [B, B, B], [O, O, O]],
        PieceKind::C => [[O, O, O], [B, B, B], [B, O, B]],
        PieceKind::Plus => [[O, B, O], [B, B, B], [O, B, O]],
        PieceKind::Dot => [[O, O, O], [O, B, O], [O, O, O]],
        PieceKind::Square => [[B, B, O], [B, B, O], [O, O, O]],
        PieceKind::L => [[O, O, O], [B, B, B], [O, O, B]],
        PieceKind::J => [[O, O, B], [B, B, B], [O, O, O]],
        PieceKind::S => [[O, O, O], [O, B, B], [B, B, O]],
        PieceKind::Z => [[B, B, O], [O, B, B], [O, O, O]],
        PieceKind::T => [[B, O, O], [B, B, O], [B, O, O]],
        PieceKind::X => [[B, O, B], [O, B, O], [B, O, B]],
        PieceKind::Corner => [[O, O, O], [B, B, O], [B, O, O]],
        PieceKind::InverseCorner => [[B, O, O], [B, B, O], [O, O, O]],
        PieceKind::Diagonal => [[B, O, O], [O, B, O], [O, O, B]],
        PieceKind::Double => [[O, B, O], [O, B, O], [O, O, O]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_vertical_through_centre_column() {
        let piece = Piece::new(PieceKind::Line);
        let cells: Vec<_> = piece.cells().into_iter().collect();
        assert_eq!(cells, vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_rotate_blocks_moves_corner_clockwise() {
        let mut blocks = [[false; 3]; 3];
        blocks[0][0] = true; // top-left
        let rotated = rotate_blocks_cw(&blocks);
        assert!(rotated[2][0], "top-left should move to top-right");
    }

    #[test]
    fn test_ccw_undoes_cw() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            assert_eq!(piece.rotated_cw().rotated_ccw().blocks(), piece.blocks());
        }
    }
}
