//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid where each cell holds a value in 0..=15
//! (0 = empty, otherwise the colour value of the piece that filled it).
//! Uses a flat vector in row-major order (y * cols + x) for cache locality.
//! Coordinates: (x, y) where x is the column and y is the row, both from 0.
//!
//! Pieces are placed by anchor: the anchor names the board cell that the
//! centre of the piece's 3x3 matrix lands on, so matrix cell (i, j) maps to
//! board cell (anchor_x - 1 + i, anchor_y - 1 + j).

use std::collections::BTreeSet;

use crate::error::GameError;
use crate::pieces::Piece;
use crate::types::{BlockCoord, Cell, MAX_CELL_VALUE};

/// Result of scanning the board for full rows and columns
///
/// `line_count` counts lines, `cells` counts distinct blocks: a block where a
/// full row crosses a full column contributes to two lines but appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineScan {
    pub line_count: u32,
    pub cells: BTreeSet<BlockCoord>,
}

impl LineScan {
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: u8,
    rows: u8,
    /// Flat vector of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            cells: vec![0; cols as usize * rows as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.cols as i16 || y < 0 || y >= self.rows as i16 {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    /// Board cell covered by piece matrix offset (i, j) at the given anchor
    #[inline(always)]
    fn target(anchor_x: i8, anchor_y: i8, i: i8, j: i8) -> (i16, i16) {
        (
            anchor_x as i16 - 1 + i as i16,
            anchor_y as i16 - 1 + j as i16,
        )
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: u8, y: u8) -> Option<Cell> {
        self.index(x as i16, y as i16).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    ///
    /// Rejects out-of-bounds coordinates and values above 15 instead of
    /// clamping them.
    pub fn set(&mut self, x: u8, y: u8, value: Cell) -> Result<(), GameError> {
        if value > MAX_CELL_VALUE {
            return Err(GameError::InvalidCellValue { value });
        }
        let idx = self
            .index(x as i16, y as i16)
            .ok_or(GameError::OutOfBounds { x, y })?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Check whether every block of `piece` lands on a free, in-bounds cell
    pub fn can_place(&self, piece: &Piece, anchor_x: i8, anchor_y: i8) -> bool {
        piece.cells().iter().all(|&(i, j)| {
            let (x, y) = Self::target(anchor_x, anchor_y, i, j);
            matches!(self.index(x, y), Some(idx) if self.cells[idx] == 0)
        })
    }

    /// Write the piece's value into every cell it covers
    ///
    /// All-or-nothing: if any block would land out of bounds or on an occupied
    /// cell the board is left untouched and `InvalidPlacement` is returned.
    pub fn place(&mut self, piece: &Piece, anchor_x: i8, anchor_y: i8) -> Result<(), GameError> {
        if !self.can_place(piece, anchor_x, anchor_y) {
            return Err(GameError::InvalidPlacement {
                x: anchor_x,
                y: anchor_y,
            });
        }

        let value = piece.value();
        for &(i, j) in piece.cells().iter() {
            let (x, y) = Self::target(anchor_x, anchor_y, i, j);
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = value;
            }
        }
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: u8) -> bool {
        if y >= self.rows {
            return false;
        }
        let width = self.cols as usize;
        let start = y as usize * width;
        self.cells[start..start + width].iter().all(|&c| c != 0)
    }

    /// Check if a column is completely filled
    pub fn is_column_full(&self, x: u8) -> bool {
        if x >= self.cols {
            return false;
        }
        (0..self.rows).all(|y| self.cells[y as usize * self.cols as usize + x as usize] != 0)
    }

    /// Find every full row and column
    ///
    /// Rows are scanned first, then columns. Does not modify the board.
    pub fn detect_full_lines(&self) -> LineScan {
        let mut scan = LineScan::default();

        for y in 0..self.rows {
            if self.is_row_full(y) {
                scan.line_count += 1;
                scan.cells.extend((0..self.cols).map(|x| BlockCoord::new(x, y)));
            }
        }

        for x in 0..self.cols {
            if self.is_column_full(x) {
                scan.line_count += 1;
                scan.cells.extend((0..self.rows).map(|y| BlockCoord::new(x, y)));
            }
        }

        scan
    }

    /// Empty every given cell
    ///
    /// Every coordinate is bounds-checked before any cell is written, so either
    /// all cells are cleared or none are.
    pub fn clear<'a, I>(&mut self, cells: I) -> Result<(), GameError>
    where
        I: IntoIterator<Item = &'a BlockCoord>,
        I::IntoIter: Clone,
    {
        let cells = cells.into_iter();
        if let Some(bad) = cells.clone().find(|c| self.get(c.x, c.y).is_none()) {
            return Err(GameError::OutOfBounds { x: bad.x, y: bad.y });
        }
        for c in cells {
            let idx = c.y as usize * self.cols as usize + c.x as usize;
            self.cells[idx] = 0;
        }
        Ok(())
    }

    /// Get a reference to the internal cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell values with x as the outer loop, the order used by `BOARD` messages
    pub fn column_major_values(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.cells.len());
        for x in 0..self.cols as usize {
            for y in 0..self.rows as usize {
                out.push(self.cells[y * self.cols as usize + x]);
            }
        }
        out
    }

    /// Rows as nested vectors, top row first
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.cols as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(5, 4);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(4, 0), Some(4));
        assert_eq!(board.index(0, 1), Some(5));
        assert_eq!(board.index(4, 3), Some(19));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(5, 0), None);
        assert_eq!(board.index(0, 4), None);
    }

    #[test]
    fn test_dot_lands_on_anchor() {
        let mut board = Board::new(5, 5);
        let dot = Piece::new(PieceKind::Dot);
        board.place(&dot, 0, 0).unwrap();
        assert_eq!(board.get(0, 0), Some(PieceKind::Dot.value()));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_failed_place_leaves_board_untouched() {
        let mut board = Board::new(5, 5);
        board.set(2, 2, 1).unwrap();
        let before = board.clone();

        let plus = Piece::new(PieceKind::Plus);
        assert_eq!(
            board.place(&plus, 2, 1),
            Err(GameError::InvalidPlacement { x: 2, y: 1 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_column_major_order() {
        let mut board = Board::new(3, 3);
        board.set(1, 0, 7).unwrap();
        let values = board.column_major_values();
        // x = 1 column starts at index 3
        assert_eq!(values[3], 7);
        assert_eq!(board.cells()[1], 7);
    }

    #[test]
    fn test_clear_rejects_out_of_range_without_partial_write() {
        let mut board = Board::new(3, 3);
        board.set(0, 0, 4).unwrap();
        let cells = [BlockCoord::new(0, 0), BlockCoord::new(9, 9)];
        assert!(board.clear(cells.iter()).is_err());
        assert_eq!(board.get(0, 0), Some(4));
    }
}
