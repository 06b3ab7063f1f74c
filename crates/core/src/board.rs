//! Board module - the landed-cell grid
//!
//! Width and height are fixed when the board is created and never change.
//! Storage is a flat row-major array. Coordinates are `(x, y)` with `x` growing
//! to the right and `y` growing downward; row 0 is the top of the hidden header.
//!
//! The active piece is never written here until it lands.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, MAX_BOARD_EDGE};

/// Row indices cleared by one call, bottom to top.
pub type ClearedRows = ArrayVec<u8, { MAX_BOARD_EDGE as usize }>;

/// The landed-cell grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBoard {
    width: u8,
    height: u8,
    header: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl GridBoard {
    /// Create an empty board.
    ///
    /// `header` is the number of hidden rows at the top; the topmost visible
    /// row is `header`. Geometry is expected to be validated by the caller
    /// (see [`crate::config::BoardConfig::validate`]).
    pub fn new(width: u8, height: u8, header: u8) -> Self {
        debug_assert!(width > 0 && width <= MAX_BOARD_EDGE);
        debug_assert!(height > header && height <= MAX_BOARD_EDGE);
        Self {
            width,
            height,
            header,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Hidden rows at the top of the board.
    pub fn header(&self) -> u8 {
        self.header
    }

    pub fn visible_height(&self) -> u8 {
        self.height - self.header
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        Some(&self.cells[y * width..(y + 1) * width])
    }

    /// All rows, top to bottom, header included.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Rows below the hidden header, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows().skip(self.header as usize)
    }

    /// True iff every cell of `piece` is on the board and unfilled.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_free(x, y))
    }

    /// True iff any cell of `piece` sits at or above the topmost visible row.
    pub fn is_over_limit(&self, piece: &Piece) -> bool {
        piece.cells().iter().any(|&(_, y)| y <= self.header as i8)
    }

    /// Write every cell of `piece` into the grid with the piece's kind.
    ///
    /// The piece is consumed: once stored it is part of the board.
    pub fn store_shape(&mut self, piece: Piece) {
        debug_assert!(
            self.is_valid_position(&piece),
            "storing a piece that overlaps the grid: {:?}",
            piece
        );
        let kind = piece.kind();
        for (x, y) in piece.cells() {
            self.set(x, y, Some(kind));
        }
    }

    /// Remove every full row and collapse the rows above it.
    ///
    /// Returns how many rows this call removed.
    pub fn clear_full_rows(&mut self) -> usize {
        self.clear_full_rows_indexed().len()
    }

    /// Same as [`GridBoard::clear_full_rows`], reporting the removed row
    /// indices (as they were before the collapse), bottom to top.
    ///
    /// Single bottom-up pass: surviving rows are copied down to a write cursor
    /// that trails the read cursor by the number of rows removed so far.
    pub fn clear_full_rows_indexed(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = self.width as usize;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        debug_assert_eq!(write_y, cleared.len());
        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Fill an entire row (test and practice setup).
    pub fn fill_row(&mut self, y: i8, cell: Cell) {
        for x in 0..self.width as i8 {
            self.set(x, y, cell);
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
