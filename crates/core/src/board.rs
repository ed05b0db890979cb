//! Board module - manages the game grid
//!
//! The board is a `width x height` grid of cell values stored as a flat,
//! row-major vector. Coordinates are `(x, y)` with `x` growing to the right and
//! `y` growing downward; row 0 is the top of the well.
//!
//! Dimensions are fixed at construction. Cells are only written by [`Board::merge`],
//! [`Board::sweep`] and the explicit setters used to build puzzle positions.

use crate::error::GridError;
use crate::pieces::ActivePiece;
use crate::types::{CellValue, EMPTY, MAX_BOARD_DIM, MAX_CELL_VALUE, MIN_BOARD_DIM};

/// The settled-cell grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<CellValue>>", into = "Vec<Vec<CellValue>>")
)]
pub struct Board {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<CellValue>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Panics if either side is outside `MIN_BOARD_DIM..=MAX_BOARD_DIM`.
    pub fn new(width: u8, height: u8) -> Self {
        assert!(
            (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&width)
                && (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&height),
            "board {}x{} out of range",
            width,
            height
        );
        Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        }
    }

    /// Build a board from rows (top row first).
    pub fn from_rows(rows: &[Vec<CellValue>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        let range = MIN_BOARD_DIM as usize..=MAX_BOARD_DIM as usize;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(GridError::Dimensions {
                width,
                height,
                min: MIN_BOARD_DIM as usize,
                max: MAX_BOARD_DIM as usize,
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            if let Some(x) = row.iter().position(|&v| v > MAX_CELL_VALUE) {
                return Err(GridError::ValueOutOfRange {
                    x,
                    y,
                    value: row[x],
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
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

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<CellValue> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, value: CellValue) -> bool {
        assert!(value <= MAX_CELL_VALUE, "cell value {} out of domain", value);
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// True for a filled cell inside the grid.
    ///
    /// Out-of-grid lookups are not occupancy; bounds are the collision detector's concern.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(v) if v != EMPTY)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|&v| v != EMPTY))
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> Option<&[CellValue]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Write every occupied piece cell into the grid.
    ///
    /// The placement must already be legal; callers check with
    /// [`crate::collision::collide`] first.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (x, y, v) in piece.cells() {
            let idx = self
                .index(x, y)
                .unwrap_or_else(|| panic!("merge outside board at ({}, {})", x, y));
            debug_assert_eq!(self.cells[idx], EMPTY, "merge over filled cell ({}, {})", x, y);
            self.cells[idx] = v;
        }
    }

    /// Remove every full row, shifting rows above down, and return how many went.
    ///
    /// Scans bottom to top; surviving rows are compacted toward the bottom in
    /// their original order and the freed rows at the top are emptied. This is
    /// the same result as removing each full row and re-examining its index.
    pub fn sweep(&mut self) -> u32 {
        let width = self.width as usize;
        let mut cleared = 0;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        cleared
    }

    /// Get a reference to the flat cells
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Copy out as rows (top row first)
    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        self.rows().map(<[CellValue]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<CellValue>>> for Board {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<CellValue>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<Board> for Vec<Vec<CellValue>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}
