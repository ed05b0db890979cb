//! Pieces module - tetromino catalog and matrix rotation
//!
//! A [`Shape`] is a small bounding-box grid (at most 4x4) stored in a fixed
//! array with explicit width and height. Cells outside the box are always zero,
//! so derived equality compares shapes exactly.
//!
//! Rotation is a plain matrix rotation (transpose, then reverse each row), which
//! swaps the box dimensions. Four rotations return the original shape.

use crate::error::GridError;
use crate::types::{CellValue, PieceKind, EMPTY, MAX_CELL_VALUE, MAX_SHAPE_DIM};

type ShapeCells = [[CellValue; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

/// Bounding-box grid of a single tetromino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<CellValue>>", into = "Vec<Vec<CellValue>>")
)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: ShapeCells,
}

/// Get the spawn orientation for a piece kind
pub fn create_piece(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => Shape::build(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::O => Shape::build(&[&[2, 2], &[2, 2]]),
        PieceKind::L => Shape::build(&[&[0, 0, 3], &[3, 3, 3], &[0, 0, 0]]),
        PieceKind::J => Shape::build(&[&[4, 0, 0], &[4, 4, 4], &[0, 0, 0]]),
        PieceKind::I => Shape::build(&[&[5, 5, 5, 5]]),
        PieceKind::S => Shape::build(&[&[0, 6, 6], &[6, 6, 0], &[0, 0, 0]]),
        PieceKind::Z => Shape::build(&[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]]),
    }
}

impl Shape {
    /// Unchecked construction for the built-in catalog.
    fn build(rows: &[&[CellValue]]) -> Self {
        let mut cells = [[EMPTY; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..row.len()].copy_from_slice(row);
        }
        Self {
            width: rows[0].len() as u8,
            height: rows.len() as u8,
            cells,
        }
    }

    /// Build a shape from rows, validating the box and the value domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::pieces::{create_piece, Shape};
    /// use blockfall_core::types::PieceKind;
    ///
    /// let o = Shape::from_rows(&[&[2, 2], &[2, 2]]).unwrap();
    /// assert_eq!(o, create_piece(PieceKind::O));
    ///
    /// assert!(Shape::from_rows(&[&[1, 2]]).is_err());
    /// ```
    pub fn from_rows(rows: &[&[CellValue]]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if width > MAX_SHAPE_DIM || height > MAX_SHAPE_DIM {
            return Err(GridError::Dimensions {
                width,
                height,
                min: 1,
                max: MAX_SHAPE_DIM,
            });
        }

        let mut value: Option<CellValue> = None;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, &v) in row.iter().enumerate() {
                if v > MAX_CELL_VALUE {
                    return Err(GridError::ValueOutOfRange { x, y, value: v });
                }
                if v == EMPTY {
                    continue;
                }
                match value {
                    None => value = Some(v),
                    Some(first) if first != v => {
                        return Err(GridError::MixedValues { first, other: v });
                    }
                    Some(_) => {}
                }
            }
        }

        if value.is_none() {
            return Err(GridError::Empty);
        }
        Ok(Self::build(rows))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Cell inside the bounding box; zero outside it.
    pub fn get(&self, x: usize, y: usize) -> CellValue {
        if x >= self.width as usize || y >= self.height as usize {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// The single non-zero value carried by this shape.
    pub fn value(&self) -> CellValue {
        self.minos().next().map_or(EMPTY, |(_, _, v)| v)
    }

    pub fn kind(&self) -> Option<PieceKind> {
        PieceKind::from_cell(self.value())
    }

    /// Occupied cells as `(dx, dy, value)` relative to the top-left corner.
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8, CellValue)> + '_ {
        let (w, h) = (self.width as usize, self.height as usize);
        (0..h).flat_map(move |y| {
            (0..w).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != EMPTY).then_some((x as i8, y as i8, v))
            })
        })
    }

    /// Rotate 90° clockwise.
    ///
    /// Row `i` of the result is column `i` of `self` read bottom to top.
    pub fn rotate_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[EMPTY; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Rotate 90° counter-clockwise (three clockwise turns).
    pub fn rotate_ccw(&self) -> Self {
        self.rotate_cw().rotate_cw().rotate_cw()
    }

    /// Copy the bounding box out as rows.
    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        (0..self.height as usize)
            .map(|y| self.cells[y][..self.width as usize].to_vec())
            .collect()
    }
}

impl TryFrom<Vec<Vec<CellValue>>> for Shape {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<CellValue>>) -> Result<Self, Self::Error> {
        let rows: Vec<&[CellValue]> = rows.iter().map(Vec::as_slice).collect();
        Self::from_rows(&rows)
    }
}

impl From<Shape> for Vec<Vec<CellValue>> {
    fn from(shape: Shape) -> Self {
        shape.to_rows()
    }
}

/// A shape placed on the board: `(x, y)` is the bounding box's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    pub fn new(shape: Shape, x: i8, y: i8) -> Self {
        Self { shape, x, y }
    }

    /// Occupied cells in board coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, CellValue)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy, v)| (self.x + dx, self.y + dy, v))
    }

    /// Same piece shifted by `(dx, dy)`.
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
