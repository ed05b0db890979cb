//! Errors for grids built from caller-supplied rows.
//!
//! Gameplay itself has no failure path; these only guard the constructors
//! that accept external data (puzzle setups, replays, tests).

use thiserror::Error;

use crate::types::CellValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("cell value {value} at ({x}, {y}) is outside 0..=7")]
    ValueOutOfRange { x: usize, y: usize, value: CellValue },

    #[error("grid is {width}x{height}, each side must be within {min}..={max}")]
    Dimensions {
        width: usize,
        height: usize,
        min: usize,
        max: usize,
    },

    #[error("board is {width}x{height}, session expects {cols}x{rows}")]
    SizeMismatch {
        width: u8,
        height: u8,
        cols: u8,
        rows: u8,
    },

    #[error("settled cell at ({x}, {y}) is under the active piece")]
    Overlap { x: i8, y: i8 },

    #[error("shape mixes cell values {first} and {other}")]
    MixedValues { first: CellValue, other: CellValue },
}
