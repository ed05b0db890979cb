//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no required dependencies, so they can be used
//! by the game core, the terminal view and any other host alike.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Cell Values
//!
//! Every board and shape cell holds a small integer. `0` is empty, `1..=7`
//! identify the tetromino that settled there:
//!
//! | Kind | Value |
//! |------|-------|
//! | T | 1 |
//! | O | 2 |
//! | L | 3 |
//! | J | 4 |
//! | I | 5 |
//! | S | 6 |
//! | Z | 7 |
//!
//! # Drop Intervals by Level
//!
//! Gravity speeds up linearly with level and is clamped at a floor:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 700ms |
//! | 2 | 630ms |
//! | 5 | 420ms |
//! | 10 | 70ms -> clamped to 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.cell_value(), 1);
//! assert_eq!(PieceKind::from_cell(5), Some(PieceKind::I));
//!
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Smallest accepted board side; every tetromino must fit at spawn.
pub const MIN_BOARD_DIM: u8 = 4;

/// Largest accepted board side. Keeps all coordinates inside `i8`.
pub const MAX_BOARD_DIM: u8 = 64;

/// Largest side of a piece bounding box.
pub const MAX_SHAPE_DIM: usize = 4;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 700;

/// Interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 70;

/// Gravity floor
pub const MIN_DROP_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for clearing N rows in a single sweep (index = N).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Per-row points for a sweep larger than the table covers.
pub const FALLBACK_POINTS_PER_LINE: u32 = 200;

/// Value stored in a board or shape cell.
///
/// `0` is empty; `1..=7` is [`PieceKind::cell_value`].
pub type CellValue = u8;

/// The empty cell value.
pub const EMPTY: CellValue = 0;

/// Highest valid cell value.
pub const MAX_CELL_VALUE: CellValue = 7;

/// The seven tetromino piece kinds
///
/// Declared in cell-value order so `kind as u8 + 1 == kind.cell_value()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

impl PieceKind {
    /// Every kind, ordered by cell value.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }

    /// Value this kind writes into the board when it settles.
    pub fn cell_value(&self) -> CellValue {
        *self as CellValue + 1
    }

    /// Inverse of [`PieceKind::cell_value`]; `None` for empty or out-of-domain values.
    pub fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            1..=MAX_CELL_VALUE => Some(Self::ALL[(value - 1) as usize]),
            _ => None,
        }
    }
}

/// Discrete player commands.
///
/// Every command is a no-op while the session is not running (except
/// [`GameAction::Restart`] and [`GameAction::Pause`], which drive the lifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Descend one row, locking the piece if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise with a horizontal wall kick
    Rotate,
    /// Drop to the landing row and lock immediately
    HardDrop,
    /// Toggle the running flag
    Pause,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Parse action from a camelCase (or any-case) name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
