//! Read-only view of a session for renderers and observers.

use crate::board::Board;
use crate::pieces::{ActivePiece, Shape};
use crate::scoring::drop_interval_ms;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<ActivePiece>,
    /// Landing row of the active piece
    pub ghost_y: Option<i8>,
    pub next: Option<Shape>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub running: bool,
    pub started: bool,
}

impl GameSnapshot {
    /// Snapshot of an idle session on an empty `cols x rows` board.
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            board: Board::new(cols, rows),
            active: None,
            ghost_y: None,
            next: None,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
            running: false,
            started: false,
        }
    }

    /// Started but not running.
    pub fn paused(&self) -> bool {
        self.started && !self.running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}
