//! Notification interface between the game core and its collaborators.
//!
//! Every session operation returns a [`SessionDelta`] holding the events it
//! produced, in order. Hosts either match on [`GameEvent`] directly or implement
//! [`GameListener`] and call [`SessionDelta::dispatch`].

use arrayvec::ArrayVec;

use crate::pieces::Shape;

/// Upper bound on events produced by a single operation.
///
/// A lock that clears rows, levels up and then tops out emits six.
pub const MAX_EVENTS_PER_STEP: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    PieceMoved,
    /// Only emitted for rotations that were applied.
    PieceRotated {
        success: bool,
    },
    /// A single-row descent that did not lock.
    PieceDropped,
    LinesCleared {
        count: u32,
        total_score: u32,
        total_lines: u32,
    },
    LevelChanged {
        level: u32,
    },
    ToppedOut,
    SessionReset,
    NextPieceChanged {
        shape: Shape,
    },
}

impl GameEvent {
    pub fn dispatch<L: GameListener + ?Sized>(&self, listener: &mut L) {
        match *self {
            GameEvent::PieceMoved => listener.on_piece_moved(),
            GameEvent::PieceRotated { success } => listener.on_piece_rotated(success),
            GameEvent::PieceDropped => listener.on_piece_dropped(),
            GameEvent::LinesCleared {
                count,
                total_score,
                total_lines,
            } => listener.on_lines_cleared(count, total_score, total_lines),
            GameEvent::LevelChanged { level } => listener.on_level_changed(level),
            GameEvent::ToppedOut => listener.on_topped_out(),
            GameEvent::SessionReset => listener.on_session_reset(),
            GameEvent::NextPieceChanged { ref shape } => listener.on_next_piece_changed(shape),
        }
    }
}

/// Callback-style consumer of game events. Every method defaults to a no-op.
pub trait GameListener {
    fn on_piece_moved(&mut self) {}
    fn on_piece_rotated(&mut self, _success: bool) {}
    fn on_piece_dropped(&mut self) {}
    fn on_lines_cleared(&mut self, _count: u32, _total_score: u32, _total_lines: u32) {}
    fn on_level_changed(&mut self, _level: u32) {}
    fn on_topped_out(&mut self) {}
    fn on_session_reset(&mut self) {}
    fn on_next_piece_changed(&mut self, _shape: &Shape) {}
}

/// Outcome of one session step (a tick, a command or a lifecycle call).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDelta {
    /// Events in emission order
    pub events: ArrayVec<GameEvent, MAX_EVENTS_PER_STEP>,
    /// Gravity triggered a descent during this tick
    pub gravity_step: bool,
    /// A piece was merged into the board
    pub locked: bool,
    /// Rows removed by the sweep after a lock
    pub lines_cleared: u32,
}

impl SessionDelta {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && !self.gravity_step && !self.locked
    }

    /// Panics past `MAX_EVENTS_PER_STEP`; no operation emits that many.
    pub(crate) fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    pub fn dispatch<L: GameListener + ?Sized>(&self, listener: &mut L) {
        for event in &self.events {
            event.dispatch(listener);
        }
    }
}
