//! Audio cues derived from game events.
//!
//! The core never plays sound. Hosts translate events into cues and decide
//! what to do with them; the terminal runner rings the bell for the loud ones.

use crate::core::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Rotate,
    Drop,
    Line,
    GameOver,
}

impl Cue {
    /// Worth interrupting the player for.
    pub fn is_loud(self) -> bool {
        matches!(self, Cue::Line | Cue::GameOver)
    }
}

pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::PieceRotated { success: true } => Some(Cue::Rotate),
        GameEvent::PieceDropped => Some(Cue::Drop),
        GameEvent::LinesCleared { .. } => Some(Cue::Line),
        GameEvent::ToppedOut => Some(Cue::GameOver),
        _ => None,
    }
}
