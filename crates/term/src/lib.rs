//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer (no widget toolkit) that is then flushed to the
//! terminal one changed row at a time.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Size the view from the board, so any board dimensions render
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod cues;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use cues::{cue_for, Cue};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{cell_color, AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
