//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every key
//! press produces at most one action; terminal auto-repeat is left to the
//! caller.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
