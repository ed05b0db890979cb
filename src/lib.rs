//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names so hosts and tests can use
//! `blockfall::{core, input, term, types}` without naming each package.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
