//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and all game state. It has **no
//! dependencies** on terminals, clocks or global randomness:
//!
//! - **Deterministic**: piece kinds come from an injected [`rng::PieceSource`]
//! - **Clock-free**: the host passes elapsed milliseconds to [`Session::tick`]
//! - **Observable**: every operation returns a [`SessionDelta`] of events
//!
//! # Module Structure
//!
//! - [`board`]: runtime-sized grid, merge and line sweep
//! - [`pieces`]: the seven tetromino shapes and matrix rotation
//! - [`collision`]: the single legality predicate
//! - [`scoring`]: line points, level and gravity curves
//! - [`rng`]: seeded piece sources
//! - [`events`]: game events and listener dispatch
//! - [`session`]: the controller and gravity timer
//! - [`snapshot`]: read-only state for renderers
//! - [`shared`]: thread-safe session handle
//!
//! # Game Rules
//!
//! - Each new next piece is a uniform draw over the seven kinds (no bag)
//! - Rotation is clockwise only, with a simple alternating sideways kick
//! - A piece locks the moment it cannot descend (no lock delay)
//! - Clearing 1/2/3/4 rows scores 100/300/500/800; more rows score 200 each
//! - The level rises every 10 lines and gravity speeds up by 70ms per level,
//!   down to 100ms
//! - Topping out resets the board and stats; play continues
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameEvent, Session};
//! use blockfall_core::types::GameAction;
//!
//! let mut session = Session::seeded(12345);
//! let delta = session.start_session();
//! assert!(delta.contains(&GameEvent::SessionReset));
//!
//! session.apply(GameAction::MoveRight);
//! session.apply(GameAction::Rotate);
//! let delta = session.apply(GameAction::HardDrop);
//! assert!(delta.locked);
//!
//! // Gravity only fires once the interval is exceeded.
//! assert!(!session.tick(700).gravity_step);
//! assert!(session.tick(1).gravity_step);
//! ```

pub mod board;
pub mod collision;
pub mod error;
pub mod events;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shared;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collide, landing_y};
pub use error::GridError;
pub use events::{GameEvent, GameListener, SessionDelta};
pub use pieces::{create_piece, ActivePiece, Shape};
pub use rng::{PieceCycle, PieceSource, RandomSource, SimpleRng, UniformPieces};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score};
pub use session::{Session, SessionConfig};
pub use shared::SharedSession;
pub use snapshot::GameSnapshot;
