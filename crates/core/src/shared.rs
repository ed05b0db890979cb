//! Shared session handle for hosts that drive input and gravity from
//! different threads.
//!
//! The mutex serializes every operation, so a tick and a command never
//! interleave inside the session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::SessionDelta;
use crate::rng::{PieceSource, UniformPieces};
use crate::session::Session;
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

#[derive(Debug)]
pub struct SharedSession<S = UniformPieces> {
    inner: Arc<Mutex<Session<S>>>,
}

impl<S> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PieceSource> SharedSession<S> {
    pub fn new(session: Session<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    // A panic in `with` poisons the lock; the session itself is still usable.
    fn lock(&self) -> MutexGuard<'_, Session<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn apply(&self, action: GameAction) -> SessionDelta {
        self.lock().apply(action)
    }

    pub fn tick(&self, elapsed_ms: u32) -> SessionDelta {
        self.lock().tick(elapsed_ms)
    }

    pub fn start_session(&self) -> SessionDelta {
        self.lock().start_session()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.lock().snapshot_into(out);
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session<S>) -> R) -> R {
        f(&mut self.lock())
    }
}

impl<S: PieceSource> From<Session<S>> for SharedSession<S> {
    fn from(session: Session<S>) -> Self {
        Self::new(session)
    }
}
