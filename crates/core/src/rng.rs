//! RNG module - injectable piece randomness
//!
//! The session never calls an ambient random function. It draws piece kinds
//! from a [`PieceSource`]:
//!
//! - [`UniformPieces`]: uniform choice over the seven kinds on every draw
//!   (no bag), backed by any [`RandomSource`].
//! - [`PieceCycle`]: repeats a fixed list, for replays and scripted tests.
//!
//! [`SimpleRng`] is a small LCG so the same seed always yields the same game.

use crate::types::PieceKind;

/// Source of raw 32-bit randomness
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Random value in `[0, max)`
    fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        // Multiply-shift keeps the high bits; LCG low bits have short periods.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Supplier of the kind for each newly generated next piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

/// Uniform draw over all seven kinds
#[derive(Debug, Clone)]
pub struct UniformPieces<R = SimpleRng> {
    rng: R,
}

impl UniformPieces<SimpleRng> {
    pub fn seeded(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> UniformPieces<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for UniformPieces<SimpleRng> {
    fn default() -> Self {
        Self::seeded(1)
    }
}

impl<R: RandomSource> PieceSource for UniformPieces<R> {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Repeats a fixed sequence of kinds forever
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCycle {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl PieceCycle {
    /// Panics on an empty list.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "PieceCycle needs at least one kind");
        Self { kinds, pos: 0 }
    }

    /// Every draw returns `kind`
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for PieceCycle {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}
