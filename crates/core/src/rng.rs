//! RNG module - piece sources
//!
//! The engine draws every new piece from a [`PieceSource`]:
//!
//! - [`RandomPieceSource`]: uniform random shapes for single-player games.
//! - [`QueuedPieceSource`]: shapes delivered by the multiplayer server, in
//!   arrival order.
//!
//! Also provides a simple LCG so that seeded games are reproducible.

use std::collections::VecDeque;

use crate::pieces::Piece;
use crate::types::{PieceKind, PIECE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplies the next piece to the engine
pub trait PieceSource {
    fn next_piece(&mut self) -> Piece;
}

/// Uniformly random pieces from a seeded LCG
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    rng: SimpleRng,
}

impl RandomPieceSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomPieceSource {
    fn next_piece(&mut self) -> Piece {
        let id = self.rng.next_range(PIECE_COUNT as u32) as u8;
        // next_range keeps id below PIECE_COUNT
        let kind = PieceKind::from_id(id).unwrap_or(PieceKind::Dot);
        Piece::new(kind)
    }
}

/// FIFO of piece shapes fed by the multiplayer server
///
/// If the queue runs dry the source falls back to a seeded random piece so
/// the turn loop never stalls; every fallback draw is counted and logged.
#[derive(Debug, Clone)]
pub struct QueuedPieceSource {
    queue: VecDeque<PieceKind>,
    fallback: RandomPieceSource,
    underflows: u32,
}

impl QueuedPieceSource {
    pub fn new(fallback_seed: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: RandomPieceSource::new(fallback_seed),
            underflows: 0,
        }
    }

    /// Append a shape delivered by the server
    pub fn push(&mut self, kind: PieceKind) {
        self.queue.push_back(kind);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued shapes, front first
    pub fn pending(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    /// Number of pieces that had to be drawn from the fallback
    pub fn underflows(&self) -> u32 {
        self.underflows
    }
}

impl PieceSource for QueuedPieceSource {
    fn next_piece(&mut self) -> Piece {
        match self.queue.pop_front() {
            Some(kind) => Piece::new(kind),
            None => {
                self.underflows += 1;
                tracing::warn!(
                    underflows = self.underflows,
                    "piece queue empty, drawing a local random piece"
                );
                self.fallback.next_piece()
            }
        }
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_piece(&mut self) -> Piece {
        (**self).next_piece()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_random_source_covers_every_shape() {
        let mut source = RandomPieceSource::new(7);
        let mut seen = [false; PIECE_COUNT as usize];
        for _ in 0..2000 {
            seen[source.next_piece().kind.id() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing shapes: {:?}", seen);
    }

    #[test]
    fn test_random_source_same_seed_same_sequence() {
        let mut a = RandomPieceSource::new(99);
        let mut b = RandomPieceSource::new(99);
        for _ in 0..50 {
            assert_eq!(a.next_piece(), b.next_piece());
        }
    }

    #[test]
    fn test_queued_source_is_fifo() {
        let mut source = QueuedPieceSource::new(1);
        source.push(PieceKind::Line);
        source.push(PieceKind::X);

        assert_eq!(source.next_piece().kind, PieceKind::Line);
        assert_eq!(source.next_piece().kind, PieceKind::X);
        assert_eq!(source.underflows(), 0);
    }

    #[test]
    fn test_queued_source_falls_back_when_empty() {
        let mut source = QueuedPieceSource::new(1);
        let _ = source.next_piece();
        assert_eq!(source.underflows(), 1);
        assert!(source.is_empty());
    }
}
