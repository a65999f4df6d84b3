//! RNG module - 7-bag random piece generation
//!
//! Implements the "bag" randomizer: the queue is refilled with one shuffled
//! copy of all seven kinds (I, J, L, O, S, T, Z) whenever it runs dry, so every
//! seven draws contain each kind exactly once and the same kind can never be
//! more than 12 draws apart.
//!
//! Also provides a simple LCG so a game can be replayed from its seed.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

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
    /// Scales by the high bits; the low bits of an LCG have short periods.
    /// Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Bag-based piece sequence
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Undrawn kinds; drawn from the back
    queue: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create an empty queue; the first draw fills the first bag.
    pub fn new(seed: u32) -> Self {
        Self {
            queue: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Start a new bag by repeatedly taking a random remaining kind.
    ///
    /// Returns the kind drawn first and queues the other six.
    fn refill(&mut self) -> PieceKind {
        let mut remaining = ArrayVec::from(PieceKind::ALL);
        let mut bag = [PieceKind::I; 7];
        for slot in &mut bag {
            let pick = self.rng.next_range(remaining.len() as u32) as usize;
            *slot = remaining.remove(pick);
        }
        log::trace!("refilled piece bag: {:?}", bag);

        let [rest @ .., drawn] = bag;
        self.queue = rest.into_iter().collect();
        drawn
    }

    /// Draw the next piece kind, starting a new bag when the current one is empty.
    pub fn next(&mut self) -> PieceKind {
        match self.queue.pop() {
            Some(kind) => kind,
            None => self.refill(),
        }
    }

    /// Kinds left in the current bag; the last element is drawn next.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.queue
    }

    /// Get the current RNG state (for restarting a game with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
