//! Random sources for the fallback draw.
//!
//! The resolver picks a fallback reply through [`RandomSource`] so callers
//! can swap the thread RNG for a deterministic source.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Picks an index into a non-empty sequence.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`. Callers guarantee `len > 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform draw from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Always returns the same index, clamped to the sequence length.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

/// Walks the sequence in order, wrapping around.
#[derive(Debug, Default)]
pub struct Cycle {
    next: AtomicUsize,
}

impl Cycle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RandomSource for Cycle {
    fn pick(&self, len: usize) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed) % len
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn pick(&self, len: usize) -> usize {
        (**self).pick(len)
    }
}
