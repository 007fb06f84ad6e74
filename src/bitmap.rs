//! Shared composite flags, one bit per integer.
//!
//! Bits are packed 64 to a word the same way the flat sieve packs them,
//! but each word is an `AtomicU64` so that workers can strike composites
//! through `&self` while the bitmap is shared. A strike is a single
//! `fetch_or`: bits only ever go from 0 to 1, so two workers hitting the
//! same word (or the same bit) cannot lose or tear each other's writes.
//!
//! Reads use `Relaxed` loads. They are only issued once every worker has
//! been joined, and the join is what makes the strikes visible.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct CompositeBitmap {
    words: Box<[AtomicU64]>,
    len: u64,
}

impl CompositeBitmap {
    /// All-clear bitmap over `[0, len)`.
    pub fn new(len: u64) -> Self {
        let num_words = ((len >> 6) + 1) as usize;
        let words = (0..num_words).map(|_| AtomicU64::new(0)).collect();
        Self { words, len }
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flags `n` as composite.
    ///
    /// Panics if `n` is outside the bitmap: a worker striking past the end
    /// means the wheel and the bitmap disagree about the search range.
    #[inline]
    pub fn mark(&self, n: u64) {
        assert!(n < self.len, "composite {n} outside bitmap of {} bits", self.len);
        self.words[(n >> 6) as usize].fetch_or(1u64 << (n & 63), Ordering::Relaxed);
    }

    #[inline]
    pub fn is_marked(&self, n: u64) -> bool {
        assert!(n < self.len, "position {n} outside bitmap of {} bits", self.len);
        (self.words[(n >> 6) as usize].load(Ordering::Relaxed) >> (n & 63)) & 1 == 1
    }

    /// Number of flagged integers.
    pub fn count_marked(&self) -> u64 {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as u64)
            .sum()
    }

    /// Copy of the raw words.
    pub fn snapshot(&self) -> Vec<u64> {
        self.words.iter().map(|w| w.load(Ordering::Relaxed)).collect()
    }
}
