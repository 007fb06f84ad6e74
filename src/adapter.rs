//! Dense index over the sieve result.
//!
//! Positions `[0, initial_primes.len())` address the initial primes; every
//! position after that addresses one wheel candidate,
//! `cycle * primorial + spoke`, in ascending order. A position resolves to
//! its prime, or to `0` when the candidate is composite, outside every
//! requested interval, or answered by the initial-prime segment instead.
//!
//! ```text
//! position:  0  1  2  3 | 4  5  6  7  8  9 ...
//! value:     2  3  5  7 | 1  5  7 11 13 17 ...      (wheel mod 6, floor 8)
//! at():      0  0  0  0 | 0  0  0 11 13 17 ...      for [10, 50]
//! ```

use crate::bitmap::CompositeBitmap;
use crate::error::{Result, SieveError};
use crate::interval::IntervalSet;
use crate::math::divisible_density;
use crate::wheel::Wheel;

/// Read-only view borrowing a finished search. `Sync`: any number of readers
/// may call [`PrimeIndex::at`] concurrently.
#[derive(Debug, Clone, Copy)]
pub struct PrimeIndex<'a> {
    intervals: &'a IntervalSet,
    wheel: &'a Wheel,
    bitmap: Option<&'a CompositeBitmap>,
    size: usize,
}

impl<'a> PrimeIndex<'a> {
    /// Without a bitmap only the initial primes are addressable.
    pub fn new(intervals: &'a IntervalSet, wheel: &'a Wheel, bitmap: Option<&'a CompositeBitmap>) -> Self {
        let initial = wheel.initial_primes().len();
        let size = match bitmap {
            Some(_) if wheel.num_spokes() > 0 => {
                let exact = wheel.wheel_position_count() as usize;
                initial + estimated_size(wheel).max(exact)
            }
            _ => initial,
        };
        Self { intervals, wheel, bitmap, size }
    }

    /// Share of integers divisible by some wheel prime.
    pub fn density(&self) -> f64 {
        divisible_density(&self.wheel.initial_primes()[..self.wheel.wheel_primes()])
    }

    /// Density estimate of the wheel positions up to the search ceiling.
    pub fn estimated_size(&self) -> usize {
        estimated_size(self.wheel)
    }

    /// Number of addressable positions. An upper bound on the primes found:
    /// most positions resolve to `0`.
    pub fn effective_size(&self) -> usize {
        self.size
    }

    /// Value at `position`: a prime inside a requested interval, or `0`.
    pub fn at(&self, position: usize) -> Result<u32> {
        if position >= self.size {
            return Err(SieveError::OutOfRange { position, size: self.size });
        }

        let initial = self.wheel.initial_primes();
        if let Some(&p) = initial.get(position) {
            return Ok(if self.intervals.contains(p as u64) { p } else { 0 });
        }

        let Some(bitmap) = self.bitmap else { return Ok(0) };
        let w = position - initial.len();
        let spokes = self.wheel.spokes();
        let cycle = (w / spokes.len()) as u64;
        let candidate = cycle * self.wheel.primorial() as u64 + spokes[w % spokes.len()] as u64;

        if candidate < self.wheel.sieve_floor() as u64
            || candidate > self.wheel.max() as u64
            || bitmap.is_marked(candidate)
            || !self.intervals.contains(candidate)
        {
            return Ok(0);
        }
        Ok(candidate as u32)
    }

    /// Every non-zero value in position order, which is ascending.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.size)
            .filter_map(move |position| self.at(position).ok())
            .filter(|&n| n != 0)
    }
}

/// `floor(max * (1 - density)) + 1`: the expected count of integers in
/// `[0, max]` free of the wheel primes.
fn estimated_size(wheel: &Wheel) -> usize {
    let wheel_primes = &wheel.initial_primes()[..wheel.wheel_primes()];
    let coprime = 1.0 - divisible_density(wheel_primes);
    (wheel.max() as f64 * coprime).floor() as usize + 1
}
