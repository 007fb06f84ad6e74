//! Wheel factorization: initial primes, primorial and the residue spokes.
//!
//! A wheel built from the first `k` primes keeps only the residues modulo
//! their product (the primorial) that share no factor with it. Every integer
//! free of the wheel primes is `cycle * primorial + spoke` for exactly one
//! spoke, so the sieve and the index only ever look at those positions.

use tracing::debug;

use crate::error::{Result, SieveError};
use crate::math::{isqrt, trial_division_primes};

// ─── Tuning ────────────────────────────────────────────────────────────────

/// Largest thread count the wheel tuning table has a band for.
pub const MAX_THREADS: usize = 48;

/// Largest wheel accepted as an explicit override (primorial 30,030).
pub const MAX_WHEEL_PRIMES: usize = 6;

/// Wheel size for a thread count and search ceiling.
///
/// Few threads over a small range get a coarse wheel; larger wheels shrink
/// the candidate space at the cost of a bigger spoke table per thread.
pub fn wheel_primes_for(threads: usize, max: u32) -> Result<usize> {
    match threads {
        1..=2 if max < 100_000 => Ok(2),
        1..=2 if max < 1_000_000 => Ok(3),
        1..=2 => Ok(4),
        3..=8 if max < 2_000_000 => Ok(3),
        3..=8 => Ok(4),
        9..=MAX_THREADS => Ok(4),
        _ => Err(SieveError::UnsupportedThreadCount { threads, max: MAX_THREADS }),
    }
}

// ─── Wheel ─────────────────────────────────────────────────────────────────

/// Immutable wheel metadata for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheel {
    initial_primes: Vec<u32>,
    wheel_primes: usize,
    primorial: u32,
    spokes: Vec<u32>,
    sieve_floor: u32,
    max: u32,
}

impl Wheel {
    /// Every prime below [`Wheel::sieve_floor`], ascending.
    pub fn initial_primes(&self) -> &[u32] {
        &self.initial_primes
    }

    /// Number of leading primes baked into the wheel.
    pub fn wheel_primes(&self) -> usize {
        self.wheel_primes
    }

    /// Initial primes beyond the wheel; the ones the workers sieve with.
    pub fn sieving_primes(&self) -> &[u32] {
        &self.initial_primes[self.wheel_primes..]
    }

    pub fn max_wheel_prime(&self) -> u32 {
        self.initial_primes[self.wheel_primes - 1]
    }

    pub fn primorial(&self) -> u32 {
        self.primorial
    }

    /// Ascending residues coprime to the primorial, starting with `1`.
    /// Empty for a degenerate wheel.
    pub fn spokes(&self) -> &[u32] {
        &self.spokes
    }

    pub fn num_spokes(&self) -> usize {
        self.spokes.len()
    }

    /// Values below the floor are answered from the initial primes, values
    /// at or above it from the wheel positions.
    pub fn sieve_floor(&self) -> u32 {
        self.sieve_floor
    }

    /// Global search ceiling.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// The initial primes already cover the whole range; no sieve is needed.
    pub fn is_degenerate(&self) -> bool {
        self.max_wheel_prime() >= self.max
    }

    /// Whether `n` falls on a spoke.
    pub fn is_on_spoke(&self, n: u64) -> bool {
        let residue = (n % self.primorial as u64) as u32;
        self.spokes.binary_search(&residue).is_ok()
    }

    /// Exact number of wheel positions whose value is at most `max`.
    pub fn wheel_position_count(&self) -> u64 {
        if self.spokes.is_empty() {
            return 0;
        }
        let primorial = self.primorial as u64;
        let max = self.max as u64;
        let partial = self.spokes.partition_point(|&s| s as u64 <= max % primorial);
        (max / primorial) * self.spokes.len() as u64 + partial as u64
    }

    /// Bit length of the composite bitmap: `max` itself must be addressable.
    pub fn bitmap_len(&self) -> u64 {
        self.max.max(self.primorial) as u64 + 1
    }
}

// ─── Builder ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct WheelBuilder {
    max: u32,
    wheel_primes: usize,
}

impl WheelBuilder {
    /// Wheel of `wheel_primes` primes over `[0, max]`.
    pub fn new(max: u32, wheel_primes: usize) -> Result<Self> {
        if !(1..=MAX_WHEEL_PRIMES).contains(&wheel_primes) {
            return Err(SieveError::UnsupportedWheel {
                primes: wheel_primes,
                max: MAX_WHEEL_PRIMES,
            });
        }
        Ok(Self { max, wheel_primes })
    }

    /// Wheel sized by the tuning table for `threads`.
    pub fn for_threads(max: u32, threads: usize) -> Result<Self> {
        Self::new(max, wheel_primes_for(threads, max)?)
    }

    pub fn build(self) -> Wheel {
        let k = self.wheel_primes;
        let root = isqrt(self.max as u64) as u32;
        let initial_primes = trial_division_primes(root + 1, k);

        let max_wheel_prime = initial_primes[k - 1];
        let last = initial_primes[initial_primes.len() - 1];
        let sieve_floor = (root + 1).max(last + 1);
        let primorial: u32 = initial_primes[..k].iter().product();

        let spokes = if max_wheel_prime >= self.max {
            Vec::new()
        } else {
            wheel_spokes(&initial_primes[..k], primorial, max_wheel_prime)
        };

        debug!(
            wheel_primes = k,
            primorial,
            spokes = spokes.len(),
            initial_primes = initial_primes.len(),
            sieve_floor,
            "built wheel"
        );

        Wheel {
            initial_primes,
            wheel_primes: k,
            primorial,
            spokes,
            sieve_floor,
            max: self.max,
        }
    }
}

/// Residues in `[1, primorial)` free of every wheel prime.
///
/// Bit-packed sieve over `[0, primorial)` striking multiples of the wheel
/// primes only: 121 survives the 210-wheel even though it is composite,
/// since `121 + 210k` can still be prime.
fn wheel_spokes(wheel_primes: &[u32], primorial: u32, above: u32) -> Vec<u32> {
    let n = primorial as usize;
    let mut b = vec![!0u64; (n >> 6) + 1];

    for &p in wheel_primes {
        let p = p as usize;
        let mut j = p * p;
        while j < n {
            b[j >> 6] &= !(1u64 << (j & 63));
            j += p;
        }
    }

    let mut spokes = vec![1];
    for (i, &word) in b.iter().enumerate() {
        let mut w = word;
        while w != 0 {
            let r = (i << 6) + w.trailing_zeros() as usize;
            if r >= n { break; }
            if r > above as usize {
                spokes.push(r as u32);
            }
            w &= w - 1;
        }
    }
    spokes
}
