//! Fork–join driver: sizes the wheel, splits the spokes, runs the workers.

use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::adapter::PrimeIndex;
use crate::bitmap::CompositeBitmap;
use crate::error::{Result, SieveError};
use crate::interval::IntervalSet;
use crate::wheel::{Wheel, WheelBuilder, MAX_THREADS};
use crate::worker::SieveWorker;

// ─── Configuration ─────────────────────────────────────────────────────────

/// Search knobs. Everything left unset is derived from the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    threads: Option<usize>,
    wheel_primes: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed worker count; must fall inside the tuning table (`1..=48`).
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Fixed wheel size, overriding the tuning table.
    pub fn wheel_primes(mut self, wheel_primes: usize) -> Self {
        self.wheel_primes = Some(wheel_primes);
        self
    }

    /// Worker count for a search over `intervals` intervals.
    ///
    /// Automatic sizing uses `min(2 * cores, intervals)`, clamped to the
    /// table ceiling; an explicit count outside the table is rejected.
    pub fn resolve_threads(&self, intervals: usize) -> Result<usize> {
        match self.threads {
            Some(threads) if (1..=MAX_THREADS).contains(&threads) => Ok(threads),
            Some(threads) => Err(SieveError::UnsupportedThreadCount { threads, max: MAX_THREADS }),
            None => {
                let wanted = (2 * num_cpus::get()).min(intervals).max(1);
                if wanted > MAX_THREADS {
                    warn!(wanted, max = MAX_THREADS, "clamping thread count");
                    Ok(MAX_THREADS)
                } else {
                    Ok(wanted)
                }
            }
        }
    }
}

// ─── Partitioning ──────────────────────────────────────────────────────────

/// Splits spokes into at most `groups` contiguous, near-equal slices.
///
/// The first `len % groups` slices take one extra spoke, so every spoke is
/// owned by exactly one slice. Never returns an empty slice unless `spokes`
/// itself is empty.
pub fn partition_spokes(spokes: &[u32], groups: usize) -> Vec<&[u32]> {
    let groups = groups.clamp(1, spokes.len().max(1));
    let base = spokes.len() / groups;
    let extra = spokes.len() % groups;

    let mut slices = Vec::with_capacity(groups);
    let mut start = 0;
    for g in 0..groups {
        let len = base + usize::from(g < extra);
        slices.push(&spokes[start..start + len]);
        start += len;
    }
    slices
}

/// Runs one worker per spoke slice on scoped threads and waits for all of them.
///
/// Returns the total number of strikes. A panicking worker propagates the
/// panic once the scope joins.
pub fn mark_composites(
    wheel: &Wheel,
    intervals: &IntervalSet,
    bitmap: &CompositeBitmap,
    threads: usize,
) -> u64 {
    let slices = partition_spokes(wheel.spokes(), threads);
    debug!(
        workers = slices.len(),
        spokes_per_worker = slices.first().map_or(0, |s| s.len()),
        "dispatching sieve workers"
    );

    thread::scope(|scope| {
        let handles: Vec<_> = slices
            .into_iter()
            .enumerate()
            .map(|(id, spokes)| {
                let worker = SieveWorker::new(id, wheel, spokes, intervals, bitmap);
                scope.spawn(move || {
                    let marks = worker.run();
                    debug!(worker = worker.id(), spokes = worker.spokes().len(), marks, "worker finished");
                    marks
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .sum()
    })
}

// ─── Coordinator ───────────────────────────────────────────────────────────

/// Owns the wheel and the bitmap for one search.
#[derive(Debug)]
pub struct SieveCoordinator {
    intervals: IntervalSet,
    wheel: Wheel,
    bitmap: Option<CompositeBitmap>,
    threads: usize,
}

impl SieveCoordinator {
    /// Resolves threads, builds the wheel and allocates the bitmap.
    ///
    /// The bitmap is skipped when the initial primes already cover the range.
    pub fn new(intervals: IntervalSet, config: SearchConfig) -> Result<Self> {
        let max = intervals.last_high().ok_or(SieveError::EmptyIntervals)?;
        let threads = config.resolve_threads(intervals.len())?;
        let builder = match config.wheel_primes {
            Some(k) => WheelBuilder::new(max, k)?,
            None => WheelBuilder::for_threads(max, threads)?,
        };
        let wheel = builder.build();

        let bitmap = if wheel.is_degenerate() {
            warn!(max, max_wheel_prime = wheel.max_wheel_prime(), "range covered by initial primes, skipping sieve");
            None
        } else {
            Some(CompositeBitmap::new(wheel.bitmap_len()))
        };

        Ok(Self { intervals, wheel, bitmap, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn intervals(&self) -> &IntervalSet {
        &self.intervals
    }

    /// Marks every composite and hands the finished state to a [`PrimeSearch`].
    pub fn run(self) -> PrimeSearch {
        let start = Instant::now();

        let marks = match &self.bitmap {
            Some(bitmap) => mark_composites(&self.wheel, &self.intervals, bitmap, self.threads),
            None => 0,
        };

        info!(
            low = ?self.intervals.first_low(),
            high = ?self.intervals.last_high(),
            intervals = self.intervals.len(),
            threads = self.threads,
            wheel_primes = self.wheel.wheel_primes(),
            marks,
            elapsed = ?start.elapsed(),
            "sieve complete"
        );

        PrimeSearch {
            intervals: self.intervals,
            wheel: self.wheel,
            bitmap: self.bitmap,
        }
    }
}

// ─── Result ────────────────────────────────────────────────────────────────

/// A completed search. Read-only from here on.
#[derive(Debug)]
pub struct PrimeSearch {
    intervals: IntervalSet,
    wheel: Wheel,
    bitmap: Option<CompositeBitmap>,
}

impl PrimeSearch {
    /// Dense, position-addressable view over the result.
    pub fn index(&self) -> PrimeIndex<'_> {
        PrimeIndex::new(&self.intervals, &self.wheel, self.bitmap.as_ref())
    }

    /// All primes found, ascending.
    pub fn primes(&self) -> Vec<u32> {
        self.index().iter().collect()
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn intervals(&self) -> &IntervalSet {
        &self.intervals
    }

    pub fn bitmap(&self) -> Option<&CompositeBitmap> {
        self.bitmap.as_ref()
    }
}

/// Searches `intervals` and returns every prime inside them, ascending.
pub fn find_primes(intervals: IntervalSet, config: SearchConfig) -> Result<Vec<u32>> {
    Ok(SieveCoordinator::new(intervals, config)?.run().primes())
}
