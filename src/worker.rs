//! One sieve worker: strikes composites on its own slice of spokes.

use crate::bitmap::CompositeBitmap;
use crate::interval::{Interval, IntervalSet};
use crate::math::mod_inverse;
use crate::wheel::Wheel;

/// Marks, for every requested interval, the multiples of each sieving prime
/// that land on the worker's spokes.
///
/// Workers share the wheel, the intervals and the bitmap read-only; the only
/// write is an idempotent bit strike, so workers never coordinate.
#[derive(Debug, Clone, Copy)]
pub struct SieveWorker<'a> {
    id: usize,
    bitmap: &'a CompositeBitmap,
    sieving_primes: &'a [u32],
    spokes: &'a [u32],
    intervals: &'a [Interval],
    primorial: u64,
    sieve_floor: u64,
}

impl<'a> SieveWorker<'a> {
    pub fn new(
        id: usize,
        wheel: &'a Wheel,
        spokes: &'a [u32],
        intervals: &'a IntervalSet,
        bitmap: &'a CompositeBitmap,
    ) -> Self {
        Self {
            id,
            bitmap,
            sieving_primes: wheel.sieving_primes(),
            spokes,
            intervals: intervals.as_slice(),
            primorial: wheel.primorial() as u64,
            sieve_floor: wheel.sieve_floor() as u64,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn spokes(&self) -> &'a [u32] {
        self.spokes
    }

    /// Runs the marking pass and returns the number of strikes made.
    pub fn run(&self) -> u64 {
        let mut marks = 0;
        for interval in self.intervals {
            let hi = interval.high() as u64;
            // Everything below the floor is answered by the initial primes.
            if hi < self.sieve_floor {
                continue;
            }
            let start = (interval.low() as u64).max(self.sieve_floor);

            for &p in self.sieving_primes {
                let p = p as u64;
                let square = p * p;
                if square > hi {
                    break;
                }
                let first = square.max(start.div_ceil(p) * p);
                marks += self.mark_prime(p, first, hi);
            }
        }
        marks
    }

    /// Strikes multiples of `p` in `[first, hi]` on each of this worker's spokes.
    ///
    /// `p` is coprime to the primorial, so among `first + k*p` exactly one
    /// `k < primorial` lands on a given spoke: `k = (spoke - first) * p⁻¹`.
    /// From there the next hit on the same spoke is `p * primorial` further on.
    #[inline]
    fn mark_prime(&self, p: u64, first: u64, hi: u64) -> u64 {
        let primorial = self.primorial;
        let Some(inverse) = mod_inverse(p, primorial) else { return 0 };
        let stride = p * primorial;
        let offset = first % primorial;
        let mut marks = 0;

        for &spoke in self.spokes {
            let delta = (spoke as u64 + primorial - offset) % primorial;
            let mut j = first + (delta * inverse % primorial) * p;
            while j <= hi {
                self.bitmap.mark(j);
                marks += 1;
                j += stride;
            }
        }
        marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::WheelBuilder;

    fn marked(bitmap: &CompositeBitmap) -> Vec<u64> {
        (0..bitmap.len()).filter(|&n| bitmap.is_marked(n)).collect()
    }

    #[test]
    fn test_marks_wheel_composites() {
        let intervals = IntervalSet::from_unsorted([Interval::new(10, 50)]);
        let wheel = WheelBuilder::new(50, 2).unwrap().build();
        let bitmap = CompositeBitmap::new(wheel.bitmap_len());

        let worker = SieveWorker::new(0, &wheel, wheel.spokes(), &intervals, &bitmap);
        assert_eq!(worker.run(), 3);
        assert_eq!(marked(&bitmap), vec![25, 35, 49]);
    }

    #[test]
    fn test_interval_high_bound_is_marked() {
        let intervals = IntervalSet::from_unsorted([Interval::new(40, 49)]);
        let wheel = WheelBuilder::new(49, 2).unwrap().build();
        let bitmap = CompositeBitmap::new(wheel.bitmap_len());

        SieveWorker::new(0, &wheel, wheel.spokes(), &intervals, &bitmap).run();
        assert!(bitmap.is_marked(49));
    }

    #[test]
    fn test_spoke_slices_split_the_work() {
        let intervals = IntervalSet::from_unsorted([Interval::new(1_000, 20_000)]);
        let wheel = WheelBuilder::new(20_000, 3).unwrap().build();
        let (left, right) = wheel.spokes().split_at(3);

        let whole = CompositeBitmap::new(wheel.bitmap_len());
        SieveWorker::new(0, &wheel, wheel.spokes(), &intervals, &whole).run();

        let split = CompositeBitmap::new(wheel.bitmap_len());
        SieveWorker::new(0, &wheel, left, &intervals, &split).run();
        SieveWorker::new(1, &wheel, right, &intervals, &split).run();

        assert_eq!(whole.snapshot(), split.snapshot());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let intervals = IntervalSet::from_unsorted([Interval::new(100, 5_000), Interval::new(7_000, 9_999)]);
        let wheel = WheelBuilder::new(9_999, 2).unwrap().build();
        let bitmap = CompositeBitmap::new(wheel.bitmap_len());
        let worker = SieveWorker::new(0, &wheel, wheel.spokes(), &intervals, &bitmap);

        worker.run();
        let once = bitmap.snapshot();
        worker.run();
        assert_eq!(bitmap.snapshot(), once);
    }

    #[test]
    fn test_skips_intervals_below_floor() {
        let intervals = IntervalSet::from_unsorted([Interval::new(2, 9), Interval::new(900, 1_000)]);
        let wheel = WheelBuilder::new(1_000, 2).unwrap().build();
        let bitmap = CompositeBitmap::new(wheel.bitmap_len());

        SieveWorker::new(0, &wheel, wheel.spokes(), &intervals, &bitmap).run();
        assert!(marked(&bitmap).iter().all(|&n| (900..=1_000).contains(&n)));
        assert!(bitmap.is_marked(901)); // 17 * 53
        assert!(!bitmap.is_marked(907));
    }
}
