//! Numeric intervals and the sorted, disjoint set the sieve searches.

use std::fmt;
use std::str::FromStr;

use crate::error::SieveError;

/// Closed interval `[low, high]` with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    low: u32,
    high: u32,
}

impl Interval {
    /// Builds an interval; reversed bounds are swapped.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    #[inline]
    pub fn low(&self) -> u32 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> u32 {
        self.high
    }

    #[inline]
    pub fn contains(&self, n: u64) -> bool {
        self.low as u64 <= n && n <= self.high as u64
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Parses `LOW-HIGH` (or a single `N` for `[N, N]`).
impl FromStr for Interval {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bound = |v: &str| {
            v.trim().parse::<u32>().map_err(|_| SieveError::InvalidNumber {
                field: "range",
                value: s.to_string(),
            })
        };
        match s.split_once('-') {
            Some((low, high)) => Ok(Interval::new(bound(low)?, bound(high)?)),
            None => {
                let n = bound(s)?;
                Ok(Interval::new(n, n))
            }
        }
    }
}

/// Intervals sorted ascending by `low`, pairwise disjoint and non-adjacent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    /// Sorts and merges overlapping or adjacent intervals.
    pub fn from_unsorted<I: IntoIterator<Item = Interval>>(intervals: I) -> Self {
        let mut sorted: Vec<Interval> = intervals.into_iter().collect();
        sorted.sort_unstable();

        let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
        for next in sorted {
            match merged.last_mut() {
                Some(last) if next.low as u64 <= last.high as u64 + 1 => {
                    last.high = last.high.max(next.high);
                }
                _ => merged.push(next),
            }
        }

        Self { intervals: merged }
    }

    /// Takes intervals that are already sorted and disjoint.
    ///
    /// The ordering is trusted; it is only checked in debug builds.
    pub fn from_sorted(intervals: Vec<Interval>) -> Self {
        debug_assert!(
            intervals.windows(2).all(|w| w[0].high < w[1].low),
            "intervals must be sorted and disjoint"
        );
        Self { intervals }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn first_low(&self) -> Option<u32> {
        self.intervals.first().map(Interval::low)
    }

    pub fn last_high(&self) -> Option<u32> {
        self.intervals.last().map(Interval::high)
    }

    /// Whether `n` lies inside any interval. Binary search over the sorted set.
    pub fn contains(&self, n: u64) -> bool {
        let idx = self.intervals.partition_point(|i| (i.high as u64) < n);
        self.intervals.get(idx).map_or(false, |i| i.contains(n))
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::from_unsorted(iter)
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
