//! Interval sieve benchmark
//! Compares: primer-intervals (full range, scattered intervals) vs `primes` crate vs `primal` crate
//!
//! Usage: cargo bench

use std::fmt;
use std::time::{Duration, Instant};

use primer_intervals::{find_primes, Interval, IntervalSet, SearchConfig};

// ─── Contenders ────────────────────────────────────────────────────────────

fn interval_sieve(intervals: &IntervalSet, threads: usize) -> Vec<u32> {
    find_primes(intervals.clone(), SearchConfig::new().threads(threads)).unwrap_or_default()
}

fn primes_crate_sieve(intervals: &IntervalSet) -> Vec<u32> {
    use primes::{PrimeSet, Sieve};
    let mut sieve = Sieve::new();
    let high = intervals.last_high().unwrap_or(0) as u64;
    sieve
        .iter()
        .take_while(|&p| p <= high)
        .filter(|&p| intervals.contains(p))
        .map(|p| p as u32)
        .collect()
}

fn primal_crate_sieve_direct(intervals: &IntervalSet) -> Vec<u32> {
    let high = intervals.last_high().unwrap_or(0) as usize;
    let sieve = primal::Sieve::new(high.max(2));
    intervals
        .iter()
        .flat_map(|i| i.low()..=i.high())
        .filter(|&n| sieve.is_prime(n as usize))
        .collect()
}

// ─── Benchmarking machinery ────────────────────────────────────────────────

struct BenchResult {
    name: String,
    prime_count: usize,
    times: Vec<Duration>,
}

impl BenchResult {
    fn median(&self) -> Duration {
        let mut sorted = self.times.clone();
        sorted.sort();
        sorted[sorted.len() / 2]
    }

    fn min(&self) -> Duration {
        self.times.iter().copied().min().unwrap_or_default()
    }

    fn max(&self) -> Duration {
        self.times.iter().copied().max().unwrap_or_default()
    }

    fn mean(&self) -> Duration {
        let total: Duration = self.times.iter().sum();
        total / self.times.len() as u32
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<28} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>10}",
            self.name,
            format_duration(self.min()),
            format_duration(self.median()),
            format_duration(self.mean()),
            format_duration(self.max()),
            format_with_commas(self.prime_count as u64),
        )
    }
}

fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
    }
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn bench<F>(name: &str, intervals: &IntervalSet, iterations: usize, f: F) -> BenchResult
where
    F: Fn(&IntervalSet) -> Vec<u32>,
{
    // Warmup
    let _ = f(intervals);

    let mut times = Vec::with_capacity(iterations);
    let mut prime_count = 0;
    for _ in 0..iterations {
        let start = Instant::now();
        let result = f(intervals);
        times.push(start.elapsed());
        prime_count = result.len();
        std::hint::black_box(&result);
    }

    BenchResult { name: name.to_string(), prime_count, times }
}

fn print_header() {
    println!(
        "{:<28} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>10}",
        "Implementation", "Min", "Median", "Mean", "Max", "Primes"
    );
    println!("{}", "─".repeat(96));
}

/// 64 narrow windows spread evenly below `n`.
fn scattered(n: u32) -> IntervalSet {
    let stride = n / 64;
    (0..64u32)
        .map(|i| Interval::new(i * stride, i * stride + stride / 10))
        .collect()
}

fn main() {
    println!("Interval sieve benchmark ({} logical cores)", num_cpus::get());
    println!();

    let sizes: [u32; 5] = [100_000, 1_000_000, 10_000_000, 50_000_000, 100_000_000];
    let iterations = 11;

    for &n in &sizes {
        let cases = [("full", IntervalSet::from_unsorted([Interval::new(0, n)])), ("scattered", scattered(n))];
        for (label, intervals) in &cases {
            println!(
                "┌─ [0, {}] {} ({} intervals, {} iterations)",
                format_with_commas(n as u64),
                label,
                intervals.len(),
                iterations
            );
            print_header();

            let single = bench("primer-intervals (1 thread)", intervals, iterations, |s| interval_sieve(s, 1));
            println!("{}", single);
            let cores = num_cpus::get().clamp(1, 48);
            let auto = bench("primer-intervals (all cores)", intervals, iterations, |s| interval_sieve(s, cores));
            println!("{}", auto);

            // primes crate is too slow past 1M
            let primes_res = (n <= 1_000_000).then(|| bench("primes crate (iter)", intervals, iterations, primes_crate_sieve));
            if let Some(ref r) = primes_res {
                println!("{}", r);
            }

            let primal_direct = bench("primal (Sieve::new)", intervals, iterations, primal_crate_sieve_direct);
            println!("{}", primal_direct);

            assert_eq!(single.prime_count, auto.prime_count, "MISMATCH at n={}: 1 thread vs all cores", n);
            assert_eq!(
                single.prime_count, primal_direct.prime_count,
                "MISMATCH at n={}: primer={} vs primal={}",
                n, single.prime_count, primal_direct.prime_count
            );
            if let Some(ref r) = primes_res {
                assert_eq!(single.prime_count, r.prime_count, "MISMATCH at n={}: primer vs primes", n);
            }

            let speedup = single.median().as_secs_f64() / auto.median().as_secs_f64().max(f64::EPSILON);
            println!("└─ threaded speedup: {:.2}x", speedup);
            println!();
        }
    }
}
