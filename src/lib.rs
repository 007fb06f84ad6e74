//! Prime search over sets of integer intervals.
//!
//! A wheel built from the first few primes thins the candidates down to the
//! residues coprime to its primorial; workers on scoped threads each own a
//! slice of those residues (spokes) and strike composites into one shared
//! bit-packed bitmap; a dense index then maps positions back to primes.
//!
//! ```
//! use primer_intervals::{find_primes, Interval, IntervalSet, SearchConfig};
//!
//! let intervals: IntervalSet = [Interval::new(10, 50)].into_iter().collect();
//! let primes = find_primes(intervals, SearchConfig::new()).unwrap();
//! assert_eq!(primes, vec![11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
//! ```

pub mod adapter;
pub mod bitmap;
pub mod coordinator;
pub mod error;
pub mod input;
pub mod interval;
pub mod math;
pub mod output;
pub mod wheel;
pub mod worker;

pub use adapter::PrimeIndex;
pub use bitmap::CompositeBitmap;
pub use coordinator::{find_primes, PrimeSearch, SearchConfig, SieveCoordinator};
pub use error::{Result, SieveError};
pub use input::{parse_intervals, read_intervals};
pub use interval::{Interval, IntervalSet};
pub use output::{ConsoleSink, FileSink, PrimeSink};
pub use wheel::{Wheel, WheelBuilder};
pub use worker::SieveWorker;
