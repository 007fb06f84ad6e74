//! Error type for interval prime searches.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SieveError {
    /// Nothing to search.
    #[error("no intervals to search")]
    EmptyIntervals,

    /// Thread count outside the wheel tuning table. Fatal for the search.
    #[error("unsupported thread count {threads} (supported: 1..={max})")]
    UnsupportedThreadCount { threads: usize, max: usize },

    /// Explicit wheel size outside the supported range. Fatal for the search.
    #[error("unsupported wheel size of {primes} primes (supported: 1..={max})")]
    UnsupportedWheel { primes: usize, max: usize },

    /// Index position at or beyond the effective size.
    #[error("position {position} out of range (effective size {size})")]
    OutOfRange { position: usize, size: usize },

    /// A required tag is missing from an interval document.
    #[error("address not found: {0}")]
    AddressNotFound(String),

    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SieveError>;
