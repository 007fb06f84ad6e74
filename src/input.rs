//! Reader for interval documents.
//!
//! ```xml
//! <root>
//!     <intervals>
//!         <interval>
//!             <low> 100 </low>
//!             <high> 200 </high>
//!         </interval>
//!     </intervals>
//! </root>
//! ```
//!
//! Only this shape is understood: every `<intervals>` block is scanned for
//! `<interval>` entries, each of which needs a `<low>` and a `<high>` (in
//! either order, reversed bounds are swapped). The result is merged into a
//! sorted, disjoint [`IntervalSet`].

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SieveError};
use crate::interval::{Interval, IntervalSet};

static INTERVALS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<intervals>(.*?)</intervals>").unwrap());
static INTERVAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<interval>(.*?)</interval>").unwrap());
static LOW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<low>(.*?)</low>").unwrap());
static HIGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<high>(.*?)</high>").unwrap());

pub fn read_intervals(path: impl AsRef<Path>) -> Result<IntervalSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SieveError::Io { path: path.to_path_buf(), source })?;
    parse_intervals(&text)
}

pub fn parse_intervals(text: &str) -> Result<IntervalSet> {
    let mut found = Vec::new();
    let mut blocks = 0;

    for block in INTERVALS.captures_iter(text) {
        blocks += 1;
        for entry in INTERVAL.captures_iter(&block[1]) {
            let body = &entry[1];
            let low = field(body, "low", &LOW)?;
            let high = field(body, "high", &HIGH)?;
            found.push(Interval::new(low, high));
        }
    }

    if blocks == 0 {
        return Err(SieveError::AddressNotFound("root/intervals".to_string()));
    }
    if found.is_empty() {
        return Err(SieveError::EmptyIntervals);
    }
    Ok(IntervalSet::from_unsorted(found))
}

fn field(body: &str, name: &'static str, re: &Regex) -> Result<u32> {
    let caps = re
        .captures(body)
        .ok_or_else(|| SieveError::AddressNotFound(format!("intervals/interval/{name}")))?;
    let value = caps[1].trim();
    value
        .parse()
        .map_err(|_| SieveError::InvalidNumber { field: name, value: value.to_string() })
}
