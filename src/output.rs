//! Rendering of found primes.
//!
//! Both sinks consume an already-filtered, ascending sequence; neither knows
//! anything about positions or sentinels.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SieveError};

/// Consumer of a prime sequence. Returns how many values were written.
pub trait PrimeSink {
    fn write_primes(&mut self, primes: &mut dyn Iterator<Item = u32>) -> Result<usize>;
}

// ─── Console ───────────────────────────────────────────────────────────────

/// Space-separated integers on one line.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<BufWriter<io::StdoutLock<'static>>> {
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout().lock()))
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PrimeSink for ConsoleSink<W> {
    fn write_primes(&mut self, primes: &mut dyn Iterator<Item = u32>) -> Result<usize> {
        let mut count = 0;
        for p in primes {
            write!(self.out, "{p} ")?;
            count += 1;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(count)
    }
}

// ─── File ──────────────────────────────────────────────────────────────────

/// `<root>\n<primes> N1 N2 … </primes>\n</root>` written to a file.
///
/// The file is created up front so that an unwritable destination fails
/// before anything has been rendered anywhere else.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    out: BufWriter<File>,
}

impl FileSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| SieveError::Io { path: path.clone(), source })?;
        Ok(Self { path, out: BufWriter::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrimeSink for FileSink {
    fn write_primes(&mut self, primes: &mut dyn Iterator<Item = u32>) -> Result<usize> {
        write_primes_document(&mut self.out, primes)
            .and_then(|count| self.out.flush().map(|_| count))
            .map_err(|source| SieveError::Io { path: self.path.clone(), source })
    }
}

fn write_primes_document<W: Write>(out: &mut W, primes: &mut dyn Iterator<Item = u32>) -> io::Result<usize> {
    let mut count = 0;
    out.write_all(b"<root>\n<primes> ")?;
    for p in primes {
        write!(out, "{p} ")?;
        count += 1;
    }
    out.write_all(b"</primes>\n</root>")?;
    Ok(count)
}
