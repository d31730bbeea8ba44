#![deny(unsafe_code)]

//! Shared helpers for the toggled test suites.
//!
//! [`SharedBuffer`] stands in for the console stream so tests can read back
//! exactly what a logger wrote; [`scratch_dir`] hands out throwaway
//! directories for log files.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tempfile::TempDir;

/// A cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns the written text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Creates a temporary directory that is removed when dropped.
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("toggled-test-")
        .tempdir()
        .expect("create scratch directory")
}
