//! The filesystem collaborator. The core never touches `std::fs` directly;
//! this module is the single marshalling point between paths and bytes.
//!
//! Each operation acquires its handle for exactly the duration of one full
//! read or write; RAII closes it on every exit path. Failures pass through
//! as `HuffpakError::Io` wrapping the untouched `std::io::Error` — they are
//! never wrapped further, swallowed, or retried.

use std::fs;
use std::path::Path;

use crate::error::HuffpakError;

/// Reads a file fully into memory.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, HuffpakError> {
    Ok(fs::read(path)?)
}

/// Writes a byte slice as the complete file content, replacing any previous
/// content.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), HuffpakError> {
    Ok(fs::write(path, bytes)?)
}

/// Reports a file's size in bytes without reading it.
pub fn file_size(path: &Path) -> Result<u64, HuffpakError> {
    Ok(fs::metadata(path)?.len())
}
