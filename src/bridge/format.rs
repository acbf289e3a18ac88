//! Defines all on-disk constants for the huffpak container format. This is
//! the single source of truth for the byte-level contracts; nothing about the
//! layout is ever inferred at parse time.
//!
//! Version 1 contracts:
//! - All multi-byte header integers are little-endian.
//! - The packed bitstream is big-endian: the sentinel-prefixed bit sequence
//!   is left-padded with zero bits to a whole number of bytes, i.e. the
//!   byte serialization of the value read MSB-first. Earlier experimental
//!   formats differed here, which is exactly why the version byte pins it.
//! - Code-table symbols are length-prefixed raw bytes (LEB128 varint +
//!   payload), never delimiter-separated text: a symbol may contain any byte
//!   value.
//! - The code table ends with a terminator marker: a zero symbol-length
//!   varint. Symbols are never empty, so the marker is unambiguous.

use serde::Serialize;

/// The magic number identifying the start of a huffpak container.
pub const CONTAINER_MAGIC: &[u8; 4] = b"HPAK";
/// The current version of the container format.
pub const CONTAINER_FORMAT_VERSION: u16 = 1;

/// The public-facing struct for container analysis results, returned by
/// `analyze_container` and `compress_file`.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionStats {
    pub total_size: usize,
    pub header_size: usize,
    pub payload_size: usize,
    /// Distinct symbols in the code table.
    pub symbol_count: usize,
    pub order: u16,
    pub padding_len: u16,
    /// Weighted mean code length in bits/symbol. Only known on the encode
    /// path (the container does not persist frequencies), so analysis of
    /// existing bytes leaves it unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_code_bits: Option<f64>,
}
