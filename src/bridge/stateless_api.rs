//! The stateless public API: thin facades over the pure pipeline engine plus
//! the file-level conveniences built on the filesystem collaborator.

use std::path::Path;

use log::info;

use crate::bridge::format::CompressionStats;
use crate::bridge::fs_impl;
use crate::config::HuffpakConfig;
use crate::error::HuffpakError;
use crate::pipeline::artifact::Container;
use crate::pipeline::orchestrator::{self, EncodedPayload};

/// Compresses a byte slice into a self-describing container.
pub fn compress_bytes(input: &[u8], config: &HuffpakConfig) -> Result<Vec<u8>, HuffpakError> {
    orchestrator::compress(input, config)
}

/// Decompresses a container produced by `compress_bytes`.
pub fn decompress_bytes(bytes: &[u8]) -> Result<Vec<u8>, HuffpakError> {
    orchestrator::decompress(bytes)
}

/// Analyzes a serialized container without decoding the payload.
/// This is a facade over the efficient `peek_info` in the artifact module;
/// the weighted mean code length stays unset because the container does not
/// persist frequencies.
pub fn analyze_container(bytes: &[u8]) -> Result<CompressionStats, HuffpakError> {
    let info = Container::peek_info(bytes)?;
    Ok(CompressionStats {
        total_size: bytes.len(),
        header_size: info.header_size,
        payload_size: info.payload_size,
        symbol_count: info.symbol_count,
        order: info.order,
        padding_len: info.padding_len,
        mean_code_bits: None,
    })
}

/// Serializes an encode result and writes it to `path`.
pub fn write_container(path: &Path, payload: EncodedPayload) -> Result<(), HuffpakError> {
    let bytes = payload.into_container().to_bytes()?;
    fs_impl::write_bytes(path, &bytes)
}

/// Reads and parses a container from `path` without decoding it.
pub fn read_container(path: &Path) -> Result<Container, HuffpakError> {
    let bytes = fs_impl::read_bytes(path)?;
    Container::from_bytes(&bytes)
}

/// Reads `src`, compresses it, and writes the container to `dst`. Returns the
/// container stats, including the encode-time mean code length.
pub fn compress_file(
    src: &Path,
    dst: &Path,
    config: &HuffpakConfig,
) -> Result<CompressionStats, HuffpakError> {
    let input = fs_impl::read_bytes(src)?;
    let payload = orchestrator::encode(&input, config)?;
    let mean_code_bits = payload.mean_code_bits;
    let bytes = payload.into_container().to_bytes()?;
    fs_impl::write_bytes(dst, &bytes)?;

    let original_size = fs_impl::file_size(src)?;
    let compressed_size = fs_impl::file_size(dst)?;
    info!(
        "compressed {} ({} bytes) -> {} ({} bytes, {:.1}% of original)",
        src.display(),
        original_size,
        dst.display(),
        compressed_size,
        compressed_size as f64 * 100.0 / original_size as f64
    );

    let mut stats = analyze_container(&bytes)?;
    stats.mean_code_bits = Some(mean_code_bits);
    Ok(stats)
}

/// Reads a container from `src`, decodes it, and writes the original bytes
/// to `dst`.
pub fn decompress_file(src: &Path, dst: &Path) -> Result<(), HuffpakError> {
    let bytes = fs_impl::read_bytes(src)?;
    let decoded = orchestrator::decompress(&bytes)?;
    fs_impl::write_bytes(dst, &decoded)?;
    info!(
        "decompressed {} ({} bytes) -> {} ({} bytes)",
        src.display(),
        bytes.len(),
        dst.display(),
        decoded.len()
    );
    Ok(())
}

/// Turns on debug-level logging for the pipeline stages. Idempotent: calling
/// it twice, or after the host application installed its own logger, is a
/// no-op rather than an error.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
