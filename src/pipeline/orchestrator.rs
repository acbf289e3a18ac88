//! The top-level coordinators for encoding and decoding.
//!
//! Each function is a pure pipeline over an immutable input: frequency
//! analysis → tree → code table → bit packing on the way in, container parse
//! → greedy unpack → padding strip on the way out. No retries happen here —
//! every failure is deterministic, so retrying without changing the input
//! cannot help.

use log::debug;

use crate::config::HuffpakConfig;
use crate::error::HuffpakError;
use crate::kernels::codebook::{self, CodeTable};
use crate::kernels::{bitpack, frequency, tree};
use crate::pipeline::artifact::Container;

/// The result of one encode pass: everything the container format persists,
/// plus the encode-time diagnostic metric.
#[derive(Debug, Clone)]
pub struct EncodedPayload {
    pub code_table: CodeTable,
    /// The packed, sentinel-prefixed bitstream bytes.
    pub packed: Vec<u8>,
    pub order: u16,
    pub padding_len: u16,
    /// Weighted mean code length in bits/symbol.
    pub mean_code_bits: f64,
}

impl EncodedPayload {
    pub fn into_container(self) -> Container {
        Container {
            order: self.order,
            padding_len: self.padding_len,
            code_table: self.code_table,
            payload: self.packed,
        }
    }
}

/// Derives a code from the input's symbol frequencies and packs the input
/// with it.
pub fn encode(input: &[u8], config: &HuffpakConfig) -> Result<EncodedPayload, HuffpakError> {
    config.validate()?;

    let analysis = frequency::analyze(input, config.order, config.filler_byte)?;
    let root = tree::build_tree(&analysis.entries)?;
    let code_table = codebook::generate(&root);
    let packed = bitpack::pack(input, config.order, config.filler_byte, &code_table)?;
    let mean_code_bits = code_table.mean_code_len(&analysis.entries);

    debug!(
        "encoded {} symbols ({} distinct, order {}) into {} packed bytes, {:.3} bits/symbol",
        analysis.total_symbols,
        code_table.len(),
        config.order,
        packed.len(),
        mean_code_bits
    );

    Ok(EncodedPayload {
        code_table,
        packed,
        order: config.order as u16,
        padding_len: analysis.padding_len,
        mean_code_bits,
    })
}

/// Reverses `encode`: unpacks the bitstream against the code table and strips
/// the recorded padding bytes.
pub fn decode(
    packed: &[u8],
    code_table: &CodeTable,
    padding_len: u16,
) -> Result<Vec<u8>, HuffpakError> {
    let mut bytes = bitpack::unpack(packed, code_table)?;
    let padding = padding_len as usize;
    if padding > bytes.len() {
        return Err(HuffpakError::CorruptContainer(format!(
            "padding length {} exceeds the {} decoded bytes",
            padding,
            bytes.len()
        )));
    }
    bytes.truncate(bytes.len() - padding);
    Ok(bytes)
}

/// Encodes the input and serializes the full self-describing container.
pub fn compress(input: &[u8], config: &HuffpakConfig) -> Result<Vec<u8>, HuffpakError> {
    let payload = encode(input, config)?;
    let bytes = payload.into_container().to_bytes()?;
    debug!("container: {} -> {} bytes", input.len(), bytes.len());
    Ok(bytes)
}

/// Parses a container and decodes its payload back to the original bytes.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, HuffpakError> {
    let container = Container::from_bytes(bytes)?;
    decode(
        &container.payload,
        &container.code_table,
        container.padding_len,
    )
}
