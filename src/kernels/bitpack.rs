//! This module contains the bit-level codec: packing a symbol stream into a
//! sentinel-prefixed bit sequence using a code table, and the lossless
//! reverse.
//!
//! The packed form is the bit sequence left-padded with zero bits to the next
//! multiple of 8 — i.e. the big-endian byte serialization of the integer
//! whose binary digits are the sequence. The single sentinel `1` bit in front
//! is what keeps leading-zero codewords from vanishing under that
//! representation. Byte order is fixed by the container format version, not
//! inferred (see `bridge::format`).

use bitvec::prelude::*;

use crate::error::HuffpakError;
use crate::kernels::codebook::{CodeBits, CodeTable};

/// Encodes the input as one packed bitstream. The table must cover every
/// symbol the input produces under this `order` and `filler`; a gap is an
/// internal invariant violation, since the table was derived from the same
/// input.
pub fn pack(
    input: &[u8],
    order: usize,
    filler: u8,
    table: &CodeTable,
) -> Result<Vec<u8>, HuffpakError> {
    if order == 0 {
        return Err(HuffpakError::InvalidConfig(
            "order must be at least 1".to_string(),
        ));
    }

    let mut bits = CodeBits::new();
    bits.push(true); // sentinel

    let mut chunks = input.chunks_exact(order);
    for chunk in &mut chunks {
        append_code(&mut bits, chunk, table)?;
    }
    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let mut tail = remainder.to_vec();
        tail.resize(order, filler);
        append_code(&mut bits, &tail, table)?;
    }

    Ok(to_be_bytes(&bits))
}

/// Decodes a packed bitstream back into the concatenated symbol bytes.
/// Padding-byte stripping for `order > 1` is the orchestrator's job; this
/// kernel only reverses the bit packing.
pub fn unpack(packed: &[u8], table: &CodeTable) -> Result<Vec<u8>, HuffpakError> {
    let bits = packed.view_bits::<Msb0>();
    // The first set bit is the sentinel; everything before it is alignment
    // padding from the byte representation.
    let sentinel = bits.first_one().ok_or_else(|| {
        HuffpakError::CorruptContainer("packed bitstream has no sentinel bit".to_string())
    })?;
    let payload = &bits[sentinel + 1..];

    let reverse = table.reverse();
    let mut out = Vec::new();
    let mut candidate = CodeBits::new();
    for bit in payload {
        candidate.push(*bit);
        // Exact-membership probe; prefix-freedom guarantees a match is never
        // a false positive for a longer codeword.
        if let Some(symbol) = reverse.get(candidate.as_bitslice()) {
            out.extend_from_slice(symbol.as_bytes());
            candidate.clear();
        }
    }

    if !candidate.is_empty() {
        return Err(HuffpakError::DecodeError(format!(
            "bitstream exhausted with {} unmatched trailing bits",
            candidate.len()
        )));
    }

    Ok(out)
}

fn append_code(bits: &mut CodeBits, symbol: &[u8], table: &CodeTable) -> Result<(), HuffpakError> {
    let code = table.get(symbol).ok_or_else(|| {
        HuffpakError::InternalError(format!("symbol {:02x?} missing from code table", symbol))
    })?;
    bits.extend_from_bitslice(code);
    Ok(())
}

/// Serializes the bit sequence as a big-endian byte array, left-padding with
/// zero bits to a whole number of bytes.
fn to_be_bytes(bits: &CodeBits) -> Vec<u8> {
    let pad = (8 - bits.len() % 8) % 8;
    let mut aligned = CodeBits::repeat(false, pad);
    aligned.extend_from_bitslice(bits);
    aligned.into_vec()
}
