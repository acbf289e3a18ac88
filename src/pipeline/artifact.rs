//! Defines the self-describing on-disk form of an encoded payload. This
//! module is the single source of truth for container serialization,
//! deserialization, and header inspection.
//!
//! Byte layout (format version 1, see `bridge::format` for the contracts):
//!
//! ```text
//! magic(4) | version u16 LE | order u16 LE | padding_len u16 LE
//! repeated: symbol_len varint | symbol bytes | code_bits varint | code bytes
//! terminator: zero symbol_len varint
//! payload: packed bitstream (all remaining bytes)
//! ```

use std::io::Cursor;

use crate::bridge::format::{CONTAINER_FORMAT_VERSION, CONTAINER_MAGIC};
use crate::error::HuffpakError;
use crate::kernels::codebook::{CodeBits, CodeTable};
use crate::kernels::leb128;
use crate::types::Symbol;

//==================================================================================
// Format Constants
//==================================================================================
/// The minimum possible size of a valid container in bytes:
/// prelude (10) + terminator (1) + one payload byte.
const MIN_CONTAINER_SIZE: usize = 12;
/// Sanity cap on a single codeword's bit length, to prevent OOM from a
/// malformed length field before allocating.
const MAX_CODE_BITS: u64 = 1 << 20;

//==================================================================================
// Public Structs
//==================================================================================

/// Metadata extracted from a container's header. This is the return type of
/// `peek_info`, allowing inspection without building the code table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct HeaderInfo {
    pub format_version: u16,
    pub order: u16,
    pub padding_len: u16,
    /// Number of code-table entries.
    pub symbol_count: usize,
    /// Length of the longest codeword in the table, in bits.
    pub max_code_bits: usize,
    /// Size of the header section (prelude + table + terminator) in bytes.
    pub header_size: usize,
    /// Size of the packed bitstream in bytes.
    pub payload_size: usize,
}

/// A fully parsed container in memory: the target for deserialization and
/// the source for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub order: u16,
    pub padding_len: u16,
    pub code_table: CodeTable,
    /// The packed, sentinel-prefixed bitstream bytes.
    pub payload: Vec<u8>,
}

//==================================================================================
// Core Implementation
//==================================================================================

impl Container {
    /// Serializes the container into its canonical byte form. Table entries
    /// are written in ascending symbol order, so the output is deterministic
    /// regardless of hash-map layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HuffpakError> {
        if self.code_table.is_empty() {
            return Err(HuffpakError::InternalError(
                "refusing to serialize an empty code table".to_string(),
            ));
        }
        if self.order == 0 || self.padding_len >= self.order {
            return Err(HuffpakError::InternalError(format!(
                "inconsistent container fields: order {}, padding_len {}",
                self.order, self.padding_len
            )));
        }

        let mut buf = Vec::with_capacity(MIN_CONTAINER_SIZE + self.payload.len());
        buf.extend_from_slice(CONTAINER_MAGIC);
        buf.extend_from_slice(&CONTAINER_FORMAT_VERSION.to_le_bytes());
        buf.extend_from_slice(&self.order.to_le_bytes());
        buf.extend_from_slice(&self.padding_len.to_le_bytes());

        for (symbol, code) in self.code_table.entries_sorted() {
            if symbol.width() != self.order as usize {
                return Err(HuffpakError::InternalError(format!(
                    "symbol {:02x?} does not match order {}",
                    symbol.as_bytes(),
                    self.order
                )));
            }
            if code.is_empty() {
                return Err(HuffpakError::DegenerateAlphabet(format!(
                    "symbol {:02x?} has a zero-length codeword",
                    symbol.as_bytes()
                )));
            }
            leb128::encode_one(symbol.width() as u64, &mut buf)?;
            buf.extend_from_slice(symbol.as_bytes());
            leb128::encode_one(code.len() as u64, &mut buf)?;
            let mut aligned = code.clone();
            aligned.set_uninitialized(false);
            buf.extend_from_slice(aligned.as_raw_slice());
        }

        // Terminator: a zero symbol-length varint.
        buf.push(0x00);
        buf.extend_from_slice(&self.payload);
        Ok(buf)
    }

    /// Deserializes and fully validates a byte slice, including the
    /// prefix-free property the greedy decoder depends on.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HuffpakError> {
        let (order, padding_len) = parse_prelude(bytes)?;
        let region = read_table_region(bytes, order, true)?;
        let code_table = region
            .table
            .ok_or_else(|| HuffpakError::InternalError("table collection skipped".to_string()))?;

        if !code_table.is_prefix_free() {
            return Err(HuffpakError::InvalidHeader(
                "code table is not prefix-free".to_string(),
            ));
        }

        let payload = bytes[region.header_size..].to_vec();
        if payload.is_empty() {
            return Err(HuffpakError::CorruptContainer(
                "container has an empty bitstream body".to_string(),
            ));
        }

        Ok(Self {
            order,
            padding_len,
            code_table,
            payload,
        })
    }

    /// Peeks into a container's header to extract metadata without building
    /// the code table. Structural validation is identical to `from_bytes`,
    /// minus the prefix-free check.
    pub fn peek_info(bytes: &[u8]) -> Result<HeaderInfo, HuffpakError> {
        let (order, padding_len) = parse_prelude(bytes)?;
        let region = read_table_region(bytes, order, false)?;

        Ok(HeaderInfo {
            format_version: CONTAINER_FORMAT_VERSION,
            order,
            padding_len,
            symbol_count: region.symbol_count,
            max_code_bits: region.max_code_bits,
            header_size: region.header_size,
            payload_size: bytes.len() - region.header_size,
        })
    }
}

//==================================================================================
// Private Helpers
//==================================================================================

/// Validates the fixed-size prelude and returns `(order, padding_len)`.
fn parse_prelude(bytes: &[u8]) -> Result<(u16, u16), HuffpakError> {
    if bytes.len() < MIN_CONTAINER_SIZE {
        return Err(HuffpakError::InvalidHeader(format!(
            "container is too small to be valid: minimum size {}, got {}",
            MIN_CONTAINER_SIZE,
            bytes.len()
        )));
    }
    if &bytes[0..4] != CONTAINER_MAGIC {
        return Err(HuffpakError::InvalidHeader(
            "invalid container magic number".to_string(),
        ));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != CONTAINER_FORMAT_VERSION {
        return Err(HuffpakError::InvalidHeader(format!(
            "unsupported container version: expected {}, got {}",
            CONTAINER_FORMAT_VERSION, version
        )));
    }

    let order = u16::from_le_bytes([bytes[6], bytes[7]]);
    let padding_len = u16::from_le_bytes([bytes[8], bytes[9]]);
    if order == 0 {
        return Err(HuffpakError::InvalidHeader(
            "order field must be at least 1".to_string(),
        ));
    }
    if padding_len >= order {
        return Err(HuffpakError::InvalidHeader(format!(
            "padding_len {} must be smaller than order {}",
            padding_len, order
        )));
    }

    Ok((order, padding_len))
}

struct TableRegion {
    table: Option<CodeTable>,
    symbol_count: usize,
    max_code_bits: usize,
    /// Absolute offset of the first payload byte.
    header_size: usize,
}

/// Walks the code-table entries up to and including the terminator marker.
/// `collect` decides whether the entries are materialized into a `CodeTable`
/// (full parse) or only measured (peek).
fn read_table_region(
    bytes: &[u8],
    order: u16,
    collect: bool,
) -> Result<TableRegion, HuffpakError> {
    let mut cursor = Cursor::new(bytes);
    cursor.set_position(10); // past the fixed prelude

    let mut table = collect.then(CodeTable::default);
    let mut symbol_count = 0usize;
    let mut max_code_bits = 0usize;

    loop {
        let symbol_len: u64 = leb128::decode_one(&mut cursor).map_err(truncated_header)?;
        if symbol_len == 0 {
            break; // terminator marker
        }
        if symbol_len != order as u64 {
            return Err(HuffpakError::InvalidHeader(format!(
                "table symbol width {} does not match order {}",
                symbol_len, order
            )));
        }

        let symbol_bytes = take(&mut cursor, symbol_len as usize)?;
        let symbol = collect.then(|| Symbol::from_bytes(symbol_bytes));

        let code_bits: u64 = leb128::decode_one(&mut cursor).map_err(truncated_header)?;
        if code_bits == 0 {
            return Err(HuffpakError::DegenerateAlphabet(
                "container declares a zero-length codeword".to_string(),
            ));
        }
        if code_bits > MAX_CODE_BITS {
            return Err(HuffpakError::InvalidHeader(format!(
                "codeword length {} bits exceeds the maximum of {}",
                code_bits, MAX_CODE_BITS
            )));
        }

        let code_byte_len = (code_bits as usize + 7) / 8;
        let code_bytes = take(&mut cursor, code_byte_len)?;

        if let (Some(table), Some(symbol)) = (table.as_mut(), symbol) {
            let mut code = CodeBits::from_slice(code_bytes);
            code.truncate(code_bits as usize);
            if !table.insert(symbol, code) {
                return Err(HuffpakError::InvalidHeader(format!(
                    "duplicate symbol {:02x?} in code table",
                    symbol_bytes
                )));
            }
        }

        symbol_count += 1;
        max_code_bits = max_code_bits.max(code_bits as usize);
    }

    if symbol_count == 0 {
        return Err(HuffpakError::InvalidHeader(
            "code table has no entries".to_string(),
        ));
    }

    Ok(TableRegion {
        table,
        symbol_count,
        max_code_bits,
        header_size: cursor.position() as usize,
    })
}

/// Borrows `len` bytes at the cursor, advancing it.
fn take<'a>(cursor: &mut Cursor<&'a [u8]>, len: usize) -> Result<&'a [u8], HuffpakError> {
    let data: &'a [u8] = *cursor.get_ref();
    let start = cursor.position() as usize;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            HuffpakError::InvalidHeader(
                "code table truncated before the terminator marker".to_string(),
            )
        })?;
    cursor.set_position(end as u64);
    Ok(&data[start..end])
}

fn truncated_header(err: HuffpakError) -> HuffpakError {
    match err {
        HuffpakError::Leb128DecodeError(msg) if msg.contains("end of buffer") => {
            HuffpakError::InvalidHeader(
                "code table truncated before the terminator marker".to_string(),
            )
        }
        other => HuffpakError::InvalidHeader(format!("malformed header field: {}", other)),
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::{bitpack, codebook, frequency, tree};

    fn create_test_container() -> Container {
        let input = b"AAAABBBCCD";
        let analysis = frequency::analyze(input, 1, 0).unwrap();
        let root = tree::build_tree(&analysis.entries).unwrap();
        let table = codebook::generate(&root);
        let payload = bitpack::pack(input, 1, 0, &table).unwrap();
        Container {
            order: 1,
            padding_len: 0,
            code_table: table,
            payload,
        }
    }

    /// Builds raw container bytes from an entry list, for negative tests.
    fn raw_container(order: u16, padding: u16, entries: &[(&[u8], &[bool])], payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(CONTAINER_MAGIC);
        buf.extend_from_slice(&CONTAINER_FORMAT_VERSION.to_le_bytes());
        buf.extend_from_slice(&order.to_le_bytes());
        buf.extend_from_slice(&padding.to_le_bytes());
        for (symbol, bits) in entries {
            leb128::encode_one(symbol.len() as u64, &mut buf).unwrap();
            buf.extend_from_slice(symbol);
            leb128::encode_one(bits.len() as u64, &mut buf).unwrap();
            let mut code = CodeBits::new();
            for &bit in *bits {
                code.push(bit);
            }
            code.set_uninitialized(false);
            buf.extend_from_slice(code.as_raw_slice());
        }
        buf.push(0x00);
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn test_container_roundtrip_is_successful() {
        let original = create_test_container();
        let bytes = original.to_bytes().unwrap();
        let reconstructed = Container::from_bytes(&bytes).unwrap();
        assert_eq!(original, reconstructed);
    }

    #[test]
    fn test_to_bytes_is_deterministic() {
        let bytes1 = create_test_container().to_bytes().unwrap();
        let bytes2 = create_test_container().to_bytes().unwrap();
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_peek_info_is_correct() {
        let container = create_test_container();
        let bytes = container.to_bytes().unwrap();
        let info = Container::peek_info(&bytes).unwrap();

        assert_eq!(info.format_version, CONTAINER_FORMAT_VERSION);
        assert_eq!(info.order, 1);
        assert_eq!(info.padding_len, 0);
        assert_eq!(info.symbol_count, 4);
        assert_eq!(info.max_code_bits, 3);
        assert_eq!(info.header_size + info.payload_size, bytes.len());
        assert_eq!(info.payload_size, container.payload.len());
    }

    #[test]
    fn test_parsing_errors_are_handled_gracefully() {
        // Too short.
        assert!(matches!(
            Container::from_bytes(b"short"),
            Err(HuffpakError::InvalidHeader(_))
        ));

        // Bad magic number.
        let mut bytes = create_test_container().to_bytes().unwrap();
        bytes[0..4].copy_from_slice(b"BAD!");
        assert!(matches!(
            Container::from_bytes(&bytes),
            Err(HuffpakError::InvalidHeader(_))
        ));

        // Unsupported version.
        let mut bytes = create_test_container().to_bytes().unwrap();
        bytes[4] = 0xFF;
        bytes[5] = 0xFF;
        assert!(matches!(
            Container::peek_info(&bytes),
            Err(HuffpakError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_missing_terminator_is_rejected() {
        let container = create_test_container();
        let bytes = container.to_bytes().unwrap();
        let header_size = Container::peek_info(&bytes).unwrap().header_size;
        // Drop the terminator and everything after it.
        let truncated = &bytes[..header_size - 1];
        assert!(matches!(
            Container::from_bytes(truncated),
            Err(HuffpakError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_zero_length_codeword_is_rejected() {
        let bytes = raw_container(1, 0, &[(b"A", &[])], &[0x01]);
        assert!(matches!(
            Container::from_bytes(&bytes),
            Err(HuffpakError::DegenerateAlphabet(_))
        ));
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let bytes = raw_container(
            1,
            0,
            &[(b"A", &[true]), (b"A", &[false, true])],
            &[0x01],
        );
        assert!(matches!(
            Container::from_bytes(&bytes),
            Err(HuffpakError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_non_prefix_free_table_is_rejected() {
        let bytes = raw_container(
            1,
            0,
            &[(b"A", &[true]), (b"B", &[true, false])],
            &[0x01],
        );
        assert!(matches!(
            Container::from_bytes(&bytes),
            Err(HuffpakError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_symbol_width_mismatch_is_rejected() {
        let bytes = raw_container(2, 0, &[(b"A", &[true])], &[0x01]);
        assert!(matches!(
            Container::from_bytes(&bytes),
            Err(HuffpakError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_padding_not_below_order_is_rejected() {
        let bytes = raw_container(1, 1, &[(b"A", &[true])], &[0x01]);
        assert!(matches!(
            Container::from_bytes(&bytes),
            Err(HuffpakError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_empty_payload_is_corrupt() {
        let bytes = raw_container(1, 0, &[(b"A", &[true])], &[]);
        assert!(matches!(
            Container::from_bytes(&bytes),
            Err(HuffpakError::CorruptContainer(_))
        ));
    }

    #[test]
    fn test_symbols_may_contain_any_byte_value() {
        // A symbol equal to the terminator byte must survive, because
        // symbols are length-prefixed, never scanned for markers.
        let input = [0x00u8, 0x00, 0x00, 0xFF, 0x3A, 0x3A];
        let analysis = frequency::analyze(&input, 1, 0).unwrap();
        let table = codebook::generate(&tree::build_tree(&analysis.entries).unwrap());
        let payload = bitpack::pack(&input, 1, 0, &table).unwrap();
        let container = Container {
            order: 1,
            padding_len: 0,
            code_table: table,
            payload,
        };

        let bytes = container.to_bytes().unwrap();
        let reconstructed = Container::from_bytes(&bytes).unwrap();
        assert_eq!(container, reconstructed);
    }
}
