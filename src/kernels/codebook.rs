//! This module turns a Huffman tree into the code table: the mapping from
//! each leaf symbol to its bit-string. Codewords are real bit sequences
//! (`BitVec<u8, Msb0>`), not textual '0'/'1' strings.
//!
//! Walk contract: descending into a left child appends `1`, into a right
//! child appends `0`. The tree builder always places the lower-frequency
//! subtree on the left, so rarer symbols collect the longer codes. The table
//! is prefix-free by construction because the tree is full.

use std::collections::HashMap;

use bitvec::prelude::*;

use crate::kernels::frequency::FrequencyEntry;
use crate::kernels::tree::HuffNode;
use crate::types::Symbol;

/// A Huffman codeword, MSB-first.
pub type CodeBits = BitVec<u8, Msb0>;

/// The symbol → codeword mapping for one encode or decode operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: HashMap<Symbol, CodeBits>,
}

impl CodeTable {
    /// Looks up the codeword for a raw symbol chunk without allocating.
    pub fn get(&self, symbol: &[u8]) -> Option<&CodeBits> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Inserts an entry. Returns `false` if the symbol was already present
    /// (the previous codeword is kept); the container parser uses this to
    /// reject duplicate table rows.
    pub(crate) fn insert(&mut self, symbol: Symbol, code: CodeBits) -> bool {
        use std::collections::hash_map::Entry;
        match self.codes.entry(symbol) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(code);
                true
            }
        }
    }

    /// Entries in ascending symbol-byte order. This is the canonical
    /// serialization order: it makes container bytes deterministic regardless
    /// of hash-map layout.
    pub fn entries_sorted(&self) -> Vec<(&Symbol, &CodeBits)> {
        let mut items: Vec<_> = self.codes.iter().collect();
        items.sort_by_key(|(symbol, _)| *symbol);
        items
    }

    /// The codeword → symbol map the greedy decoder probes.
    pub fn reverse(&self) -> HashMap<CodeBits, Symbol> {
        self.codes
            .iter()
            .map(|(symbol, code)| (code.clone(), symbol.clone()))
            .collect()
    }

    /// Length of the longest codeword in bits.
    pub fn max_code_bits(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    /// True when no codeword is a prefix of another. Generated tables hold
    /// this by construction; parsed tables must be checked before decoding,
    /// since greedy matching is only unambiguous under this property.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&BitSlice<u8, Msb0>> =
            self.codes.values().map(|c| c.as_bitslice()).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                if a.starts_with(b) || b.starts_with(a) {
                    return false;
                }
            }
        }
        true
    }

    /// Weighted mean code length in bits/symbol over a frequency list. This
    /// is the single diagnostic metric the library reports; it assumes the
    /// entries are the ones the table was generated from.
    pub fn mean_code_len(&self, entries: &[FrequencyEntry]) -> f64 {
        let mut weighted_bits = 0u64;
        let mut total = 0u64;
        for entry in entries {
            if let Some(code) = self.get(entry.symbol.as_bytes()) {
                weighted_bits += entry.count * code.len() as u64;
                total += entry.count;
            }
        }
        if total == 0 {
            return 0.0;
        }
        weighted_bits as f64 / total as f64
    }
}

/// Walks the tree and assigns a codeword to every leaf.
///
/// A bare-leaf root (alphabet of exactly one symbol) gets the 1-bit code `0`:
/// a zero-length code could neither be packed nor recognized during decode.
pub fn generate(root: &HuffNode) -> CodeTable {
    let mut table = CodeTable::default();
    match root {
        HuffNode::Leaf(symbol) => {
            table.insert(symbol.clone(), bitvec![u8, Msb0; 0]);
        }
        HuffNode::Internal { .. } => {
            walk(root, CodeBits::new(), &mut table);
        }
    }
    table
}

fn walk(node: &HuffNode, prefix: CodeBits, table: &mut CodeTable) {
    match node {
        HuffNode::Leaf(symbol) => {
            table.insert(symbol.clone(), prefix);
        }
        HuffNode::Internal { left, right } => {
            let mut left_bits = prefix.clone();
            left_bits.push(true);
            walk(left, left_bits, table);

            let mut right_bits = prefix;
            right_bits.push(false);
            walk(right, right_bits, table);
        }
    }
}
