//! This module contains the kernel that builds the Huffman tree from a sorted
//! frequency list using the classic two-lowest-merge method.
//!
//! The merge order is part of the format contract. The working list stays
//! sorted descending; each step consumes the two tail entries, and the merged
//! node is appended and re-sorted with a stable sort so that entries with
//! equal counts keep the relative order they had just before the merge. This
//! makes the tree (and therefore every codeword) a deterministic function of
//! the input.

use crate::error::HuffpakError;
use crate::kernels::frequency::FrequencyEntry;
use crate::types::Symbol;

/// A node of the code tree. Each internal node exclusively owns its two
/// children; the finished tree is full (every internal node has exactly two
/// children).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf(Symbol),
    Internal {
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

/// Builds the tree from entries sorted descending by count (ties in
/// first-seen order), as produced by `frequency::analyze`.
pub fn build_tree(entries: &[FrequencyEntry]) -> Result<HuffNode, HuffpakError> {
    if entries.is_empty() {
        return Err(HuffpakError::EmptyInput);
    }

    let mut working: Vec<(HuffNode, u64)> = entries
        .iter()
        .map(|e| (HuffNode::Leaf(e.symbol.clone()), e.count))
        .collect();

    while working.len() > 1 {
        // The two lowest-frequency entries sit at the tail of the
        // descending-sorted list. The lower one becomes the left child and
        // will collect the extra '1' bit.
        let (lowest, count_lowest) = working.pop().ok_or_else(underflow)?;
        let (next_lowest, count_next) = working.pop().ok_or_else(underflow)?;

        let merged = HuffNode::Internal {
            left: Box::new(lowest),
            right: Box::new(next_lowest),
        };
        working.push((merged, count_lowest + count_next));
        // Stable: equal counts keep their pre-merge relative order, with the
        // fresh node slotting in after existing peers of the same count.
        working.sort_by(|a, b| b.1.cmp(&a.1));
    }

    working
        .into_iter()
        .next()
        .map(|(root, _)| root)
        .ok_or_else(underflow)
}

fn underflow() -> HuffpakError {
    HuffpakError::InternalError("tree builder working list underflow".to_string())
}
