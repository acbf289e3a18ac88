//! The pure, stateless kernels of the compressor. Each kernel is a single
//! stage of the encode/decode pipeline, is panic-free, and communicates
//! failure exclusively through `Result<_, HuffpakError>`.

pub mod bitpack;
pub mod codebook;
pub mod frequency;
pub mod leb128;
pub mod tree;
