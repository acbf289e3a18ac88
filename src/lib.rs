//! This file is the root of the `huffpak` Rust crate.
//!
//! huffpak is a static Huffman compressor/decompressor: it derives a
//! prefix-free variable-length code from symbol frequencies, packs the input
//! into a sentinel-prefixed bitstream, and serializes the code table and
//! bitstream into one self-describing container. Symbols are fixed-width
//! byte groups (`order` = 1 for classic byte-level coding, larger for
//! N-grams).
//!
//! The responsibilities of this file are strictly limited to:
//! 1.  Declaring all the top-level modules of the library so the Rust
//!     compiler knows they exist.
//! 2.  Re-exporting the handful of types most callers need.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod pipeline;
pub mod types;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::stateless_api::{
    analyze_container, compress_bytes, compress_file, decompress_bytes, decompress_file,
};
pub use bridge::CompressionStats;
pub use config::HuffpakConfig;
pub use error::HuffpakError;
