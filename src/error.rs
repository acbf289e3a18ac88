//! This module defines the single, unified error type for the entire huffpak
//! library. It uses the `thiserror` crate to provide ergonomic, context-aware
//! error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffpakError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    #[error("input contains no symbols to encode")]
    EmptyInput,

    #[error("degenerate alphabet: {0}")]
    DegenerateAlphabet(String),

    #[error("invalid container header: {0}")]
    InvalidHeader(String),

    #[error("corrupt container: {0}")]
    CorruptContainer(String),

    #[error("bitstream decode failed: {0}")]
    DecodeError(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., file not
    /// found, permission denied). Passed through unmodified, never retried.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while parsing a config
    /// snippet at the application boundary.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    // =========================================================================
    // === Low-Level Kernel Errors
    // =========================================================================
    #[error("LEB128 decoding error: {0}")]
    Leb128DecodeError(String),
}
