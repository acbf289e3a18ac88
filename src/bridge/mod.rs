// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole public-facing API of the huffpak library. It
// provides a stable, user-friendly interface that completely encapsulates the
// pure `pipeline` engine. It is the authoritative boundary between the
// outside world (byte buffers, file paths) and the internal compression
// logic.
//
// Data Flow (Compression):
//
//   1. [File Convenience (compress_file)]   -> Receives a source path
//         |
//         `-> a. Calls `fs_impl` to marshal the path into raw bytes
//         |
//         `-> b. Calls the stateless API with the bytes
//
//   2. [Stateless API (compress_bytes)]     -> Receives `&[u8]` + config
//         |
//         `-> Calls the pure engine (`pipeline::orchestrator::compress`)
//
//   3. [Pipeline Engine]                    -> Returns `Result<Vec<u8>>`
//                                              (a serialized container)
//
// Decompression flows the same stations in reverse: `fs_impl` reads the
// container bytes, the stateless API hands them to
// `pipeline::orchestrator::decompress`, and the original bytes come back.
//
// ====================================================================================
pub(crate) mod fs_impl;

pub mod format;
pub mod stateless_api;

// --- Low-Level Stateless API ---
pub use stateless_api::{
    analyze_container, compress_bytes, compress_file, decompress_bytes, decompress_file,
    enable_verbose_logging, read_container, write_container,
};

// --- I/O Collaborator ---
pub use fs_impl::{file_size, read_bytes, write_bytes};

// --- Format Constants and Structs ---
pub use format::{CompressionStats, CONTAINER_FORMAT_VERSION, CONTAINER_MAGIC};
