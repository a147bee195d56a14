//! Error types for BLTE parsing and decompression

use thiserror::Error;

/// Result type for BLTE operations
pub type Result<T> = std::result::Result<T, Error>;

/// BLTE error types
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid BLTE magic bytes
    #[error("Invalid BLTE magic: expected \"BLTE\", got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Invalid header size
    #[error("Invalid header size: {0}")]
    InvalidHeaderSize(u32),

    /// Invalid chunk count
    #[error("Invalid chunk count: {0}")]
    InvalidChunkCount(u32),

    /// Unsupported chunk table format byte
    #[error("Unsupported chunk table format: {0:#04x}")]
    UnsupportedTableFormat(u8),

    /// Unknown compression mode
    #[error("Unknown compression mode: {0:#04x}")]
    UnknownCompressionMode(u8),

    /// Chunk index out of range
    #[error("Chunk {index} out of range (file has {count} chunks)")]
    ChunkIndexOutOfRange {
        /// The requested chunk index
        index: usize,
        /// Total number of chunks in the file
        count: usize,
    },

    /// Decompression failed
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    /// Checksum mismatch
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Expected MD5 digest, hex-encoded
        expected: String,
        /// Actual MD5 digest, hex-encoded
        actual: String,
    },

    /// Truncated data
    #[error("Truncated data: expected {expected} bytes, got {actual}")]
    TruncatedData {
        /// Expected length in bytes
        expected: u64,
        /// Actual length available
        actual: u64,
    },

    /// Chunk uses an encoding mode this decoder does not support
    #[error("Unsupported chunk encoding mode: {0:?}")]
    UnsupportedEncoding(crate::ChunkEncodingHeader),
}
