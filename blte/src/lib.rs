//! BLTE (Block Table Entry) Compression/Decompression Library
//!
//! BLTE is Blizzard's compression and encryption format used throughout
//! their content distribution system. This crate provides parsing and
//! decompression capabilities for all BLTE modes.

mod chunk;
mod error;
mod header;
mod read;

pub use chunk::{ChunkEncodingHeader, EncryptedChunkHeader};
pub use error::{Error, Result};
pub use header::{BLTEHeader, ChunkInfo};
pub use read::{BLTEFile, ChunkEncodingInfo};

/// BLTE magic bytes
pub const BLTE_MAGIC: [u8; 4] = *b"BLTE";

const MD5_LENGTH: usize = 16;
pub type Md5 = [u8; MD5_LENGTH];

/// Decodes a complete, in-memory BLTE-framed blob.
///
/// This is the entry point table loaders use to turn a downloaded encoding
/// or root table blob into its decompressed bytes.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let len = data.len() as u64;
    let mut file = BLTEFile::new(std::io::Cursor::new(data), 0, len)?;
    file.decompress()
}
