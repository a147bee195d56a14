//! BLTE stream reader: chunk enumeration and decompression.

use crate::header::ChunkInfo;
use crate::{BLTEHeader, ChunkEncodingHeader, Error, Result};
use md5::{Digest, Md5 as Md5Hasher};
use std::io::{BufRead, Read, Seek, SeekFrom, Write};
use tracing::{error, warn};

/// Chunk encoding mode plus where the chunk lives in the underlying stream.
#[derive(Debug, PartialEq)]
pub struct ChunkEncodingInfo {
    /// How the chunk is encoded.
    pub encoding: ChunkEncodingHeader,

    /// Where the chunk is located within the file.
    pub info: ChunkInfo,
}

/// BLTE payload reader.
///
/// Wraps a seekable reader positioned at the start of a BLTE stream and
/// exposes chunk-by-chunk decompression. A single `T` may hold multiple
/// concatenated BLTE streams (as in `/tpr/{product}/data` archives); `offset`
/// and `length` select the one this reader addresses.
pub struct BLTEFile<T> {
    f: T,
    offset: u64,
    length: u64,
    header: BLTEHeader,
}

const EXTRACTOR_BUFFER_SIZE: usize = 8192;
const BUF_SIZE_U64: u64 = EXTRACTOR_BUFFER_SIZE as u64;

impl<T> BLTEFile<T> {
    /// The parsed header of the BLTE stream.
    pub fn header(&self) -> &BLTEHeader {
        &self.header
    }

    /// `true` if every chunk in the stream carries a compressed-data checksum.
    ///
    /// Always `false` for single-chunk streams, which have no chunk table.
    pub fn has_chunk_level_checksums(&self) -> bool {
        self.header.chunk_count() > 1 && self.header.get_chunk_info(0).is_some()
    }

    /// Number of chunks in the stream (always at least 1).
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.header.chunk_count()
    }
}

impl<T: BufRead + Seek> BLTEFile<T> {
    /// Parse a BLTE stream at `offset` within `f`, spanning `length` bytes.
    pub fn new(mut f: T, offset: u64, length: u64) -> Result<Self> {
        f.seek(SeekFrom::Start(offset))?;
        let header = BLTEHeader::parse(&mut f)?;

        Ok(Self {
            f,
            header,
            offset,
            length,
        })
    }

    /// Information about chunk `chunk`, synthesizing a single entry spanning
    /// the whole stream when there is no chunk table.
    fn chunk_info(&self, chunk: usize) -> Result<ChunkInfo> {
        if let Some(info) = self.header.get_chunk_info(chunk) {
            return Ok(info.clone());
        }

        if chunk != 0 || self.header.chunk_count() != 1 {
            return Err(Error::ChunkIndexOutOfRange {
                index: chunk,
                count: self.header.chunk_count(),
            });
        }

        let header_len = self.header.chunk_data_offset(0).unwrap_or(8);
        let compressed_size = self.length.saturating_sub(header_len);
        Ok(ChunkInfo {
            compressed_size: compressed_size as u32,
            decompressed_size: 0,
            compressed_hash: [0; 16],
            decompressed_hash: None,
            compressed_offset: header_len,
            decompressed_offset: 0,
        })
    }

    /// Reads the chunk encoding header and leaves the file position at the
    /// first byte of the chunk's payload.
    pub fn read_chunk_header(&mut self, chunk: usize) -> Result<ChunkEncodingInfo> {
        let info = self.chunk_info(chunk)?;

        if info.compressed_offset + u64::from(info.compressed_size) > self.length {
            error!(
                "chunk {chunk} out of range: {} + {} > {}",
                info.compressed_offset, info.compressed_size, self.length,
            );
            return Err(Error::TruncatedData {
                expected: info.compressed_offset + u64::from(info.compressed_size),
                actual: self.length,
            });
        }

        self.f
            .seek(SeekFrom::Start(self.offset + info.compressed_offset))?;
        let encoding = ChunkEncodingHeader::parse(&mut self.f)?;
        Ok(ChunkEncodingInfo { encoding, info })
    }

    /// Decompresses every chunk in the stream and writes the result to `out`.
    ///
    /// Supports uncompressed (`N`) and zlib-compressed (`Z`) chunks. Other
    /// modes (LZ4HC, frame-recursive BLTE, encrypted) are not produced by any
    /// content this crate needs to read and return
    /// [`Error::UnsupportedEncoding`].
    pub fn write_to<W: Write>(&mut self, mut out: W) -> Result<()> {
        let mut buf = [0u8; EXTRACTOR_BUFFER_SIZE];

        for chunk in 0..self.chunk_count() {
            let ChunkEncodingInfo { encoding, info } = self.read_chunk_header(chunk)?;
            let mut remaining = u64::from(info.compressed_size) - encoding.len() as u64;

            match encoding {
                ChunkEncodingHeader::None => {
                    while remaining > 0 {
                        let n = remaining.min(BUF_SIZE_U64) as usize;
                        self.f.read_exact(&mut buf[..n])?;
                        out.write_all(&buf[..n])?;
                        remaining -= n as u64;
                    }
                }
                ChunkEncodingHeader::ZLib => {
                    let mut decoder = flate2::write::ZlibDecoder::new(&mut out);
                    while remaining > 0 {
                        let n = remaining.min(BUF_SIZE_U64) as usize;
                        self.f.read_exact(&mut buf[..n])?;
                        decoder
                            .write_all(&buf[..n])
                            .map_err(|e| Error::DecompressionFailed(e.to_string()))?;
                        remaining -= n as u64;
                    }
                    decoder
                        .finish()
                        .map_err(|e| Error::DecompressionFailed(e.to_string()))?;
                }
                other => return Err(Error::UnsupportedEncoding(other)),
            }
        }

        Ok(())
    }

    /// Decompresses the whole stream into an in-memory buffer.
    pub fn decompress(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Verifies the compressed-data checksum of every chunk that carries one.
    ///
    /// Returns `Ok(())` for streams without chunk-level checksums.
    pub fn verify_compressed_checksum(&mut self) -> Result<()> {
        let mut buf = [0u8; EXTRACTOR_BUFFER_SIZE];

        for chunk in 0..self.chunk_count() {
            let Some(header) = self.header.get_chunk_info(chunk) else {
                return Ok(());
            };

            let mut hasher = Md5Hasher::new();
            self.f
                .seek(SeekFrom::Start(self.offset + header.compressed_offset))?;
            let mut remaining = u64::from(header.compressed_size);

            while remaining > 0 {
                let n = remaining.min(BUF_SIZE_U64) as usize;
                self.f.read_exact(&mut buf[..n])?;
                hasher.update(&buf[..n]);
                remaining -= n as u64;
            }

            let result = hasher.finalize();
            if result.as_slice() != header.compressed_hash {
                warn!(
                    "MD5 mismatch on chunk {chunk}: {} != {}",
                    hex::encode(result),
                    hex::encode(header.compressed_hash),
                );
                return Err(Error::ChecksumMismatch {
                    expected: hex::encode(header.compressed_hash),
                    actual: hex::encode(result),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn single_chunk_blte() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"BLTE");
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(b"N");
        data.extend_from_slice(b"Hello, BLTE!");
        data
    }

    fn multi_chunk_blte() -> Vec<u8> {
        let chunk1 = b"NHello";
        let chunk2 = b"N, BLTE!";
        let header_size = 8 + 1 + 3 + 2 * 24;

        let mut data = Vec::new();
        data.extend_from_slice(b"BLTE");
        data.extend_from_slice(&(header_size as u32).to_be_bytes());
        data.push(0x0F);
        data.extend_from_slice(&[0x00, 0x00, 0x02]);

        data.extend_from_slice(&(chunk1.len() as u32).to_be_bytes());
        data.extend_from_slice(&5u32.to_be_bytes());
        data.extend_from_slice(&[0; 16]);

        data.extend_from_slice(&(chunk2.len() as u32).to_be_bytes());
        data.extend_from_slice(&7u32.to_be_bytes());
        data.extend_from_slice(&[0; 16]);

        data.extend_from_slice(chunk1);
        data.extend_from_slice(chunk2);
        data
    }

    #[test]
    fn single_chunk_decompresses() {
        let data = single_chunk_blte();
        let len = data.len() as u64;
        let mut file = BLTEFile::new(Cursor::new(data), 0, len).unwrap();
        assert_eq!(file.chunk_count(), 1);
        assert!(!file.has_chunk_level_checksums());
        assert_eq!(file.decompress().unwrap(), b"Hello, BLTE!");
    }

    #[test]
    fn multi_chunk_decompresses() {
        let data = multi_chunk_blte();
        let len = data.len() as u64;
        let mut file = BLTEFile::new(Cursor::new(data), 0, len).unwrap();
        assert_eq!(file.chunk_count(), 2);
        assert!(file.has_chunk_level_checksums());
        assert_eq!(file.decompress().unwrap(), b"Hello, BLTE!");
    }

    #[test]
    fn out_of_range_chunk_errors() {
        let data = single_chunk_blte();
        let len = data.len() as u64;
        let mut file = BLTEFile::new(Cursor::new(data), 0, len).unwrap();
        let err = file.read_chunk_header(1).unwrap_err();
        assert!(matches!(err, Error::ChunkIndexOutOfRange { index: 1, .. }));
    }
}
