//! Parser for [archive index][0] files, which map encoding keys to their
//! offset and size within a CDN archive blob.
//!
//! This implements the fixed-width index layout: 4096-byte blocks of
//! 24-byte entries (16-byte EKey + 4-byte big-endian size + 4-byte
//! big-endian offset), terminated by a footer giving the total entry count.
//!
//! [0]: https://wowdev.wiki/TACT#Archive_Indexes_(.index)

use crate::keys::EncodingKey;
use crate::{Error, Result};
use std::collections::HashMap;
use std::io::Read;
use tracing::warn;

const BLOCK_SIZE: usize = 4096;
const ENTRY_SIZE: usize = 24;
const FOOTER_COUNT_OFFSET_FROM_END: usize = 12;

/// Parsed archive index: encoding key -> (size, offset) within the archive.
#[derive(Debug, Default)]
pub struct ArchiveIndex {
    entries: HashMap<EncodingKey, (u32, u32)>,
}

impl ArchiveIndex {
    /// Parses an archive index from raw bytes.
    ///
    /// Entries whose EKey is all-zero are padding and are skipped. Duplicate
    /// EKeys keep the last entry written, matching append-only archive
    /// semantics.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let total_size = data.len() as u64;
        if data.len() < FOOTER_COUNT_OFFSET_FROM_END {
            return Err(Error::ArchiveIndexFooterMismatch {
                count: 0,
                size: total_size,
            });
        }

        let count_offset = data.len() - FOOTER_COUNT_OFFSET_FROM_END;
        let mut count_bytes = [0u8; 4];
        count_bytes.copy_from_slice(&data[count_offset..count_offset + 4]);
        let count = u32::from_le_bytes(count_bytes);

        if (count as u64) * (ENTRY_SIZE as u64) > total_size {
            return Err(Error::ArchiveIndexFooterMismatch {
                count,
                size: total_size,
            });
        }

        let mut entries = HashMap::with_capacity(count as usize);
        let mut remaining = count as usize;
        let mut block_start = 0usize;

        while remaining > 0 && block_start < data.len() {
            let block_end = (block_start + BLOCK_SIZE).min(data.len());
            let block = &data[block_start..block_end];
            let mut cursor = &block[..];

            while remaining > 0 && cursor.len() >= ENTRY_SIZE {
                let (entry, rest) = cursor.split_at(ENTRY_SIZE);
                cursor = rest;

                let ekey_bytes = &entry[0..16];
                if ekey_bytes.iter().all(|&b| b == 0) {
                    // Padding marks the end of live entries in this block.
                    break;
                }

                let mut ekey = [0u8; 16];
                ekey.copy_from_slice(ekey_bytes);

                let mut size_bytes = [0u8; 4];
                size_bytes.copy_from_slice(&entry[16..20]);
                let size = u32::from_be_bytes(size_bytes);

                let mut offset_bytes = [0u8; 4];
                offset_bytes.copy_from_slice(&entry[20..24]);
                let offset = u32::from_be_bytes(offset_bytes);

                entries.insert(EncodingKey::from(ekey), (size, offset));
                remaining -= 1;
            }

            block_start += BLOCK_SIZE;
        }

        if remaining > 0 {
            warn!(remaining, "archive index ended before footer entry count was reached");
        }

        Ok(Self { entries })
    }

    /// Parses an archive index from a reader, buffering the whole file.
    ///
    /// Archive indexes are small (a few hundred KB at most), so reading the
    /// whole thing into memory up front keeps the block/footer logic simple.
    pub fn parse_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::parse(&data)
    }

    /// Looks up the `(size, offset)` of an encoding key within the archive.
    pub fn get(&self, ekey: EncodingKey) -> Option<(u32, u32)> {
        self.entries.get(&ekey).copied()
    }

    /// Iterates every `(EK, (size, offset))` pair, e.g. to aggregate several
    /// per-archive indexes into a global one.
    pub fn iter(&self) -> impl Iterator<Item = (EncodingKey, (u32, u32))> + '_ {
        self.entries.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
