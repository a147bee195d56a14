//! Parser for the [encoding file][0], which maps content keys to encoding
//! keys.
//!
//! Unlike most other TACT formats, the encoding file's multi-byte integer
//! fields are big-endian.
//!
//! [0]: https://wowdev.wiki/TACT#Encoding_table

use crate::keys::{ContentKey, EncodingKey};
use crate::utils::read_uint40_be;
use crate::{Error, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use tracing::{debug, trace, warn};

const ENCODING_MAGIC: [u8; 2] = *b"EN";
const MD5_LEN: usize = 16;

#[derive(Debug, Clone)]
pub struct EncodingHeader {
    pub version: u8,
    pub ckey_hash_size: u8,
    pub ekey_hash_size: u8,
    pub ckey_page_size_kb: u16,
    pub ekey_page_size_kb: u16,
    pub ckey_page_count: u32,
    pub ekey_page_count: u32,
    pub espec_block_size: u32,
}

struct PageInfo {
    checksum: [u8; MD5_LEN],
}

/// Parsed encoding table: content key -> first listed encoding key.
///
/// Encoding entries may list multiple encoding keys for a given content
/// key (e.g. recompressed with a different codec); only the first is kept,
/// matching how the reference client resolves content for download.
#[derive(Debug)]
pub struct EncodingFile {
    pub header: EncodingHeader,
    ckey_to_ekey: HashMap<ContentKey, EncodingKey>,
    ckey_to_size: HashMap<ContentKey, u64>,
}

impl EncodingFile {
    /// Parses an encoding file from raw (already BLTE-decoded) bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let header = Self::parse_header(&mut cursor)?;
        debug!(
            version = header.version,
            ckey_pages = header.ckey_page_count,
            ekey_pages = header.ekey_page_count,
            "parsed encoding header"
        );

        let ckey_page_table = Self::parse_page_table(
            &mut cursor,
            header.ckey_page_count as usize,
            header.ckey_hash_size as usize,
        )?;
        trace!(pages = ckey_page_table.len(), "parsed CKey page table");

        // EKey page table follows; it only indexes encoding-spec strings, which
        // aren't resolved here, but must still be skipped.
        let _ekey_page_table = Self::parse_page_table(
            &mut cursor,
            header.ekey_page_count as usize,
            header.ekey_hash_size as usize,
        )?;

        let mut ckey_to_ekey = HashMap::new();
        let mut ckey_to_size = HashMap::new();
        let page_size = header.ckey_page_size_kb as usize * 1024;

        for (i, page_info) in ckey_page_table.iter().enumerate() {
            let mut page_data = vec![0u8; page_size];
            cursor.read_exact(&mut page_data)?;

            let checksum = md5::compute(&page_data);
            if checksum.0 != page_info.checksum {
                warn!(page = i, "CKey page checksum mismatch");
            }

            Self::parse_ckey_page(&page_data, &mut ckey_to_ekey, &mut ckey_to_size)?;
        }

        debug!(entries = ckey_to_ekey.len(), "parsed CKey entries");

        Ok(Self {
            header,
            ckey_to_ekey,
            ckey_to_size,
        })
    }

    fn parse_header<R: Read>(reader: &mut R) -> Result<EncodingHeader> {
        let mut magic = [0u8; 2];
        reader.read_exact(&mut magic)?;
        if magic != ENCODING_MAGIC {
            return Err(Error::BadMagic {
                expected: b"EN",
                actual: magic.to_vec(),
            });
        }

        let version = reader.read_u8()?;
        let ckey_hash_size = reader.read_u8()?;
        let ekey_hash_size = reader.read_u8()?;
        let ckey_page_size_kb = reader.read_u16::<BigEndian>()?;
        let ekey_page_size_kb = reader.read_u16::<BigEndian>()?;
        let ckey_page_count = reader.read_u32::<BigEndian>()?;
        let ekey_page_count = reader.read_u32::<BigEndian>()?;
        let _unk = reader.read_u8()?;
        let espec_block_size = reader.read_u32::<BigEndian>()?;

        Ok(EncodingHeader {
            version,
            ckey_hash_size,
            ekey_hash_size,
            ckey_page_size_kb,
            ekey_page_size_kb,
            ckey_page_count,
            ekey_page_count,
            espec_block_size,
        })
    }

    fn parse_page_table<R: Read>(
        reader: &mut R,
        page_count: usize,
        hash_size: usize,
    ) -> Result<Vec<PageInfo>> {
        let mut pages = Vec::with_capacity(page_count);
        for _ in 0..page_count {
            let mut first_hash = vec![0u8; hash_size];
            reader.read_exact(&mut first_hash)?;

            let mut checksum = [0u8; MD5_LEN];
            reader.read_exact(&mut checksum)?;
            pages.push(PageInfo { checksum });
        }
        Ok(pages)
    }

    fn parse_ckey_page(
        data: &[u8],
        ckey_to_ekey: &mut HashMap<ContentKey, EncodingKey>,
        ckey_to_size: &mut HashMap<ContentKey, u64>,
    ) -> Result<()> {
        let mut offset = 0;

        while offset < data.len() {
            if offset + 6 > data.len() || data[offset..].iter().all(|&b| b == 0) {
                break;
            }

            let key_count = data[offset];
            offset += 1;
            if key_count == 0 {
                break;
            }

            if offset + 5 > data.len() {
                break;
            }
            let size = read_uint40_be(&data[offset..offset + 5])?;
            offset += 5;

            if offset + MD5_LEN > data.len() {
                break;
            }
            let mut ckey_bytes = [0u8; MD5_LEN];
            ckey_bytes.copy_from_slice(&data[offset..offset + MD5_LEN]);
            let ckey = ContentKey::from(ckey_bytes);
            offset += MD5_LEN;

            let mut first_ekey = None;
            for i in 0..key_count {
                if offset + MD5_LEN > data.len() {
                    break;
                }
                let mut ekey_bytes = [0u8; MD5_LEN];
                ekey_bytes.copy_from_slice(&data[offset..offset + MD5_LEN]);
                offset += MD5_LEN;
                if i == 0 {
                    first_ekey = Some(EncodingKey::from(ekey_bytes));
                }
            }

            if let Some(ekey) = first_ekey {
                ckey_to_ekey.entry(ckey).or_insert(ekey);
                ckey_to_size.entry(ckey).or_insert(size);
            }
        }

        Ok(())
    }

    /// Looks up the encoding key for a content key.
    pub fn encoding_key(&self, ckey: ContentKey) -> Option<EncodingKey> {
        self.ckey_to_ekey.get(&ckey).copied()
    }

    /// Looks up the decoded file size for a content key.
    pub fn file_size(&self, ckey: ContentKey) -> Option<u64> {
        self.ckey_to_size.get(&ckey).copied()
    }

    pub fn ckey_count(&self) -> usize {
        self.ckey_to_ekey.len()
    }
}
