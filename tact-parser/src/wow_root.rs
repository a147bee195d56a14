//! Parser for the [WoW TACT root file][0] format (`TSFM` / `MFST`), which
//! maps file-data-ids to content keys, filtered by locale and content flags.
//!
//! [0]: https://wowdev.wiki/TACT#Root

use crate::ioutils::ReadInt;
use crate::keys::ContentKey;
use crate::{Error, Result};
use modular_bitfield::{bitfield, prelude::*};
use std::{
    collections::HashMap,
    io::{ErrorKind, Read, Seek},
    ops::BitAnd,
};

const TACT_MAGIC: &[u8; 4] = b"TSFM";
const MD5_LENGTH: usize = 16;

#[derive(Debug)]
pub struct WowRootHeader {
    pub use_old_record_format: bool,
    pub version: u32,
    pub total_file_count: u32,
    pub named_file_count: u32,
    pub allow_non_named_files: bool,
}

impl WowRootHeader {
    /// Parses a WoW root header.
    pub fn parse<R: Read + Seek>(f: &mut R) -> Result<Self> {
        let mut magic = [0; TACT_MAGIC.len()];
        f.read_exact(&mut magic)?;
        if &magic != TACT_MAGIC {
            // Pre-8.2 root file (used by Classic Era), no header at all.
            f.seek_relative(-(TACT_MAGIC.len() as i64))?;
            return Ok(Self {
                use_old_record_format: true,
                version: 0,
                total_file_count: 0,
                named_file_count: 0,
                allow_non_named_files: true,
            });
        }

        let mut header_size = f.read_u32le()?;
        let mut version = 0;
        let total_file_count;

        if header_size == 0x18 {
            // Format >= 10.1.7.50893
            version = f.read_u32le()?;
            total_file_count = f.read_u32le()?;
        } else {
            total_file_count = header_size;
            header_size = 0;
        }
        let named_file_count = f.read_u32le()?;

        if header_size == 0x18 {
            f.seek_relative(4)?; // padding
        }

        Ok(Self {
            use_old_record_format: false,
            allow_non_named_files: total_file_count != named_file_count,
            version,
            total_file_count,
            named_file_count,
        })
    }
}

/// One section of the root file: a uniform locale/content mask applied to a
/// run of file-data-id deltas and their content keys.
pub struct CasBlock {
    pub flags: LocaleContentFlags,
    pub fid_ck: Option<Vec<(u32, ContentKey)>>,
}

impl std::fmt::Debug for CasBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasBlock")
            .field("flags", &self.flags)
            .field("fid_ck.len", &self.fid_ck.as_ref().map(Vec::len))
            .finish()
    }
}

impl CasBlock {
    pub fn parse<R: Read + Seek>(
        f: &mut R,
        header: &WowRootHeader,
        only_locale: LocaleFlags,
    ) -> Result<Self> {
        let num_records = f.read_u32le()? as usize;

        let flags = if header.version == 2 {
            let locale = LocaleFlags::from(f.read_u32le()?);
            let v1 = f.read_u32le()?;
            let v2 = f.read_u32le()?;
            let v3 = f.read_u8()?;

            LocaleContentFlags {
                locale,
                content: ContentFlags::from(v1 | v2 | (u32::from(v3) << 17)),
            }
        } else {
            LocaleContentFlags {
                content: ContentFlags::from(f.read_u32le()?),
                locale: LocaleFlags::from(f.read_u32le()?),
            }
        };

        if num_records == 0 {
            return Ok(Self {
                flags,
                fid_ck: None,
            });
        }

        let has_name_hashes = header.use_old_record_format
            || !(header.allow_non_named_files && flags.content.no_name_hash());
        if !flags.locale.all() && !(flags.locale & only_locale).any() {
            // Skip the section: not requested. Section size is the same
            // regardless of record layout.
            let record_length =
                size_of::<u32>() + MD5_LENGTH + if has_name_hashes { size_of::<u64>() } else { 0 };
            f.seek_relative((num_records * record_length) as i64)?;

            return Ok(Self {
                flags,
                fid_ck: None,
            });
        }

        // file_id_deltas -> absolute file-data-ids
        let mut file_ids: Vec<u32> = Vec::with_capacity(num_records);
        let mut file_id = 0u32;
        for i in 0..num_records {
            let delta = f.read_i32le()?;

            file_id = if i == 0 {
                u32::try_from(delta).map_err(|_| Error::FileIdDeltaOverflow)?
            } else {
                file_id
                    .checked_add_signed(1 + delta)
                    .ok_or(Error::FileIdDeltaOverflow)?
            };

            file_ids.push(file_id);
        }

        let mut fid_ck: Vec<(u32, ContentKey)> = Vec::with_capacity(num_records);

        if header.use_old_record_format {
            for file_id in file_ids {
                let mut ck = [0; MD5_LENGTH];
                f.read_exact(&mut ck)?;
                fid_ck.push((file_id, ContentKey::from(ck)));
                f.read_u64le()?; // name hash, unused (listfile mapping is out of scope)
            }
        } else {
            for &file_id in &file_ids {
                let mut ck = [0; MD5_LENGTH];
                f.read_exact(&mut ck)?;
                fid_ck.push((file_id, ContentKey::from(ck)));
            }

            if has_name_hashes {
                for _ in &file_ids {
                    f.read_u64le()?; // name hash, unused
                }
            }
        }

        Ok(Self {
            flags,
            fid_ck: Some(fid_ck),
        })
    }
}

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct LocaleContentFlags {
    pub locale: LocaleFlags,
    pub content: ContentFlags,
}

/// Bitmask of locales content should be used for.
#[bitfield(bytes = 4)]
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub struct LocaleFlags {
    #[skip]
    __: B1,
    pub en_us: bool, // 0x2
    #[skip]
    __: B1,
    pub ko_kr: bool, // 0x4

    pub fr_fr: bool, // 0x10
    pub de_de: bool, // 0x20
    pub zh_cn: bool, // 0x40
    pub es_es: bool, // 0x80

    pub zh_tw: bool, // 0x100
    pub en_gb: bool, // 0x200
    pub en_cn: bool, // 0x400
    pub en_tw: bool, // 0x800

    pub es_mx: bool, // 0x1000
    pub ru_ru: bool, // 0x2000
    pub pt_br: bool, // 0x4000
    pub it_it: bool, // 0x8000

    pub pt_pt: bool, // 0x10000
    #[skip]
    __: B15,
}

impl LocaleFlags {
    /// `LocaleFlags` with every locale set.
    pub fn any_locale() -> Self {
        LocaleFlags::from(0xffff_ffffu32)
    }

    /// `true` if the flags indicate all locales.
    pub fn all(&self) -> bool {
        self == &Self::any_locale()
    }

    /// `true` if at least one locale flag is set.
    pub fn any(&self) -> bool {
        u32::from(*self) != 0
    }
}

impl BitAnd for LocaleFlags {
    type Output = LocaleFlags;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from(u32::from(self) & u32::from(rhs))
    }
}

/// TACT content flags on the WoW root index.
///
/// Reference: <https://wowdev.wiki/TACT#Root>
#[bitfield(bytes = 4)]
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub struct ContentFlags {
    pub high_res_texture: bool, // 0x1
    #[skip]
    __: B1,
    pub install: bool, // 0x4
    pub windows: bool, // 0x8

    pub macos: bool, // 0x10
    pub x86_32: bool, // 0x20
    pub x86_64: bool, // 0x40
    pub low_violence: bool, // 0x80

    pub mystery_platform: bool, // 0x100
    #[skip]
    __: B2,
    pub update_plugin: bool, // 0x800

    #[skip]
    __: B3,
    pub aarch64: bool, // 0x8000

    #[skip]
    __: B11,
    pub encrypted: bool, // 0x8000000

    pub no_name_hash: bool, // 0x10000000
    pub uncommon_resolution: bool, // 0x20000000
    pub bundle: bool,       // 0x40000000
    pub no_compression: bool, // 0x80000000
}

/// Parsed [WoW TACT root][0] table: file-data-id -> content key, filtered by
/// locale/content flags.
///
/// [0]: https://wowdev.wiki/TACT#Root
#[derive(Debug)]
pub struct WowRoot {
    entries: HashMap<u32, ContentKey>,
}

impl WowRoot {
    /// Parses a root table, keeping only entries matching `only_locale`.
    ///
    /// Duplicate file-data-ids are resolved by locale match priority: an
    /// entry whose locale mask intersects `only_locale` (or covers all
    /// locales) wins over one that does not; among equally-matched entries,
    /// the last one written wins.
    pub fn parse<R: Read + Seek>(f: &mut R, only_locale: LocaleFlags) -> Result<Self> {
        let header = WowRootHeader::parse(f)?;
        let mut entries: HashMap<u32, ContentKey> = HashMap::new();
        let mut matched: HashMap<u32, bool> = HashMap::new();

        loop {
            match CasBlock::parse(f, &header, only_locale) {
                Ok(block) => {
                    let Some(fid_ck) = block.fid_ck else {
                        continue;
                    };
                    let is_match = block.flags.locale.all() || (block.flags.locale & only_locale).any();

                    for (fid, ck) in fid_ck {
                        match matched.get(&fid) {
                            Some(&true) if !is_match => {
                                // A locale-matched entry already won; a
                                // non-matched one can't override it.
                            }
                            _ => {
                                entries.insert(fid, ck);
                                matched.insert(fid, is_match);
                            }
                        }
                    }
                }

                Err(Error::IOError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            }
        }

        Ok(Self { entries })
    }

    /// Number of file-data-ids retained after locale/content filtering.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the content key for a file-data-id.
    pub fn get(&self, file_data_id: u32) -> Option<ContentKey> {
        self.entries.get(&file_data_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, ContentKey)> + '_ {
        self.entries.iter().map(|(&fid, &ck)| (fid, ck))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn write_block(
        buf: &mut Vec<u8>,
        locale: u32,
        content: u32,
        records: &[(i32, [u8; MD5_LENGTH])],
    ) {
        buf.extend_from_slice(&(records.len() as u32).to_le_bytes());
        buf.extend_from_slice(&content.to_le_bytes());
        buf.extend_from_slice(&locale.to_le_bytes());
        for (delta, _) in records {
            buf.extend_from_slice(&delta.to_le_bytes());
        }
        for (_, md5) in records {
            buf.extend_from_slice(md5);
        }
        // no_name_hash is not set, so modern format still appends name hashes
        for _ in records {
            buf.extend_from_slice(&0u64.to_le_bytes());
        }
    }

    #[test]
    fn locale_filtering_prefers_matched_entries() {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"TSFM");
        buf.extend_from_slice(&0u32.to_le_bytes()); // header_size == 0 -> total_file_count=0
        buf.extend_from_slice(&1u32.to_le_bytes()); // named_file_count

        let en_us = 0x2;
        let all_locales = 0xffff_ffffu32;
        write_block(&mut buf, all_locales, 0, &[(5, [0xAA; MD5_LENGTH])]);
        write_block(&mut buf, en_us, 0, &[(5, [0xBB; MD5_LENGTH])]);

        let mut cursor = Cursor::new(buf);
        let root = WowRoot::parse(&mut cursor, LocaleFlags::from(en_us)).unwrap();

        assert_eq!(root.len(), 1);
        assert_eq!(root.get(5).unwrap().as_bytes(), &[0xBB; MD5_LENGTH]);
    }
}
