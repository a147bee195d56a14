//! CDN configuration parser.

use crate::config::parser::{parse_hex16, parse_hex16_list, parse_u32_list, ConfigParser};
use crate::keys::ArchiveKey;
use crate::Result;
use std::io::BufRead;

/// Parsed CDN config.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CdnConfig {
    /// Archive keys of every archive in the build.
    pub archives: Vec<ArchiveKey>,

    /// Archive-index sizes, parallel to `archives`.
    pub archives_index_size: Vec<u32>,

    /// Archive key of the combined index file, if present.
    pub archive_group: Option<ArchiveKey>,

    pub patch_archives: Vec<ArchiveKey>,

    /// Archive key of the flat file index, if present.
    pub file_index: Option<ArchiveKey>,
}

impl CdnConfig {
    pub fn parse<T: BufRead>(f: T) -> Result<Self> {
        let mut parser = ConfigParser::new(f);
        let mut o = Self::default();
        let mut buf = String::with_capacity(4096);

        while let Some((k, v)) = parser.next(&mut buf)? {
            match k.to_ascii_lowercase().as_str() {
                "archives" => {
                    o.archives = parse_hex16_list(v)?.into_iter().map(ArchiveKey::from).collect();
                }
                "archives-index-size" => {
                    o.archives_index_size = parse_u32_list(v)?;
                }
                "archive-group" => {
                    o.archive_group = Some(ArchiveKey::from(parse_hex16(v)?));
                }
                "patch-archives" => {
                    o.patch_archives =
                        parse_hex16_list(v)?.into_iter().map(ArchiveKey::from).collect();
                }
                "file-index" => {
                    o.file_index = Some(ArchiveKey::from(parse_hex16(v)?));
                }
                _ => {}
            }
        }

        Ok(o)
    }

    /// Iterates `(archive_key, index_size)` pairs, if both fields were present
    /// and of equal length.
    pub fn archives_with_index_size(&self) -> impl Iterator<Item = (ArchiveKey, u32)> + '_ {
        self.archives
            .iter()
            .copied()
            .zip(self.archives_index_size.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_archive_list() {
        let a = "a".repeat(32);
        let b = "b".repeat(32);
        let text = format!("archives = {a} {b}\narchives-index-size = 100 200\n");

        let config = CdnConfig::parse(Cursor::new(text)).unwrap();
        assert_eq!(config.archives.len(), 2);
        assert_eq!(
            config.archives_with_index_size().collect::<Vec<_>>(),
            vec![(config.archives[0], 100), (config.archives[1], 200)]
        );
    }
}
