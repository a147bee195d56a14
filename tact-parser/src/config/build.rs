//! [Build configuration][0] parser.
//!
//! [0]: https://wowdev.wiki/TACT#Build_Config

use crate::config::parser::{parse_hex16, ConfigParser};
use crate::keys::{ContentKey, EncodingKey};
use crate::{Error, Result};
use std::io::BufRead;

/// Parsed build config.
///
/// Only the fields the pipeline actually consumes are kept; the format
/// carries many more (VFS manifests, build metadata) that aren't needed to
/// resolve files.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub root: Option<ContentKey>,
    pub encoding: Option<(ContentKey, EncodingKey)>,
    pub install: Option<ContentKey>,
    pub download: Option<ContentKey>,
    pub size: Option<ContentKey>,
    pub build_name: Option<String>,
}

impl BuildConfig {
    pub fn parse<T: BufRead>(f: T) -> Result<Self> {
        let mut parser = ConfigParser::new(f);
        let mut o = Self::default();
        let mut buf = String::with_capacity(4096);

        while let Some((k, v)) = parser.next(&mut buf)? {
            match k.to_ascii_lowercase().as_str() {
                "root" => o.root = Some(ContentKey::from(parse_hex16(v)?)),
                "encoding" => o.encoding = Some(parse_encoding_field(v)?),
                "install" => o.install = Some(ContentKey::from(first_hex16(v)?)),
                "download" => o.download = Some(ContentKey::from(first_hex16(v)?)),
                "size" => o.size = Some(ContentKey::from(first_hex16(v)?)),
                "build-name" => o.build_name = Some(v.to_string()),
                _ => {}
            }
        }

        Ok(o)
    }
}

/// Parses `build_config.encoding`, which must name exactly two values: a
/// content key and an encoding key, in that order.
///
/// The format nominally allows additional keys, but behavior in that case is
/// unspecified upstream; rather than guess, any count other than two is
/// rejected.
fn parse_encoding_field(v: &str) -> Result<(ContentKey, EncodingKey)> {
    let parts: Vec<&str> = v.split_ascii_whitespace().collect();
    if parts.len() != 2 {
        return Err(Error::EncodingFieldArity(parts.len()));
    }

    let ck = ContentKey::from(parse_hex16(parts[0])?);
    let ek = EncodingKey::from(parse_hex16(parts[1])?);
    Ok((ck, ek))
}

/// Some fields (`install`, `download`, `size`) may list a CK alone or a
/// CK/EK pair; only the first value (the CK) is needed here.
fn first_hex16(v: &str) -> Result<[u8; 16]> {
    let first = v
        .split_ascii_whitespace()
        .next()
        .ok_or_else(|| Error::ConfigValue(v.to_string()))?;
    parse_hex16(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_minimal_build_config() {
        let ck = "0".repeat(32);
        let ek = "1".repeat(32);
        let text = format!("root = {ck}\nencoding = {ck} {ek}\nbuild-name = test\n");

        let config = BuildConfig::parse(Cursor::new(text)).unwrap();
        assert_eq!(config.root.unwrap().to_hex(), ck);
        let (enc_ck, enc_ek) = config.encoding.unwrap();
        assert_eq!(enc_ck.to_hex(), ck);
        assert_eq!(enc_ek.to_hex(), ek);
        assert_eq!(config.build_name.as_deref(), Some("test"));
    }

    #[test]
    fn rejects_encoding_field_with_wrong_arity() {
        let ck = "0".repeat(32);
        let text = format!("encoding = {ck}\n");
        let result = BuildConfig::parse(Cursor::new(text));
        assert!(matches!(result, Err(Error::EncodingFieldArity(1))));
    }

    #[test]
    fn ignores_unknown_keys() {
        let text = "some-future-field = whatever\n";
        let config = BuildConfig::parse(Cursor::new(text)).unwrap();
        assert_eq!(config, BuildConfig::default());
    }
}
