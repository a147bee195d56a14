//! Parser for TACT's plain-text `key = value` configuration format.
//!
//! ## Format
//!
//! ```text
//! # Comment to be ignored
//!
//! option-name = value
//! another-option = many words value
//! ```
//!
//! Files often include trailing newline characters.

use crate::{Error, Result};
use std::io::{BufRead, ErrorKind};
use tracing::warn;

pub struct ConfigParser<T> {
    inner: T,
}

impl<T> ConfigParser<T> {
    pub fn new(inner: T) -> Self {
        ConfigParser { inner }
    }
}

impl<T: BufRead> ConfigParser<T> {
    /// Gets the next `(key, value)` pair from the file, or `None` at EOF.
    ///
    /// Comments and empty lines are skipped automatically. Unlike
    /// [`BufRead::read_line`], this clears `buf` on every call.
    pub fn next<'a>(&mut self, buf: &'a mut String) -> Result<Option<(&'a str, &'a str)>> {
        loop {
            buf.clear();
            match self.inner.read_line(buf) {
                Ok(0) => return Ok(None),
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e.into()),
                Ok(_) => (),
            }

            let trimmed = buf.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(eq_pos) = buf.find('=') else {
                let line = trimmed.to_string();
                warn!(?line, "cannot parse configuration line");
                return Err(Error::ConfigSyntax(line));
            };

            return Ok(Some((buf[..eq_pos].trim(), buf[eq_pos + 1..].trim())));
        }
    }
}

/// Parses a whitespace-separated list of base16-encoded 16-byte hashes.
pub fn parse_hex16_list(v: &str) -> Result<Vec<[u8; 16]>> {
    v.split_ascii_whitespace()
        .map(|e| {
            let mut m = [0u8; 16];
            hex::decode_to_slice(e, &mut m)
                .map_err(|_| Error::ConfigValue(e.to_string()))?;
            Ok(m)
        })
        .collect()
}

/// Parses a single base16-encoded 16-byte hash.
pub fn parse_hex16(v: &str) -> Result<[u8; 16]> {
    let mut m = [0u8; 16];
    hex::decode_to_slice(v, &mut m).map_err(|_| Error::ConfigValue(v.to_string()))?;
    Ok(m)
}

/// Parses a space-separated list of u32s.
pub fn parse_u32_list(v: &str) -> Result<Vec<u32>> {
    v.split_ascii_whitespace()
        .map(|e| e.parse().map_err(|_| Error::ConfigValue(e.to_string())))
        .collect()
}
