//! # TACT Parser
//!
//! Parser for various TACT (Torrent-Assisted Content Transfer) file formats
//! used by Blizzard Entertainment's NGDP (Next Generation Distribution Pipeline).
//!
//! This crate provides parsers for the file formats used to distribute game data
//! through Blizzard's CDN. While some community tooling refers to these as "CASC files",
//! CASC specifically refers to the virtual filesystem used by locally-installed games.
//!
//! ## Features
//!
//! - **Key namespaces**: distinct [`ContentKey`]/[`EncodingKey`]/[`ArchiveKey`] types
//! - **Config parsing**: build config and CDN config key/value files
//! - **Encoding table parsing**: content key -> encoding key resolution
//! - **Archive index parsing**: encoding key -> `(size, offset)` resolution
//! - **WoW root parsing**: file-data-id -> content key, filtered by locale/content flags
//!
//! ## Quick Start
//!
//! Parse a WoW root file to find game data files:
//!
//! ```no_run
//! use tact_parser::wow_root::{WowRoot, LocaleFlags};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = BufReader::new(File::open("path/to/root")?);
//! let root = WowRoot::parse(&mut file, LocaleFlags::any_locale())?;
//! println!("Resolved {} file entries", root.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## See Also
//!
//! - [`tact-client`](https://docs.rs/tact-client) - TACT protocol client
//! - [TACT Format Documentation](https://wowdev.wiki/TACT)

pub mod archive;
pub mod config;
pub mod encoding;
mod error;
mod ioutils;
pub mod keys;
pub mod utils;
pub mod wow_root;

pub use error::Error;
pub use keys::{ArchiveKey, ContentKey, EncodingKey};
pub type Result<T> = std::result::Result<T, Error>;
