//! Frozen, write-once pipeline state for a single loaded build.

use std::collections::HashMap;
use tact_client::{ProductDescriptor, ServerDescriptor};
use tact_parser::config::{BuildConfig, CdnConfig};
use tact_parser::{ArchiveKey, ContentKey, EncodingKey};
use tact_parser::encoding::EncodingFile;
use tact_parser::wow_root::WowRoot;

/// One entry in the global (cross-archive) archive index.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveEntry {
    pub archive_key: ArchiveKey,
    pub offset: u32,
    pub size: u32,
}

/// `EK -> ArchiveEntry`, aggregated across every archive listed in the CDN
/// config. Populated exactly once during [`crate::PipelineController::preload`].
#[derive(Debug, Default)]
pub struct GlobalArchiveIndex {
    entries: HashMap<EncodingKey, ArchiveEntry>,
}

impl GlobalArchiveIndex {
    pub fn insert(&mut self, ekey: EncodingKey, entry: ArchiveEntry) {
        self.entries.insert(ekey, entry);
    }

    pub fn get(&self, ekey: EncodingKey) -> Option<ArchiveEntry> {
        self.entries.get(&ekey).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State populated by `preload`: everything needed for archive-backed lookups
/// but without the (potentially huge) encoding/root tables.
pub struct PreloadedBuild {
    pub product: ProductDescriptor,
    pub server: ServerDescriptor,
    pub edge_host: String,
    pub build_config: BuildConfig,
    pub cdn_config: CdnConfig,
    pub archives: GlobalArchiveIndex,
}

/// Full build state after `load`: adds the encoding and root tables.
pub struct LoadedBuild {
    pub preloaded: PreloadedBuild,
    pub encoding: EncodingFile,
    pub root: WowRoot,
}

impl LoadedBuild {
    pub fn root_ck(&self, file_data_id: u32) -> Option<ContentKey> {
        self.root.get(file_data_id)
    }

    pub fn encoding_ek(&self, ck: ContentKey) -> Option<EncodingKey> {
        self.encoding.encoding_key(ck)
    }

    pub fn archive_entry(&self, ek: EncodingKey) -> Option<ArchiveEntry> {
        self.preloaded.archives.get(ek)
    }
}
