//! File resolver: turns a file-data-id into a BLTE-framed blob.

use crate::state::LoadedBuild;
use crate::{Error, Result};
use ngdp_cache::build::{BuildCache, Category};
use ngdp_cdn::CdnClient;
use tact_parser::EncodingKey;
use tracing::debug;

/// An opaque, still-BLTE-framed byte container. The EK tag lets an external
/// BLTE decoder verify per-block hashes; decoding the payload itself is out
/// of scope for this pipeline.
#[derive(Debug, Clone)]
pub struct BLTEBlob {
    pub ekey: EncodingKey,
    pub bytes: Vec<u8>,
}

/// Resolves file-data-ids against a loaded build, fetching and caching data
/// as needed. Safe to call concurrently: a second caller racing the first
/// for the same EK simply overwrites the cache entry with identical bytes.
pub struct FileResolver<'a> {
    build: &'a LoadedBuild,
    cache: &'a BuildCache,
    cdn: &'a CdnClient,
}

impl<'a> FileResolver<'a> {
    pub fn new(build: &'a LoadedBuild, cache: &'a BuildCache, cdn: &'a CdnClient) -> Self {
        Self { build, cache, cdn }
    }

    pub async fn get_file(&self, file_data_id: u32) -> Result<BLTEBlob> {
        let ck = self
            .build
            .root_ck(file_data_id)
            .ok_or(Error::NotFound(file_data_id))?;

        let ek = self
            .build
            .encoding_ek(ck)
            .ok_or_else(|| Error::BuildInconsistency(ck.to_hex()))?;

        let cache_name = ek.to_hex();
        if let Some(bytes) = self.cache.get(Some(Category::Data), &cache_name).await? {
            debug!(ekey = %ek, "file resolver cache hit");
            return Ok(BLTEBlob { ekey: ek, bytes });
        }

        let entry = self
            .build
            .archive_entry(ek)
            .ok_or_else(|| Error::UnindexedEncoding(ek.to_hex()))?;

        let archive_hex = entry.archive_key.to_hex();
        let response = self
            .cdn
            .download_data_range(
                &self.build.preloaded.edge_host,
                &self.build.preloaded.server.path,
                &archive_hex,
                u64::from(entry.offset),
                u64::from(entry.size),
            )
            .await?;

        let bytes = response.bytes().await.map_err(ngdp_cdn::Error::from)?.to_vec();

        self.cache.store(Some(Category::Data), &cache_name, &bytes).await;

        Ok(BLTEBlob { ekey: ek, bytes })
    }
}
