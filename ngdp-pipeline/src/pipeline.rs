//! Pipeline controller: owns the lifecycle from product list to a loaded build.

use crate::progress::{ProgressCallback, ProgressReporter};
use crate::state::{ArchiveEntry, GlobalArchiveIndex, LoadedBuild, PreloadedBuild};
use crate::{Error, Result};
use futures_util::future::join_all;
use futures_util::stream::{self, StreamExt};
use ngdp_cache::build::{BuildCache, Category};
use ngdp_cdn::{resolve_host, CancellationToken, CdnClient};
use std::io::Cursor;
use std::path::PathBuf;
use tact_client::{HttpClient, ProductDescriptor, ProtocolVersion, Region};
use tact_parser::config::{BuildConfig, CdnConfig};
use tact_parser::encoding::EncodingFile;
use tact_parser::wow_root::{LocaleFlags, WowRoot};
use tracing::warn;

/// Archive indexes are downloaded with this many requests in flight at once.
const ARCHIVE_INDEX_CONCURRENCY: usize = 50;

/// Drives a build from product selection through a fully loaded, queryable
/// state. Holds no mutable state across network calls beyond the build list
/// populated by [`Self::init`]; `preload`/`load` are safe to call repeatedly
/// or concurrently for different `build_index` values.
pub struct PipelineController {
    patch: HttpClient,
    cdn: CdnClient,
    probe_client: reqwest::Client,
    user_data_root: PathBuf,
    region: Region,
    builds: Vec<ProductDescriptor>,
}

impl PipelineController {
    /// Creates a controller for `region`, caching build content under
    /// `user_data_root`.
    pub fn new(region: Region, user_data_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            patch: HttpClient::new(region, ProtocolVersion::V1)?,
            cdn: CdnClient::new()?,
            probe_client: reqwest::Client::new(),
            user_data_root: user_data_root.into(),
            region,
            builds: Vec::new(),
        })
    }

    /// Creates a controller from already-configured `patch`/`cdn` clients,
    /// e.g. a `patch` built with `HttpClient::with_base_url` to point at a
    /// mock server in tests.
    pub fn with_clients(
        region: Region,
        user_data_root: impl Into<PathBuf>,
        patch: HttpClient,
        cdn: CdnClient,
    ) -> Self {
        Self {
            patch,
            cdn,
            probe_client: reqwest::Client::new(),
            user_data_root: user_data_root.into(),
            region,
            builds: Vec::new(),
        }
    }

    /// Builds populated by the most recent [`Self::init`] call, filtered to
    /// this controller's region.
    pub fn builds(&self) -> &[ProductDescriptor] {
        &self.builds
    }

    /// The CDN client backing this controller, for constructing a
    /// [`crate::FileResolver`] once a build is loaded.
    pub fn cdn_client(&self) -> &CdnClient {
        &self.cdn
    }

    /// Fetches the version manifest for every product in `products`,
    /// tolerating individual product failures. Fails only if every product
    /// was unreachable, since that indicates the patch host itself is down.
    pub async fn init(&mut self, products: &[&str]) -> Result<()> {
        let fetches = products.iter().map(|product| self.patch.get_versions_parsed(product));
        let results = join_all(fetches).await;

        let mut builds = Vec::new();
        let mut failures = 0usize;
        for (product, result) in products.iter().zip(results) {
            match result {
                Ok(entries) => builds.extend(
                    entries
                        .into_iter()
                        .filter(|entry| entry.region == self.region.as_str()),
                ),
                Err(e) => {
                    warn!(product, error = %e, "failed to fetch version manifest");
                    failures += 1;
                }
            }
        }

        if !products.is_empty() && failures == products.len() {
            return Err(Error::Configuration {
                product: products.join(","),
                region: self.region.as_str().to_string(),
            });
        }

        self.builds = builds;
        Ok(())
    }

    /// Selects a build and runs server config, host resolution, config
    /// fetch, and archive index loading. Does not load encoding, root, or
    /// initialize the build cache; used when only archive-backed lookups
    /// are required.
    pub async fn preload(
        &self,
        build_index: usize,
        token: CancellationToken,
    ) -> Result<(PreloadedBuild, BuildCache)> {
        let mut progress = ProgressReporter::new(token);
        self.preload_inner(build_index, &mut progress).await
    }

    /// Runs `preload`, then initializes the build cache and loads the
    /// encoding and root tables in sequence. Steps through all 10 stages of
    /// the progress reporter.
    pub async fn load(
        &self,
        build_index: usize,
        token: CancellationToken,
        callback: Option<ProgressCallback>,
    ) -> Result<(LoadedBuild, BuildCache)> {
        let mut progress = ProgressReporter::new(token);
        if let Some(cb) = callback {
            progress = progress.with_callback(cb);
        }

        let (preloaded, cache) = self.preload_inner(build_index, &mut progress).await?;

        cache.init().await?;
        progress.step("initialize build cache").await?;

        let (_root_ck, encoding_ek) = preloaded.build_config.encoding.ok_or_else(|| {
            Error::BuildInconsistency("build config has no encoding field".to_string())
        })?;

        let encoding_bytes = self
            .fetch_singleton(&preloaded, &cache, &encoding_ek.to_hex(), "encoding")
            .await?;
        let encoding = EncodingFile::parse(&encoding_bytes)?;
        progress.step("fetch and parse encoding table").await?;

        let root_ck = preloaded
            .build_config
            .root
            .ok_or_else(|| Error::BuildInconsistency("build config has no root field".to_string()))?;
        let root_ek = encoding
            .encoding_key(root_ck)
            .ok_or_else(|| Error::BuildInconsistency(root_ck.to_hex()))?;

        let root_bytes = self
            .fetch_singleton(&preloaded, &cache, &root_ek.to_hex(), "root")
            .await?;
        progress.step("fetch root table").await?;

        let root = WowRoot::parse(&mut Cursor::new(root_bytes), LocaleFlags::any_locale())?;
        progress.step("parse root table").await?;

        Ok((LoadedBuild { preloaded, encoding, root }, cache))
    }

    async fn preload_inner(
        &self,
        build_index: usize,
        progress: &mut ProgressReporter,
    ) -> Result<(PreloadedBuild, BuildCache)> {
        let product = self
            .builds
            .get(build_index)
            .ok_or(Error::NoSuchBuild(build_index))?
            .clone();
        progress.step("select build").await?;

        let servers = self.patch.get_cdns_parsed(&product.product).await?;
        let server = servers
            .into_iter()
            .find(|s| s.name == self.region.as_str())
            .ok_or_else(|| Error::Configuration {
                product: product.product.clone(),
                region: self.region.as_str().to_string(),
            })?;
        progress.step("fetch server config").await?;

        let edge_host = resolve_host(&self.probe_client, &server.hosts, progress.cancellation_token()).await?;
        progress.step("resolve edge host").await?;

        let build_config_text = self
            .cdn
            .download_build_config(&edge_host, &server.path, &product.build_config)
            .await?
            .text()
            .await
            .map_err(ngdp_cdn::Error::from)?;
        let build_config = BuildConfig::parse(Cursor::new(build_config_text))?;
        progress.step("fetch build config").await?;

        let cdn_config_text = self
            .cdn
            .download_cdn_config(&edge_host, &server.path, &product.cdn_config)
            .await?
            .text()
            .await
            .map_err(ngdp_cdn::Error::from)?;
        let cdn_config = CdnConfig::parse(Cursor::new(cdn_config_text))?;
        progress.step("fetch CDN config").await?;

        let cache = BuildCache::new(&self.user_data_root, &product.build_config).await?;
        cache.init().await?;

        let archives = self
            .load_archive_indexes(&cache, &edge_host, &server.path, &cdn_config)
            .await?;
        progress.step("load archive indexes").await?;

        Ok((
            PreloadedBuild {
                product,
                server,
                edge_host,
                build_config,
                cdn_config,
                archives,
            },
            cache,
        ))
    }

    async fn load_archive_indexes(
        &self,
        cache: &BuildCache,
        edge_host: &str,
        path: &str,
        cdn_config: &CdnConfig,
    ) -> Result<GlobalArchiveIndex> {
        let parsed = stream::iter(cdn_config.archives.iter().copied())
            .map(|archive_key| async move {
                let hex = archive_key.to_hex();
                let cache_name = format!("{hex}.index");
                let bytes = match cache.get(Some(Category::Indexes), &cache_name).await? {
                    Some(bytes) => bytes,
                    None => {
                        let response = self.cdn.download_data_index(edge_host, path, &hex).await?;
                        let bytes = response.bytes().await.map_err(ngdp_cdn::Error::from)?.to_vec();
                        cache.store(Some(Category::Indexes), &cache_name, &bytes).await;
                        bytes
                    }
                };
                let index = tact_parser::archive::ArchiveIndex::parse(&bytes)?;
                Result::Ok((archive_key, index))
            })
            .buffer_unordered(ARCHIVE_INDEX_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        let mut global = GlobalArchiveIndex::default();
        for entry in parsed {
            let (archive_key, index) = entry?;
            for (ekey, (size, offset)) in index.iter() {
                global.insert(ekey, ArchiveEntry { archive_key, offset, size });
            }
        }
        Ok(global)
    }

    async fn fetch_singleton(
        &self,
        preloaded: &PreloadedBuild,
        cache: &BuildCache,
        hash: &str,
        cache_name: &str,
    ) -> Result<Vec<u8>> {
        let framed = match cache.get(None, cache_name).await? {
            Some(bytes) => bytes,
            None => {
                let response = self
                    .cdn
                    .download_data(&preloaded.edge_host, &preloaded.server.path, hash)
                    .await?;
                let bytes = response.bytes().await.map_err(ngdp_cdn::Error::from)?.to_vec();
                cache.store(None, cache_name, &bytes).await;
                bytes
            }
        };
        Ok(blte::decode(&framed)?)
    }
}
