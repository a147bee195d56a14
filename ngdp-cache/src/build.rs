//! Per-build content-addressed cache.
//!
//! Mirrors a single build's data under `{user_data_root}/{build_config_hash}/`:
//!
//! ```text
//! encoding                      <- BLTE-framed encoding table bytes
//! root                          <- BLTE-framed root table bytes
//! indexes/{archive_hash}.index  <- raw archive index
//! data/{encoding_key}           <- raw (still BLTE-framed) file payload
//! ```
//!
//! Writes are atomic: content lands in a sibling temp file first, then is
//! renamed into place, so a reader never observes a partially written file.

use crate::{ensure_dir, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, warn};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Subdirectory an entry belongs to. `None` names one of the per-build
/// singleton files (`encoding`, `root`) that live directly under the build
/// directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Indexes,
    Data,
}

impl Category {
    fn dir_name(self) -> &'static str {
        match self {
            Category::Indexes => "indexes",
            Category::Data => "data",
        }
    }
}

/// Content-addressed cache for a single build.
pub struct BuildCache {
    base_dir: PathBuf,
}

impl BuildCache {
    /// Opens the cache directory for a build, creating it if necessary.
    pub async fn new(user_data_root: impl AsRef<Path>, build_config_hash: &str) -> Result<Self> {
        let base_dir = user_data_root.as_ref().join(build_config_hash);
        ensure_dir(&base_dir).await?;
        Ok(Self { base_dir })
    }

    /// Creates the `indexes/` and `data/` subdirectories.
    pub async fn init(&self) -> Result<()> {
        ensure_dir(self.base_dir.join(Category::Indexes.dir_name())).await?;
        ensure_dir(self.base_dir.join(Category::Data.dir_name())).await?;
        Ok(())
    }

    fn path(&self, category: Option<Category>, name: &str) -> PathBuf {
        match category {
            Some(c) => self.base_dir.join(c.dir_name()).join(name),
            None => self.base_dir.join(name),
        }
    }

    /// `true` if `name` is present in the cache under `category`.
    pub async fn has(&self, category: Option<Category>, name: &str) -> bool {
        tokio::fs::metadata(self.path(category, name)).await.is_ok()
    }

    /// Reads `name` from the cache under `category`, or `None` if absent.
    pub async fn get(&self, category: Option<Category>, name: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path(category, name)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stores `data` under `category`/`name`, atomically.
    ///
    /// Failures are logged and swallowed: a failed store never propagates to
    /// the caller. A subsequent `get` for the same name will simply miss and
    /// the content is re-fetched.
    pub async fn store(&self, category: Option<Category>, name: &str, data: &[u8]) {
        if let Err(e) = self.store_inner(category, name, data).await {
            warn!(name, ?category, error = %e, "build cache store failed, will retry on next fetch");
        }
    }

    async fn store_inner(&self, category: Option<Category>, name: &str, data: &[u8]) -> Result<()> {
        let dest = self.path(category, name);
        if let Some(parent) = dest.parent() {
            ensure_dir(parent).await?;
        }

        let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp = dest.with_extension(format!("tmp-{}-{n}", std::process::id()));

        if let Err(e) = tokio::fs::write(&tmp, data).await {
            error!(?tmp, error = %e, "failed to write build cache temp file");
            return Err(e.into());
        }

        if let Err(e) = tokio::fs::rename(&tmp, &dest).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        Ok(())
    }
}
