//! Per-build content-addressed cache for NGDP pipeline state.
//!
//! The cache root is always configuration injected by the caller (a build
//! config hash under a user-chosen data root); [`get_cache_dir`] exists only
//! as a convenience for callers that want a platform-default root to pass in.

use std::path::{Path, PathBuf};

pub mod build;
pub mod error;

pub use error::{Error, Result};

/// Get the base NGDP cache directory
///
/// Returns a path like:
/// - Linux: `~/.cache/ngdp`
/// - macOS: `~/Library/Caches/ngdp`
/// - Windows: `C:\Users\{user}\AppData\Local\ngdp\cache`
pub fn get_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .ok_or(Error::CacheDirectoryNotFound)
        .map(|dir| dir.join("ngdp"))
}

/// Ensure a directory exists, creating it if necessary
pub(crate) async fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if tokio::fs::metadata(path).await.is_err() {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}
