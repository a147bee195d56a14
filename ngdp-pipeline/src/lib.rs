//! CASC/NGDP remote-CDN resolution pipeline.
//!
//! Wires the patch client, host resolver, config fetcher, archive index
//! loader, encoding/root table loaders, and file resolver (each living in
//! their own crate) into the dependency chain described in the TACT/CASC
//! distribution model: file-data-id -> content key -> encoding key ->
//! archive entry -> byte range on a CDN edge host.
//!
//! ```no_run
//! use ngdp_pipeline::PipelineController;
//! use ngdp_cdn::CancellationToken;
//! use tact_client::Region;
//!
//! # async fn example() -> ngdp_pipeline::Result<()> {
//! let mut controller = PipelineController::new(Region::US, "./ngdp-cache")?;
//! controller.init(&["wow"]).await?;
//!
//! let (build, cache) = controller.load(0, CancellationToken::new(), None).await?;
//! let resolver = ngdp_pipeline::FileResolver::new(&build, &cache, controller.cdn_client());
//! let _blte_blob = resolver.get_file(1322105).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod pipeline;
mod progress;
mod resolver;
mod state;

pub use error::{Error, Result};
pub use pipeline::PipelineController;
pub use progress::{ProgressCallback, ProgressReporter, TOTAL_STEPS};
pub use resolver::{BLTEBlob, FileResolver};
pub use state::{ArchiveEntry, GlobalArchiveIndex, LoadedBuild, PreloadedBuild};
