//! Error types for the CASC resolution pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("TACT client error: {0}")]
    Client(#[from] tact_client::Error),

    #[error("CDN error: {0}")]
    Cdn(#[from] ngdp_cdn::Error),

    #[error("cache error: {0}")]
    Cache(#[from] ngdp_cache::Error),

    #[error("parse error: {0}")]
    Parser(#[from] tact_parser::Error),

    #[error("BLTE error: {0}")]
    Blte(#[from] blte::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no version config found for region {region:?} (product {product})")]
    Configuration { product: String, region: String },

    #[error("no live CDN hosts for product {product}")]
    NoLiveHosts { product: String },

    #[error("build index {0} out of range")]
    NoSuchBuild(usize),

    #[error("content key {0} from root table is not present in the encoding table")]
    BuildInconsistency(String),

    #[error("encoding key {0} is not present in the archive index")]
    UnindexedEncoding(String),

    #[error("file data id {0} has no root table entry")]
    NotFound(u32),

    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
