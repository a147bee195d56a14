use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("File ID delta over- or under-flows")]
    FileIdDeltaOverflow,

    #[error("file has incorrect magic: expected {expected:?}, got {actual:?}")]
    BadMagic {
        expected: &'static [u8],
        actual: Vec<u8>,
    },

    #[error("config parser syntax error on line: {0:?}")]
    ConfigSyntax(String),

    #[error("config value could not be parsed: {0:?}")]
    ConfigValue(String),

    #[error(
        "build_config.encoding must have exactly two values (content key, encoding key), got {0}"
    )]
    EncodingFieldArity(usize),

    #[error("archive index block index {0} is out of range, must be less than {1}")]
    BlockIndexOutOfRange(u64, u64),

    #[error("archive index footer entry count {count} is inconsistent with file size {size}")]
    ArchiveIndexFooterMismatch { count: u32, size: u64 },

    #[error("data checksum mismatch")]
    ChecksumMismatch,

    #[error("BLTE decode error: {0}")]
    Blte(#[from] blte::Error),
}
