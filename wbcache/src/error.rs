use std::num::ParseIntError;
use thiserror::Error;

/// A geometry which can't describe a cache. Always raised before the cache is allocated
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("capacity must be at least one byte")]
    ZeroCapacity,
    #[error("associativity must be at least one way")]
    ZeroAssociativity,
    #[error("block size {0}B is not supported, it must be a power of two of at least 4B")]
    UnsupportedBlockSize(u32),
    #[error("capacity {capacity}B can't be split into {associativity}-way sets of {block_size}B blocks")]
    IndivisibleCapacity {
        capacity: u32,
        associativity: u32,
        block_size: u32,
    },
    #[error("the geometry results in {0} sets, which is not a power of two")]
    SetCountNotPowerOfTwo(u32),
    #[error("couldn't parse `{0}`, expected capacity:associativity:block_size")]
    BadFormat(String),
    #[error("couldn't parse `{value}` as a geometry field: {source}")]
    BadNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("couldn't parse the geometry file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single trace line couldn't be turned into an access
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("unknown access marker `{0}`, expected `R` or `W`")]
    UnknownMarker(String),
    #[error("missing address")]
    MissingAddress,
    #[error("unexpected input `{0}` after the address")]
    TrailingInput(String),
    #[error("`{0}` is not a 32-bit hexadecimal or decimal address")]
    InvalidAddress(String),
    #[error("the line is not valid UTF-8")]
    InvalidUtf8,
}

/// Errors which abort a simulation run
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("malformed trace line {line_number} `{line}`: {source}")]
    MalformedTraceLine {
        line_number: usize,
        line: String,
        #[source]
        source: TraceError,
    },
    #[error("couldn't read the trace: {0}")]
    Io(#[from] std::io::Error),
}
