use std::io;

use thiserror::Error;

/// Result type for block construction and host I/O.
pub type DspResult<T> = Result<T, DspError>;

/// Errors raised while configuring a block or exchanging data with the host.
///
/// Per-step processing never fails: a diverging predictor produces non-finite
/// outputs instead of an error.
#[derive(Debug, Error)]
pub enum DspError {
    /// The FIR order (number of taps) must be at least one.
    #[error("filter order must be at least 1, got {0}")]
    InvalidOrder(usize),

    /// The decimation ratio must be at least one.
    #[error("decimation ratio must be at least 1, got {0}")]
    InvalidDivRatio(u32),

    /// A scalar parameter is out of its accepted range.
    #[error("invalid value for `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Initial coefficients do not match the configured order.
    #[error("coefficient vector has {actual} taps, expected {expected}")]
    CoefficientLength { expected: usize, actual: usize },

    /// The host data array does not contain the requested slot.
    #[error("slot {slot} is out of range (block has {len} slots)")]
    SlotOutOfRange { slot: usize, len: usize },

    /// The host slot holds a different type than the block expects.
    #[error("slot {slot} holds {found}, expected {expected}")]
    SlotType {
        slot: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// The host's instance pointer holds a different block than the entry
    /// point it was passed to.
    #[error("instance pointer does not hold a `{block}` block")]
    InstanceType { block: &'static str },

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A wrapped I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
