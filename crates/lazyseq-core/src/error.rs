//! Error taxonomy for the combinator pipeline.
//!
//! Errors travel **in-band**: a combinator's output is a stream of
//! `Result` items, and parameter-level contract violations surface as the
//! first pulled item rather than at construction time. After yielding an
//! `Err` a sequence is fused and yields nothing further.

use std::io;
use thiserror::Error;

/// Failures a pulled sequence item can carry.
#[derive(Debug, Error)]
pub enum Error {
    /// Chunk/window size below 1 (reports the offending value).
    #[error("invalid argument: chunk size must be at least 1, got {0}")]
    InvalidChunkSize(i64),

    /// Overlap must leave room for at least one fresh element per window.
    #[error("invalid argument: overlap size must be less than chunk size ({overlap} >= {chunk})")]
    OverlapTooLarge {
        /// Requested overlap.
        overlap: i64,
        /// Requested chunk size.
        chunk: i64,
    },

    /// A count/offset parameter that must be non-negative.
    #[error("invalid argument: {param} must be non-negative, got {value}")]
    NegativeCount {
        /// Which parameter was out of range.
        param: &'static str,
        /// The offending value.
        value: i64,
    },

    /// Reading a streaming source failed.
    #[error("read source: {0}")]
    Io(#[from] io::Error),

    /// A JSONL line failed to decode (1-based line number).
    #[error("parse jsonl line {line}: {source}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// Underlying decode failure.
        source: serde_json::Error,
    },

    /// Writing a sequence out failed to serialize.
    #[error("serialize value: {0}")]
    Serialize(serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
