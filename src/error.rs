// src/error.rs
//! Engine error taxonomy. Per-source failures are recovered inside the
//! aggregator; only `NoContentAvailable` ever reaches a caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("source `{source_id}` answered HTTP {status}")]
    SourceUnavailable { source_id: String, status: u16 },

    #[error("source `{source_id}` timed out")]
    SourceTimeout { source_id: String },

    #[error("source `{source_id}` returned a malformed listing: {reason}")]
    Decode { source_id: String, reason: String },

    #[error("no usable content from any source")]
    NoContentAvailable,
}

pub type Result<T> = std::result::Result<T, AggregateError>;
