//! Error types returned by sketch operations.

use std::io;

use thiserror::Error;

/// Result type alias for sketch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by sketch construction, ingestion, and merge operations.
///
/// Every variant is a caller-correctable precondition violation: nothing is retried
/// internally, and a failing operation leaves the sketch unmutated.
#[derive(Error, Debug)]
pub enum Error {
    /// Construction with a precision outside the supported `4..=64` range.
    #[error("invalid precision {0}, must be in 4..=64")]
    InvalidPrecision(u8),
    /// Merge operands disagree on precision.
    #[error("precision mismatch: {lhs} vs {rhs}")]
    PrecisionMismatch { lhs: u8, rhs: u8 },
    /// Merge operands use different hash-accumulator algorithms.
    #[error("hash algorithm mismatch: {lhs:?} vs {rhs:?}")]
    HashMismatch { lhs: &'static str, rhs: &'static str },
    /// A hash accumulator is already bound to this sketch.
    #[error("hash accumulator already bound")]
    AlreadyBound,
    /// No hash accumulator is bound to this sketch.
    #[error("no hash accumulator bound")]
    UnboundHash,
    /// The hash accumulator failed to accept observation bytes.
    #[error("hash accumulator write failed")]
    Hash(#[from] io::Error),
}
