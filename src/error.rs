//! Decoder error and result types.
//!
//! A plain enum with hand-written `Display` and `std::error::Error` impls,
//! no `thiserror`. This is the single error currency of the library — every
//! fallible read or decode step in this crate returns
//! `Result<T, DecodeError>`.

use std::fmt;

/// Everything that can go wrong while decoding a Brotli stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The bit reader needed another byte but the input was exhausted.
    PrematureEof,
    /// The stream violates a structural rule of the format. `detail` is an
    /// informational string only — callers must not match on it.
    Invalid(String),
    /// Compare mode detected a divergence from the caller-supplied expected
    /// buffer. `got` is the number of bytes produced before the mismatch.
    CompareMismatch { got: usize },
}

impl DecodeError {
    /// Shorthand for `Invalid(detail.into())`.
    pub fn invalid(detail: impl Into<String>) -> Self {
        DecodeError::Invalid(detail.into())
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::PrematureEof => write!(f, "premature end of input"),
            DecodeError::Invalid(detail) => write!(f, "invalid stream: {detail}"),
            DecodeError::CompareMismatch { got } => {
                write!(f, "output diverged from expected buffer after {got} bytes")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl DecodeError {
    /// Process exit code for this error kind. Distinct per kind so scripts
    /// driving the CLI can distinguish a truncated file from malformed input
    /// without scraping text.
    pub fn exit_code(&self) -> i32 {
        match self {
            DecodeError::PrematureEof => 3,
            DecodeError::Invalid(_) => 4,
            DecodeError::CompareMismatch { .. } => 5,
        }
    }
}

/// Result alias used throughout the library.
pub type DecodeResult<T> = Result<T, DecodeError>;
