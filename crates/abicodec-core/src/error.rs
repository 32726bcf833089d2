//! Error types for registration and decoding.

use thiserror::Error;

/// Errors from ABI registration. Registration is strict: registry state is
/// never partially written when one of these fires.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The supplied value was not a sequence of interface items.
    #[error("Expected ABI array, got {got}")]
    InvalidInput { got: String },

    /// An entry inside the array did not parse as an ABI item.
    #[error("ABI item parse error: {0}")]
    ParseError(String),

    #[error("ABI JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors that can occur while decoding calldata or a log entry.
///
/// Lookup misses (unknown namespace, unknown selector, empty topics) are
/// not errors; decoders return `Ok(None)` for those. These variants cover
/// payloads that matched an item but could not be decoded against it.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid hex in {what}: {reason}")]
    InvalidHex { what: &'static str, reason: String },

    #[error("unsupported parameter type '{ty}': {reason}")]
    UnsupportedType { ty: String, reason: String },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },
}
