//! # abicodec-core
//!
//! Shared types and primitives for AbiCodec: ABI interface items, decoded
//! output records, canonical signature / selector computation, and the
//! error enums used by the registry and decoder crates.

pub mod abi;
pub mod error;
pub mod signature;
pub mod types;

pub use abi::{AbiItem, AbiItemKind, AbiParam};
pub use error::{DecodeError, RegistryError};
pub use signature::{canonical_type, keccak256, selector, signature};
pub use types::{DecodedCall, DecodedLog, DecodedParam, ParamValue, RawLog};
