//! # abicodec-evm
//!
//! Calldata and event-log decoders over an [`AbiRegistry`].
//!
//! ## Implementation notes
//! - Uses `alloy-core`'s dyn-abi module for ABI word decoding
//! - Calldata: first 4 bytes = keccak256(signature)[..4] (the selector)
//! - topics[0] → event selector (full 32-byte keccak256)
//! - topics[1..] → indexed parameters, carried as raw topic words
//! - `data` → non-indexed parameters (ABI-encoded tuple)
//!
//! [`AbiRegistry`]: abicodec_registry::AbiRegistry

pub mod calldata;
pub mod log;
pub mod normalizer;

pub use calldata::CallDecoder;
pub use log::LogDecoder;
