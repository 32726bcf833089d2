//! # abicodec-registry
//!
//! Namespace-keyed ABI registry for AbiCodec.
//!
//! An [`AbiRegistry`] maps an opaque namespace key (typically a contract
//! address) to a registered interface set plus a selector index built over
//! it. Entries expire on a per-key TTL handled by the generic
//! [`TtlStore`]. Registries are explicit, constructible objects; several
//! independent ones can coexist in a single process.

pub mod registry;
pub mod store;

pub use registry::{AbiRegistry, RegistryState, DEFAULT_TTL};
pub use store::TtlStore;
