//! ABI interface-item types.
//!
//! These deserialize directly from standard Ethereum ABI JSON, so a
//! contract's published ABI array can be registered without any
//! intermediate conversion. Fields this crate does not use (`outputs`,
//! `stateMutability`, `anonymous`, ...) are ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One parameter of a function or event, including nested tuple components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbiParam {
    /// Parameter name (may be empty for unnamed parameters)
    #[serde(default)]
    pub name: String,
    /// Solidity type string, e.g. "uint256", "address", "tuple", "tuple[2]"
    #[serde(rename = "type")]
    pub ty: String,
    /// Tuple member definitions; non-empty only when the base type is a tuple
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
    /// EVM events: whether this parameter is stored as an indexed topic
    #[serde(default)]
    pub indexed: bool,
}

impl AbiParam {
    /// Shorthand for a plain named parameter.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: Vec::new(),
            indexed: false,
        }
    }

    /// Marks this parameter as an indexed event topic.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Returns `true` if the base type is a tuple (`tuple`, `tuple[]`, `tuple[2]`, ...).
    pub fn is_tuple(&self) -> bool {
        self.ty.starts_with("tuple")
    }
}

/// The kind tag of an ABI interface item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiItemKind {
    /// ABI JSON omits `"type"` for functions, so this is the default.
    #[default]
    Function,
    Event,
    Constructor,
    Fallback,
    /// Anything else (`receive`, `error`, future kinds).
    #[serde(other)]
    Other,
}

impl fmt::Display for AbiItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbiItemKind::Function => "function",
            AbiItemKind::Event => "event",
            AbiItemKind::Constructor => "constructor",
            AbiItemKind::Fallback => "fallback",
            AbiItemKind::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// One entry of a contract interface definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbiItem {
    #[serde(rename = "type", default)]
    pub kind: AbiItemKind,
    /// Absent for constructors and fallbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<AbiParam>,
}

impl AbiItem {
    pub fn function(name: impl Into<String>, inputs: Vec<AbiParam>) -> Self {
        Self {
            kind: AbiItemKind::Function,
            name: Some(name.into()),
            inputs,
        }
    }

    pub fn event(name: impl Into<String>, inputs: Vec<AbiParam>) -> Self {
        Self {
            kind: AbiItemKind::Event,
            name: Some(name.into()),
            inputs,
        }
    }

    /// The name used for selector indexing. Unnamed items (constructors,
    /// fallbacks) return `None` and are skipped by the selector resolver.
    pub fn indexable_name(&self) -> Option<&str> {
        match self.name.as_deref() {
            Some(n) if !n.is_empty() => Some(n),
            _ => None,
        }
    }
}
