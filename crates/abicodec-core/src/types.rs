//! Decoded-output records and the raw log input type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded parameter value.
///
/// Scalars are carried as strings in their normalized textual form
/// (decimal for integers, `0x`-hex for addresses and byte blobs). Arrays
/// and tuples nest. The `untagged` representation keeps the JSON output a
/// bare string or array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Array(Vec<ParamValue>),
}

impl ParamValue {
    /// Returns the inner string for scalar values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s.as_str()),
            ParamValue::Array(_) => None,
        }
    }

    /// Returns the element slice for array and tuple values.
    pub fn as_array(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::Str(_) => None,
            ParamValue::Array(v) => Some(v.as_slice()),
        }
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => write!(f, "{s}"),
            ParamValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// One decoded parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedParam {
    pub name: String,
    /// The declared type string of this position, verbatim from the ABI.
    #[serde(rename = "type")]
    pub ty: String,
    pub value: ParamValue,
}

/// Result of decoding a function call's calldata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedCall {
    /// Function name (e.g. "transfer")
    pub name: String,
    /// Decoded input parameters in declaration order
    pub params: Vec<DecodedParam>,
}

impl DecodedCall {
    /// Look up a decoded parameter by name.
    pub fn param(&self, name: &str) -> Option<&DecodedParam> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Result of decoding one event log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedLog {
    /// Event name (e.g. "Transfer")
    pub name: String,
    /// Decoded parameters in the event's declaration order, regardless of
    /// whether each one arrived in a topic or in the data payload.
    pub events: Vec<DecodedParam>,
    /// Contract address that emitted the log, verbatim from the input.
    pub address: String,
}

impl DecodedLog {
    /// Look up a decoded event parameter by name.
    pub fn event(&self, name: &str) -> Option<&DecodedParam> {
        self.events.iter().find(|p| p.name == name)
    }
}

/// A raw, undecoded log entry as returned by `eth_getLogs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLog {
    /// Contract address that emitted the log
    pub address: String,
    /// topics[0] is the event signature hash; the rest are indexed params.
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed parameters, hex with `0x` prefix.
    #[serde(default = "empty_hex")]
    pub data: String,
}

fn empty_hex() -> String {
    "0x".to_string()
}

impl RawLog {
    /// Returns topics[0], the event selector topic, if present.
    pub fn event_topic(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }
}
