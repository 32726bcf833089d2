//! Converts alloy `DynSolValue` → textual `ParamValue`, plus the
//! per-decoder normalization rules.
//!
//! The calldata and log paths normalize differently: the calldata path
//! matches any `uint*`/`int*`/`address*` prefix, while the log path
//! handles exactly `address`, `uint256`, `uint8`, and `int`, and repairs
//! left-padded topic addresses. Changing either rule set changes decoded
//! output for existing consumers, so both are stable API.

use abicodec_core::{DecodeError, ParamValue};
use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::U256;

/// Parse a canonical type string into an alloy `DynSolType`.
pub(crate) fn parse_type(canonical: &str) -> Result<DynSolType, DecodeError> {
    canonical
        .parse::<DynSolType>()
        .map_err(|e| DecodeError::UnsupportedType {
            ty: canonical.to_string(),
            reason: e.to_string(),
        })
}

/// ABI-decode `data` as the tuple of `types`, returning positional values.
pub(crate) fn decode_words(
    types: Vec<DynSolType>,
    data: &[u8],
) -> Result<Vec<DynSolValue>, DecodeError> {
    if types.is_empty() {
        return Ok(Vec::new());
    }

    let tuple = DynSolType::Tuple(types);
    let decoded = tuple
        .abi_decode(data)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            reason: e.to_string(),
        })?;

    Ok(match decoded {
        DynSolValue::Tuple(values) => values,
        other => vec![other],
    })
}

/// Render a decoded value into the textual output model: decimal for
/// integers, `0x`-hex for addresses and byte blobs, nested arrays for
/// arrays and tuples.
pub fn value_to_param(value: DynSolValue) -> ParamValue {
    match value {
        DynSolValue::Bool(b) => ParamValue::Str(b.to_string()),
        DynSolValue::Int(i, _) => ParamValue::Str(i.to_string()),
        DynSolValue::Uint(u, _) => ParamValue::Str(u.to_string()),
        DynSolValue::Address(a) => ParamValue::Str(format!("0x{}", hex::encode(a.as_slice()))),
        DynSolValue::FixedBytes(word, size) => {
            ParamValue::Str(format!("0x{}", hex::encode(&word.as_slice()[..size.min(32)])))
        }
        DynSolValue::Bytes(b) => ParamValue::Str(format!("0x{}", hex::encode(b))),
        DynSolValue::String(s) => ParamValue::Str(s),
        DynSolValue::Function(f) => ParamValue::Str(format!("0x{}", hex::encode(f.to_vec()))),
        DynSolValue::Array(values)
        | DynSolValue::FixedArray(values)
        | DynSolValue::Tuple(values) => {
            ParamValue::Array(values.into_iter().map(value_to_param).collect())
        }
    }
}

/// Convert to an arbitrary-precision base-10 decimal string. `0x`-prefixed
/// strings parse as unsigned base-16; anything else is taken as already
/// decimal. Unparseable input passes through unchanged.
pub fn to_decimal_string(s: &str) -> String {
    match s.strip_prefix("0x") {
        Some(digits) => U256::from_str_radix(digits, 16)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| s.to_string()),
        None => s.to_string(),
    }
}

/// Calldata-path normalization for one decoded position, applied
/// element-wise over array values.
pub fn normalize_call_value(ty: &str, value: ParamValue) -> ParamValue {
    if ty.starts_with("uint") || ty.starts_with("int") {
        map_strings(value, |s| to_decimal_string(&s))
    } else if ty.starts_with("address") {
        map_strings(value, |s| s.to_lowercase())
    } else {
        value
    }
}

/// Log-path normalization for one assembled value.
pub fn normalize_log_value(ty: &str, value: ParamValue) -> ParamValue {
    if ty == "address" {
        return map_strings(value, |s| truncate_padded_address(&s));
    }
    if matches!(ty, "uint256" | "uint8" | "int") {
        return map_strings(value, |s| to_decimal_string(&s));
    }
    value
}

/// Lowercase an address string and, when it is longer than the 42 chars of
/// `0x` + 40 hex digits, drop the excess immediately after the prefix.
/// Repairs 20-byte addresses that arrived left-padded in a 32-byte topic.
fn truncate_padded_address(s: &str) -> String {
    let mut out = s.to_lowercase();
    if out.len() > 42 {
        let excess = out.len() - 42;
        out.replace_range(2..2 + excess, "");
    }
    out
}

fn map_strings<F>(value: ParamValue, f: F) -> ParamValue
where
    F: Fn(String) -> String + Copy,
{
    match value {
        ParamValue::Str(s) => ParamValue::Str(f(s)),
        ParamValue::Array(values) => {
            ParamValue::Array(values.into_iter().map(|v| map_strings(v, f)).collect())
        }
    }
}
