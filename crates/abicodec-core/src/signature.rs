//! Canonical signature and selector computation.
//!
//! The selector of an ABI item is the keccak256 hash of its canonical
//! signature string, e.g.:
//!   keccak256("transfer(address,uint256)")[..4] → a9059cbb
//!   keccak256("Transfer(address,address,uint256)")
//!   → 0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef
//!
//! Events keep the full 32-byte hash (their log topic); function-like
//! items keep the first 4 bytes. Selectors are hex without a `0x` prefix
//! so they can be sliced straight out of calldata and topic strings.

use crate::abi::{AbiItem, AbiItemKind, AbiParam};
use tiny_keccak::{Hasher, Keccak};

/// Compute the keccak256 digest of a byte string.
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(bytes);
    hasher.finalize(&mut output);
    output
}

/// Canonical textual form of a parameter type, as used in signature hashing.
///
/// Tuples flatten to their parenthesized component list; the array-bracket
/// suffix after the literal `tuple` prefix is carried over verbatim, so
/// `tuple[2][3]` becomes `(...)[2][3]`. Non-tuple types pass through
/// unchanged. Recursion depth equals tuple nesting depth.
pub fn canonical_type(param: &AbiParam) -> String {
    if param.is_tuple() {
        let inner: Vec<String> = param.components.iter().map(canonical_type).collect();
        format!("({}){}", inner.join(","), &param.ty[5..])
    } else {
        param.ty.clone()
    }
}

/// Canonical signature `name(type1,type2,...)`, or `None` for unnamed items.
pub fn signature(item: &AbiItem) -> Option<String> {
    let name = item.indexable_name()?;
    let types: Vec<String> = item.inputs.iter().map(canonical_type).collect();
    Some(format!("{}({})", name, types.join(",")))
}

/// Hex selector of an ABI item: 64 chars for events, 8 for everything
/// else. Unnamed items return `None` and are skipped by the registry
/// index, not treated as errors.
pub fn selector(item: &AbiItem) -> Option<String> {
    let sig = signature(item)?;
    let hash = hex::encode(keccak256(sig.as_bytes()));
    match item.kind {
        AbiItemKind::Event => Some(hash),
        _ => Some(hash[..8].to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple_param(ty: &str, components: Vec<AbiParam>) -> AbiParam {
        AbiParam {
            name: "p".into(),
            ty: ty.into(),
            components,
            indexed: false,
        }
    }

    #[test]
    fn canonical_type_passthrough() {
        assert_eq!(canonical_type(&AbiParam::new("x", "uint256")), "uint256");
        assert_eq!(canonical_type(&AbiParam::new("x", "address[]")), "address[]");
    }

    #[test]
    fn canonical_type_tuple() {
        let p = tuple_param(
            "tuple",
            vec![AbiParam::new("a", "uint256"), AbiParam::new("b", "address")],
        );
        assert_eq!(canonical_type(&p), "(uint256,address)");
    }

    #[test]
    fn canonical_type_tuple_array() {
        let p = tuple_param(
            "tuple[]",
            vec![AbiParam::new("a", "uint256"), AbiParam::new("b", "address")],
        );
        assert_eq!(canonical_type(&p), "(uint256,address)[]");
    }

    #[test]
    fn canonical_type_nested_tuple() {
        let inner = tuple_param("tuple", vec![AbiParam::new("x", "bool")]);
        let outer = tuple_param("tuple[2][3]", vec![AbiParam::new("a", "uint8"), inner]);
        assert_eq!(canonical_type(&outer), "(uint8,(bool))[2][3]");
    }

    #[test]
    fn canonical_type_empty_tuple() {
        assert_eq!(canonical_type(&tuple_param("tuple", vec![])), "()");
    }

    #[test]
    fn erc20_transfer_function_selector() {
        let item = AbiItem::function(
            "transfer",
            vec![AbiParam::new("to", "address"), AbiParam::new("amount", "uint256")],
        );
        assert_eq!(signature(&item).unwrap(), "transfer(address,uint256)");
        assert_eq!(selector(&item).unwrap(), "a9059cbb");
    }

    #[test]
    fn erc20_transfer_event_selector() {
        let item = AbiItem::event(
            "Transfer",
            vec![
                AbiParam::new("from", "address").indexed(),
                AbiParam::new("to", "address").indexed(),
                AbiParam::new("value", "uint256"),
            ],
        );
        let sel = selector(&item).unwrap();
        assert_eq!(sel.len(), 64);
        assert_eq!(
            sel,
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn uniswap_v3_swap_event_selector() {
        let item = AbiItem::event(
            "Swap",
            vec![
                AbiParam::new("sender", "address").indexed(),
                AbiParam::new("recipient", "address").indexed(),
                AbiParam::new("amount0", "int256"),
                AbiParam::new("amount1", "int256"),
                AbiParam::new("sqrtPriceX96", "uint160"),
                AbiParam::new("liquidity", "uint128"),
                AbiParam::new("tick", "int24"),
            ],
        );
        assert_eq!(
            selector(&item).unwrap(),
            "c42079f94a6350d7e6235f29174924f928cc2ac818eb64fed8004e115fbcca67"
        );
    }

    #[test]
    fn function_selector_is_8_chars() {
        let item = AbiItem::function("balanceOf", vec![AbiParam::new("owner", "address")]);
        assert_eq!(selector(&item).unwrap().len(), 8);
    }

    #[test]
    fn unnamed_items_are_skipped() {
        let ctor = AbiItem {
            kind: AbiItemKind::Constructor,
            name: None,
            inputs: vec![AbiParam::new("owner", "address")],
        };
        assert!(selector(&ctor).is_none());
    }

    #[test]
    fn tuple_signature_hashes() {
        // swap((uint256,address)): tuple input flattens before hashing
        let item = AbiItem::function(
            "swap",
            vec![tuple_param(
                "tuple",
                vec![AbiParam::new("amount", "uint256"), AbiParam::new("to", "address")],
            )],
        );
        assert_eq!(signature(&item).unwrap(), "swap((uint256,address))");
        assert_eq!(selector(&item).unwrap().len(), 8);
    }
}
