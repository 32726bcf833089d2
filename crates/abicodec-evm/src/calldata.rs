//! Function-call calldata decoding against a namespace's selector index.

use abicodec_core::{canonical_type, DecodeError, DecodedCall, DecodedParam};
use abicodec_registry::AbiRegistry;
use tracing::debug;

use crate::normalizer::{decode_words, normalize_call_value, parse_type, value_to_param};

/// Decodes transaction calldata by 4-byte selector lookup.
///
/// Cheap to clone; clones share the underlying registry.
#[derive(Clone)]
pub struct CallDecoder {
    registry: AbiRegistry,
}

impl CallDecoder {
    pub fn new(registry: AbiRegistry) -> Self {
        Self { registry }
    }

    /// The registry this decoder resolves selectors against.
    pub fn registry(&self) -> &AbiRegistry {
        &self.registry
    }

    /// Decode `0x`-prefixed calldata under namespace `key`.
    ///
    /// Returns `Ok(None)` when the namespace is unknown/expired or the
    /// selector is not indexed (a routine miss, not a failure). A payload
    /// that matches an item but does not decode against its inputs is an
    /// error.
    pub fn decode_method(
        &self,
        key: &str,
        data: &str,
    ) -> Result<Option<DecodedCall>, DecodeError> {
        // selector = the 8 hex chars after "0x"
        let Some(selector) = data.get(2..10) else {
            return Ok(None);
        };
        let Some(item) = self.registry.lookup_selector(key, selector) else {
            debug!(key, selector, "selector not indexed");
            return Ok(None);
        };

        let payload = hex::decode(&data[10..]).map_err(|e| DecodeError::InvalidHex {
            what: "calldata",
            reason: e.to_string(),
        })?;

        let types = item
            .inputs
            .iter()
            .map(|p| parse_type(&canonical_type(p)))
            .collect::<Result<Vec<_>, _>>()?;
        let values = decode_words(types, &payload)?;

        let params = item
            .inputs
            .iter()
            .zip(values)
            .map(|(input, value)| DecodedParam {
                name: input.name.clone(),
                ty: input.ty.clone(),
                value: normalize_call_value(&input.ty, value_to_param(value)),
            })
            .collect();

        Ok(Some(DecodedCall {
            name: item.indexable_name().unwrap_or_default().to_string(),
            params,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abicodec_core::{selector, AbiItem, AbiParam, ParamValue};

    // transfer(0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045, 1000000)
    const TRANSFER_CALLDATA: &str = concat!(
        "0xa9059cbb",
        "000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
        "00000000000000000000000000000000000000000000000000000000000f4240",
    );

    fn transfer_item() -> AbiItem {
        AbiItem::function(
            "transfer",
            vec![AbiParam::new("to", "address"), AbiParam::new("amount", "uint256")],
        )
    }

    fn registry_with(key: &str, items: Vec<AbiItem>) -> AbiRegistry {
        let reg = AbiRegistry::new();
        reg.add_abi(key, items);
        reg
    }

    #[tokio::test(start_paused = true)]
    async fn decodes_erc20_transfer() {
        let decoder = CallDecoder::new(registry_with("0xC0FFEE", vec![transfer_item()]));
        let call = decoder
            .decode_method("0xC0FFEE", TRANSFER_CALLDATA)
            .unwrap()
            .expect("selector should resolve");

        assert_eq!(call.name, "transfer");
        assert_eq!(call.params.len(), 2);
        assert_eq!(call.params[0].name, "to");
        assert_eq!(call.params[0].ty, "address");
        assert_eq!(
            call.params[0].value,
            ParamValue::Str("0xd8da6bf26964af9d7eed9e03e53415d37aa96045".into())
        );
        assert_eq!(call.params[1].name, "amount");
        assert_eq!(call.params[1].value, ParamValue::Str("1000000".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_selector_is_a_miss() {
        let decoder = CallDecoder::new(registry_with("k", vec![transfer_item()]));
        let result = decoder.decode_method("k", "0xdeadbeef").unwrap();
        assert!(result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_namespace_is_a_miss() {
        let decoder = CallDecoder::new(AbiRegistry::new());
        assert!(decoder.decode_method("nope", TRANSFER_CALLDATA).unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn short_data_is_a_miss() {
        let decoder = CallDecoder::new(registry_with("k", vec![transfer_item()]));
        assert!(decoder.decode_method("k", "0xa905").unwrap().is_none());
        assert!(decoder.decode_method("k", "").unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn truncated_payload_is_an_error() {
        let decoder = CallDecoder::new(registry_with("k", vec![transfer_item()]));
        let result = decoder.decode_method("k", &TRANSFER_CALLDATA[..30]);
        assert!(matches!(result, Err(DecodeError::AbiDecodeFailed { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_hex_is_an_error() {
        let decoder = CallDecoder::new(registry_with("k", vec![transfer_item()]));
        let data = format!("0xa9059cbb{}", "zz".repeat(64));
        let result = decoder.decode_method("k", &data);
        assert!(matches!(result, Err(DecodeError::InvalidHex { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn array_params_normalize_element_wise() {
        let item = AbiItem::function(
            "batch",
            vec![
                AbiParam::new("recipients", "address[]"),
                AbiParam::new("amounts", "uint256[]"),
            ],
        );
        let sel = selector(&item).unwrap();
        let reg = registry_with("k", vec![item]);

        // (address[2 elems], uint256[2 elems]): heads are two offsets,
        // tails are len-prefixed element runs.
        let data = format!(
            "0x{sel}{}{}{}{}{}{}{}{}",
            "0000000000000000000000000000000000000000000000000000000000000040",
            "00000000000000000000000000000000000000000000000000000000000000a0",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
            "000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "000000000000000000000000000000000000000000000000000000000000006f",
            "00000000000000000000000000000000000000000000000000000000000000de",
        );

        let call = CallDecoder::new(reg).decode_method("k", &data).unwrap().unwrap();
        assert_eq!(
            call.params[0].value,
            ParamValue::Array(vec![
                ParamValue::Str("0xd8da6bf26964af9d7eed9e03e53415d37aa96045".into()),
                ParamValue::Str("0xab5801a7d398351b8be11c439e05c5b3259aec9b".into()),
            ])
        );
        assert_eq!(
            call.params[1].value,
            ParamValue::Array(vec![
                ParamValue::Str("111".into()),
                ParamValue::Str("222".into()),
            ])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn tuple_params_decode_as_nested_values() {
        let order = AbiParam {
            name: "order".into(),
            ty: "tuple".into(),
            components: vec![
                AbiParam::new("maker", "address"),
                AbiParam::new("amount", "uint256"),
            ],
            indexed: false,
        };
        let item = AbiItem::function("fill", vec![order]);
        let sel = selector(&item).unwrap();
        let reg = registry_with("k", vec![item]);

        let data = format!(
            "0x{sel}{}{}",
            "000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
            "00000000000000000000000000000000000000000000000000000000000f4240",
        );

        let call = CallDecoder::new(reg).decode_method("k", &data).unwrap().unwrap();
        assert_eq!(call.params[0].ty, "tuple");
        // tuple members keep their raw rendering; the declared type
        // "tuple" matches neither numeric nor address prefixes
        assert_eq!(
            call.params[0].value,
            ParamValue::Array(vec![
                ParamValue::Str("0xd8da6bf26964af9d7eed9e03e53415d37aa96045".into()),
                ParamValue::Str("1000000".into()),
            ])
        );
    }
}
