//! Event-log decoding: topic lookup, indexed/data interleave,
//! normalization.

use abicodec_core::{canonical_type, DecodeError, DecodedLog, DecodedParam, ParamValue, RawLog};
use abicodec_registry::AbiRegistry;
use tracing::debug;

use crate::normalizer::{decode_words, normalize_log_value, parse_type, value_to_param};

/// Decodes event log entries by 32-byte topic selector lookup.
///
/// Cheap to clone; clones share the underlying registry.
#[derive(Clone)]
pub struct LogDecoder {
    registry: AbiRegistry,
}

impl LogDecoder {
    pub fn new(registry: AbiRegistry) -> Self {
        Self { registry }
    }

    /// The registry this decoder resolves topic selectors against.
    pub fn registry(&self) -> &AbiRegistry {
        &self.registry
    }

    /// Decode one log entry under namespace `key`.
    ///
    /// Returns `Ok(None)` when the namespace is unknown/expired, the log
    /// has no topics, or `topics[0]` is not indexed.
    pub fn decode_log_item(
        &self,
        key: &str,
        log: &RawLog,
    ) -> Result<Option<DecodedLog>, DecodeError> {
        let Some(topic0) = log.event_topic() else {
            return Ok(None);
        };
        let selector = topic0.strip_prefix("0x").unwrap_or(topic0);
        let Some(event) = self.registry.lookup_selector(key, selector) else {
            debug!(key, selector, "event selector not indexed");
            return Ok(None);
        };

        // Non-indexed inputs decode from the data payload as one tuple.
        let data_types = event
            .inputs
            .iter()
            .filter(|p| !p.indexed)
            .map(|p| parse_type(&canonical_type(p)))
            .collect::<Result<Vec<_>, _>>()?;
        let data_hex = log.data.strip_prefix("0x").unwrap_or(&log.data);
        let data_bytes = hex::decode(data_hex).map_err(|e| DecodeError::InvalidHex {
            what: "log data",
            reason: e.to_string(),
        })?;
        let mut data_values = decode_words(data_types, &data_bytes)?.into_iter();

        // Interleave over the declaration order: indexed inputs consume
        // topics from index 1 (the raw 32-byte word is the value; for
        // reference types the chain only retains its hash), the rest
        // consume the decoded data values.
        let mut topics = log.topics.iter().skip(1);
        let mut events = Vec::with_capacity(event.inputs.len());
        for input in &event.inputs {
            let value = if input.indexed {
                match topics.next() {
                    Some(topic) => ParamValue::Str(topic.clone()),
                    None => {
                        return Err(DecodeError::AbiDecodeFailed {
                            reason: format!(
                                "missing topic for indexed parameter '{}'",
                                input.name
                            ),
                        })
                    }
                }
            } else {
                match data_values.next() {
                    Some(value) => value_to_param(value),
                    None => {
                        return Err(DecodeError::AbiDecodeFailed {
                            reason: format!("missing data value for parameter '{}'", input.name),
                        })
                    }
                }
            };

            events.push(DecodedParam {
                name: input.name.clone(),
                ty: input.ty.clone(),
                value: normalize_log_value(&input.ty, value),
            });
        }

        Ok(Some(DecodedLog {
            name: event.indexable_name().unwrap_or_default().to_string(),
            events,
            address: log.address.clone(),
        }))
    }

    /// Maps [`decode_log_item`](Self::decode_log_item) over `logs`,
    /// dropping misses. Returns `Ok(None)` instead of an empty sequence
    /// when nothing matched.
    pub fn decode_logs(
        &self,
        key: &str,
        logs: &[RawLog],
    ) -> Result<Option<Vec<DecodedLog>>, DecodeError> {
        let mut decoded = Vec::new();
        for log in logs {
            if let Some(item) = self.decode_log_item(key, log)? {
                decoded.push(item);
            }
        }
        Ok(if decoded.is_empty() { None } else { Some(decoded) })
    }
}
