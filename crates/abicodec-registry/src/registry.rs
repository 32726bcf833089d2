//! The ABI registry: per-namespace interface sets with a selector index.

use abicodec_core::{selector, AbiItem, RegistryError};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;

use crate::store::TtlStore;

/// Default time-to-live for a registered namespace.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Per-namespace registry record: the items exactly as registered plus
/// the selector index built over them.
#[derive(Debug, Clone, Default)]
pub struct RegistryState {
    /// The ordered item sequence, preserved verbatim for retrieval.
    pub items: Vec<AbiItem>,
    /// Selector (hex, no `0x`) → item. Rebuilt wholesale on every
    /// (re-)registration, never patched incrementally. Within one
    /// registration a later item with the same selector wins.
    pub selector_index: IndexMap<String, AbiItem>,
}

impl RegistryState {
    fn build(items: Vec<AbiItem>) -> Self {
        let mut selector_index = IndexMap::new();
        for item in &items {
            if let Some(sel) = selector(item) {
                selector_index.insert(sel, item.clone());
            }
        }
        Self { items, selector_index }
    }
}

/// Thread-safe ABI registry with per-namespace TTL expiry.
///
/// Each registry owns its own [`TtlStore`], so independent registries can
/// coexist in one process (one per test case, one per chain, ...).
/// Cloning shares the underlying store.
#[derive(Clone)]
pub struct AbiRegistry {
    store: Arc<RwLock<TtlStore<String, RegistryState>>>,
}

impl AbiRegistry {
    /// A registry whose entries live for [`DEFAULT_TTL`].
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(TtlStore::new(ttl))),
        }
    }

    /// Registers `items` under `key`, replacing any prior state for that
    /// key and re-arming its expiry from the store's default TTL.
    pub fn add_abi(&self, key: &str, items: Vec<AbiItem>) {
        let state = RegistryState::build(items);
        debug!(
            key,
            items = state.items.len(),
            selectors = state.selector_index.len(),
            "registering ABI"
        );
        self.store.read().unwrap().set(key.to_string(), state);
    }

    /// Registers a raw ABI JSON array under `key`.
    ///
    /// Anything other than a JSON array is rejected with
    /// [`RegistryError::InvalidInput`] naming the received shape, before
    /// any state is written. Returns the number of items registered.
    pub fn add_abi_json(&self, key: &str, json: &str) -> Result<usize, RegistryError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Array(raw_items) = value else {
            return Err(RegistryError::InvalidInput {
                got: json_shape(&value).to_string(),
            });
        };

        let mut items = Vec::with_capacity(raw_items.len());
        for (i, raw) in raw_items.into_iter().enumerate() {
            let item: AbiItem = serde_json::from_value(raw)
                .map_err(|e| RegistryError::ParseError(format!("item {i}: {e}")))?;
            items.push(item);
        }

        let count = items.len();
        self.add_abi(key, items);
        Ok(count)
    }

    /// True iff a live (unexpired) registration exists for `key`.
    pub fn has_abi(&self, key: &str) -> bool {
        self.store.read().unwrap().contains(key)
    }

    /// The originally registered item sequence, or `None` if unknown or
    /// expired.
    pub fn get_abis(&self, key: &str) -> Option<Vec<AbiItem>> {
        self.store.read().unwrap().get(key).map(|s| s.items)
    }

    /// The selector index for `key`, or `None` if unknown or expired.
    pub fn get_method_ids(&self, key: &str) -> Option<IndexMap<String, AbiItem>> {
        self.store.read().unwrap().get(key).map(|s| s.selector_index)
    }

    /// Looks up one item by its selector within a namespace. `None` covers
    /// both an unknown/expired namespace and an unindexed selector.
    pub fn lookup_selector(&self, key: &str, sel: &str) -> Option<AbiItem> {
        self.store
            .read()
            .unwrap()
            .get(key)
            .and_then(|s| s.selector_index.get(sel).cloned())
    }

    /// Deletes the namespace's state and cancels its timer. Returns
    /// whether the key was present.
    pub fn remove_abi(&self, key: &str) -> bool {
        debug!(key, "removing ABI");
        self.store.read().unwrap().remove(key)
    }

    /// Clears every namespace and cancels all timers.
    pub fn remove_all_abis(&self) {
        debug!("removing all ABIs");
        self.store.read().unwrap().clear();
    }

    /// Number of live namespaces.
    pub fn len(&self) -> usize {
        self.store.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the backing store with a fresh one using `ttl` as the new
    /// default. TTLs are fixed at store construction, so this discards
    /// existing registrations and cancels their timers; it never rewrites
    /// already-armed deadlines in place.
    pub fn set_cache_timeout(&self, ttl: Duration) {
        debug!(ttl_ms = ttl.as_millis() as u64, "resetting registry store");
        let mut store = self.store.write().unwrap();
        store.clear();
        *store = TtlStore::new(ttl);
    }
}

impl Default for AbiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn json_shape(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
