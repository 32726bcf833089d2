//! A storage-unbounded expiring key-value store.
//!
//! Each `set` arms a cancellable one-shot Tokio timer for the key; firing
//! removes the entry without any external polling. The store is bounded by
//! time only; callers that need a size cap must impose one externally.
//!
//! One mutex guards the map, the timer handles, and the generation
//! counter together, so a `set` that lands before an entry's expiry fires
//! cancels that expiry deterministically: even if `abort()` races the
//! timer task's wakeup, the task re-checks its generation under the lock
//! and a stale wakeup can never remove a re-armed entry.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

struct Entry<V> {
    value: V,
    /// Identifies the arming this entry belongs to; a timer task only
    /// removes the entry if the generation still matches.
    generation: u64,
    timer: JoinHandle<()>,
}

struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    next_generation: u64,
}

/// Generic expiring map with a process-wide default TTL fixed at
/// construction. Cloning shares the underlying storage, like the handle
/// types elsewhere in this workspace.
///
/// `set` spawns the expiry task, so it must be called from within a Tokio
/// runtime context.
pub struct TtlStore<K, V> {
    inner: Arc<Mutex<Inner<K, V>>>,
    default_ttl: Duration,
}

impl<K, V> Clone for TtlStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            default_ttl: self.default_ttl,
        }
    }
}

impl<K, V> TtlStore<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Send + 'static,
{
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                next_generation: 0,
            })),
            default_ttl,
        }
    }

    /// The TTL applied by [`set`](Self::set).
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Inserts `value` under `key` with the default TTL.
    pub fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Inserts `value` under `key`, expiring after `ttl`.
    ///
    /// Overwriting an existing key cancels its outstanding expiry and arms
    /// a fresh one from `ttl`; the previous value is replaced, not merged.
    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let mut inner = self.inner.lock().unwrap();
        let generation = inner.next_generation;
        inner.next_generation += 1;

        let timer = spawn_expiry(Arc::downgrade(&self.inner), key.clone(), generation, ttl);
        if let Some(prev) = inner.entries.insert(key, Entry { value, generation, timer }) {
            prev.timer.abort();
        }
    }

    /// Returns a clone of the live value for `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        self.inner.lock().unwrap().entries.get(key).map(|e| e.value.clone())
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.inner.lock().unwrap().entries.contains_key(key)
    }

    /// Removes `key`, cancelling its pending expiry. Returns whether the
    /// key was present.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.inner.lock().unwrap().entries.remove(key) {
            Some(entry) => {
                entry.timer.abort();
                true
            }
            None => false,
        }
    }

    /// Removes every entry and cancels every pending expiry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        for (_, entry) in inner.entries.drain() {
            entry.timer.abort();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn spawn_expiry<K, V>(
    inner: Weak<Mutex<Inner<K, V>>>,
    key: K,
    generation: u64,
    ttl: Duration,
) -> JoinHandle<()>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        // The store may have been dropped entirely while we slept.
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let mut inner = inner.lock().unwrap();
        // The key may have been removed or re-armed while we slept.
        if inner
            .entries
            .get(&key)
            .is_some_and(|e| e.generation == generation)
        {
            inner.entries.remove(&key);
            trace!(generation, "entry expired");
        }
    })
}
