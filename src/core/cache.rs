use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Entries kept before a memo starts over.
pub const DEFAULT_MEMO_LIMIT: usize = 1024;

/// Memoises the results of a pure function, keyed by its inputs.
///
/// Single-threaded: interior mutability through `RefCell`, no locking.
/// Once `limit` distinct keys are stored the memo is cleared before the
/// next insert, so keys typed by a user cannot grow it without bound.
pub struct Memo<K, V> {
    entries: RefCell<HashMap<K, V>>,
    limit: usize,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MEMO_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            limit: limit.max(1),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.entries.borrow().get(key).cloned();
        if value.is_some() {
            debug!("Cache HIT");
        } else {
            debug!("Cache MISS");
        }
        value
    }

    pub fn put(&self, key: K, value: V) {
        let mut entries = self.entries.borrow_mut();
        if entries.len() >= self.limit && !entries.contains_key(&key) {
            debug!(limit = self.limit, "Cache full, clearing");
            entries.clear();
        }
        debug!("Cache PUT");
        entries.insert(key, value);
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.put(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for Memo<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
