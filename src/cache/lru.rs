//! LRU Cache Module
//!
//! Byte-bounded key/value store with least-recently-used eviction.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::cache::UNBOUNDED;

// == Value Trait ==
/// A value whose size counts against the cache's byte budget.
pub trait Value {
    /// Number of bytes this value is accounted for.
    fn byte_len(&self) -> usize;
}

impl Value for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

/// Callback invoked with each entry removed by eviction.
pub type EvictionListener<V> = Box<dyn FnMut(&str, &V) + Send>;

// == Node ==
/// A slot in the recency list.
struct Node<V> {
    key: String,
    value: V,
    /// Neighbour towards the most recently used end
    prev: Option<usize>,
    /// Neighbour towards the least recently used end
    next: Option<usize>,
}

// == LRU Cache ==
/// Byte-bounded LRU store.
///
/// Entries live in a slab (`nodes`) threaded into a doubly-linked list:
/// - `head` = Most recently used
/// - `tail` = Least recently used
///
/// `index` maps each key to its slot, so lookup, promotion and eviction are O(1).
/// Every entry is accounted as `key.len() + value.byte_len()` bytes.
pub struct LruCache<V: Value> {
    /// Byte budget, 0 = unbounded
    max_bytes: usize,
    /// Accounted bytes of all live entries
    used_bytes: usize,
    nodes: Vec<Node<V>>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
    on_evicted: Option<EvictionListener<V>>,
}

impl<V: Value> LruCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_bytes` - Byte budget; `0` disables eviction entirely
    /// * `on_evicted` - Optional listener called after each eviction
    pub fn new(max_bytes: usize, on_evicted: Option<EvictionListener<V>>) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            nodes: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            on_evicted,
        }
    }

    // == Get ==
    /// Looks up a key and marks it as most recently used.
    ///
    /// A miss has no side effects.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_front(idx);
        Some(&self.nodes[idx].value)
    }

    // == Add ==
    /// Inserts or replaces a value, then evicts until the budget holds.
    ///
    /// A new key goes in at the most recently used end. An existing key has its
    /// value replaced in place, its accounted size adjusted by the delta and is
    /// promoted. Eviction loops because one large insert can displace several
    /// small entries, including the one just inserted.
    ///
    /// Returns the number of entries evicted by this call.
    pub fn add(&mut self, key: impl Into<String>, value: V) -> usize {
        let key = key.into();

        if let Some(&idx) = self.index.get(&key) {
            self.move_to_front(idx);
            let new_len = value.byte_len();
            let old = std::mem::replace(&mut self.nodes[idx].value, value);
            self.used_bytes = self.used_bytes - old.byte_len() + new_len;
        } else {
            self.used_bytes += key.len() + value.byte_len();
            let idx = self.nodes.len();
            self.nodes.push(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.index.insert(key, idx);
            self.push_front(idx);
        }

        let mut evicted = 0;
        while self.max_bytes != UNBOUNDED && self.used_bytes > self.max_bytes {
            if self.remove_oldest().is_none() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry.
    ///
    /// The listener, if any, runs after the entry has left both the index and
    /// the recency list and its bytes have been released.
    ///
    /// Returns the evicted key, or None if the cache is empty.
    pub fn remove_oldest(&mut self) -> Option<String> {
        let idx = self.tail?;
        let node = self.detach(idx);
        self.index.remove(&node.key);
        self.used_bytes -= node.key.len() + node.value.byte_len();

        debug!(key = %node.key, used_bytes = self.used_bytes, "evicted entry");

        if let Some(listener) = self.on_evicted.as_mut() {
            listener(&node.key, &node.value);
        }
        Some(node.key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without promoting it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.tail.map(|idx| self.nodes[idx].key.as_str())
    }

    // == Contains ==
    /// Checks if a key is present without promoting it.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Keys ==
    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = &self.nodes[cursor?];
            cursor = node.next;
            Some(node.key.as_str())
        })
    }

    #[cfg(test)]
    pub(crate) fn index_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the accounted bytes of all live entries.
    pub fn bytes_used(&self) -> usize {
        self.used_bytes
    }

    /// Returns the configured byte budget (0 = unbounded).
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    // == List Plumbing ==
    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;
        match self.head {
            Some(head) => self.nodes[head].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    /// Unlinks and removes the node at `idx`, keeping the slab dense.
    ///
    /// The last slot is swapped into `idx`, so its neighbours and index entry
    /// are repointed.
    fn detach(&mut self, idx: usize) -> Node<V> {
        self.unlink(idx);
        let node = self.nodes.swap_remove(idx);

        if idx < self.nodes.len() {
            let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
            match prev {
                Some(p) => self.nodes[p].next = Some(idx),
                None => self.head = Some(idx),
            }
            match next {
                Some(n) => self.nodes[n].prev = Some(idx),
                None => self.tail = Some(idx),
            }
            if let Some(slot) = self.index.get_mut(&self.nodes[idx].key) {
                *slot = idx;
            }
        }
        node
    }
}

impl<V: Value> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.nodes.len())
            .field("has_listener", &self.on_evicted.is_some())
            .finish()
    }
}
