//! Cache Group Module
//!
//! A named cache namespace that loads missing keys from its data source.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{ByteView, CacheStats, CacheStore};
use crate::error::{CacheError, Result};
use crate::group::{GroupRegistry, Loader};

// == Group ==
/// A cache-aside namespace: a [`CacheStore`] plus the [`Loader`] behind it.
pub struct Group {
    name: String,
    loader: Box<dyn Loader>,
    main_cache: CacheStore,
}

impl Group {
    // == Constructor ==
    /// Creates an unregistered group.
    ///
    /// # Arguments
    /// * `name` - Group name, used as the registry key
    /// * `cache_bytes` - Byte budget for this group's cache (0 = unbounded)
    /// * `loader` - Data source consulted on a miss
    pub fn new(name: impl Into<String>, cache_bytes: usize, loader: impl Loader + 'static) -> Self {
        Self::with_boxed_loader(name.into(), cache_bytes, Box::new(loader))
    }

    fn with_boxed_loader(name: String, cache_bytes: usize, loader: Box<dyn Loader>) -> Self {
        Self {
            name,
            loader,
            main_cache: CacheStore::new(cache_bytes),
        }
    }

    /// Starts a [`GroupBuilder`] for `name`.
    pub fn builder(name: impl Into<String>) -> GroupBuilder {
        GroupBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Get ==
    /// Returns the value for `key`, loading and caching it on a miss.
    ///
    /// Loader errors are returned unchanged and leave the cache untouched, so
    /// a later call retries the loader. A successful load may evict other keys.
    pub fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        if let Some(view) = self.main_cache.get(key) {
            debug!(group = %self.name, key, "cache hit");
            return Ok(view);
        }

        debug!(group = %self.name, key, "cache miss");
        self.load(key)
    }

    // == Stats ==
    /// Returns a snapshot of this group's statistics.
    pub fn stats(&self) -> CacheStats {
        self.main_cache.stats()
    }

    // == Load ==
    // Concurrent misses on one key each reach the loader; the last add wins.
    fn load(&self, key: &str) -> Result<ByteView> {
        self.get_locally(key)
    }

    fn get_locally(&self, key: &str) -> Result<ByteView> {
        let bytes = match self.loader.load(key) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(group = %self.name, key, error = %err, "loader failed");
                self.main_cache.record_load_failure();
                return Err(CacheError::Load(err));
            }
        };

        self.main_cache.record_load();
        let value = ByteView::new(&bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .finish_non_exhaustive()
    }
}

// == Group Builder ==
/// Builder for a [`Group`] whose loader is supplied separately.
///
/// A group without a loader cannot serve a miss, so [`GroupBuilder::build`]
/// and [`GroupBuilder::register`] panic if none was set.
pub struct GroupBuilder {
    name: String,
    cache_bytes: usize,
    loader: Option<Box<dyn Loader>>,
}

impl GroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cache_bytes: 0,
            loader: None,
        }
    }

    /// Sets the byte budget (default 0 = unbounded).
    pub fn cache_bytes(mut self, cache_bytes: usize) -> Self {
        self.cache_bytes = cache_bytes;
        self
    }

    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    // == Build ==
    /// Builds the group.
    ///
    /// # Panics
    /// Panics if no loader was set.
    pub fn build(self) -> Group {
        let Some(loader) = self.loader else {
            panic!("nil loader for group {:?}", self.name);
        };
        Group::with_boxed_loader(self.name, self.cache_bytes, loader)
    }

    /// Builds the group and registers it, replacing any group of the same name.
    ///
    /// # Panics
    /// Panics if no loader was set.
    pub fn register(self, registry: &GroupRegistry) -> Arc<Group> {
        registry.register(self.build())
    }
}
