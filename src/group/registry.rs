//! Group Registry Module
//!
//! Name-to-group lookup shared by whoever owns group lifecycles.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::group::{Group, Loader};

// == Group Registry ==
/// Registry of groups by name, guarded by a single read/write lock.
///
/// Registering a name that already exists replaces the earlier group; callers
/// still holding the old `Arc<Group>` keep a working but unregistered group.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // == New Group ==
    /// Creates a group and registers it under `name`.
    pub fn new_group(
        &self,
        name: impl Into<String>,
        cache_bytes: usize,
        loader: impl Loader + 'static,
    ) -> Arc<Group> {
        self.register(Group::new(name, cache_bytes, loader))
    }

    // == Register ==
    /// Registers an already-built group, replacing any group of the same name.
    pub fn register(&self, group: Group) -> Arc<Group> {
        let group = Arc::new(group);
        let name = group.name().to_string();

        let previous = self.groups.write().insert(name.clone(), Arc::clone(&group));
        if previous.is_some() {
            warn!(group = %name, "replaced existing group registration");
        } else {
            info!(group = %name, max_bytes = group.stats().max_bytes, "registered group");
        }
        group
    }

    // == Lookup ==
    /// Returns the group registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Returns the registered group names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}
