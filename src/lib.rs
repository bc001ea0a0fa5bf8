//! Mini Groupcache - A byte-bounded cache with cache-aside groups
//!
//! Provides an LRU cache bounded by accounted bytes, named groups that load
//! missing keys from a caller-supplied source, and an HTTP relay serving
//! `<base-path>/<group>/<key>`.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod models;

pub use api::AppState;
pub use cache::ByteView;
pub use config::Config;
pub use error::CacheError;
pub use group::{Group, GroupBuilder, GroupRegistry, Loader};
