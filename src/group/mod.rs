//! Group Module
//!
//! Named cache-aside groups and the registry that resolves them by name.

mod cache_group;
mod loader;
mod registry;

pub use cache_group::{Group, GroupBuilder};
pub use loader::Loader;
pub use registry::GroupRegistry;
