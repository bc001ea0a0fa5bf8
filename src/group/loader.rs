//! Loader Module
//!
//! The data source a group falls back to on a cache miss.

// == Loader Trait ==
/// Fetches authoritative bytes for a key.
///
/// Called without any cache lock held. It may run more than once for the same
/// key when concurrent misses race, so repeated calls should return
/// equivalent data. Retrying is the loader's own business.
///
/// Any `Fn(&str) -> anyhow::Result<Vec<u8>>` closure is a loader.
pub trait Loader: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}
