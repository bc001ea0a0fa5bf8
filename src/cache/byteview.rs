//! Byte View Module
//!
//! Defines the immutable value handle handed out by the cache.

use std::fmt;

use bytes::Bytes;

use crate::cache::Value;

// == Byte View ==
/// An immutable, owned view over a cached byte buffer.
///
/// Bytes are copied in on construction and copied out by [`ByteView::byte_slice`],
/// so neither the caller nor the cache can mutate the other's data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteView {
    /// The stored bytes
    b: Bytes,
}

impl ByteView {
    // == Constructor ==
    /// Creates a view holding a private copy of `data`.
    pub fn new(data: &[u8]) -> Self {
        Self {
            b: Bytes::copy_from_slice(data),
        }
    }

    // == Length ==
    /// Returns the number of bytes held by the view.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    /// Returns true if the view holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    // == Byte Slice ==
    /// Returns a fresh copy of the bytes that the caller is free to mutate.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Borrows the bytes read-only.
    pub fn as_slice(&self) -> &[u8] {
        &self.b
    }
}

impl Value for ByteView {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl From<&[u8]> for ByteView {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl From<&str> for ByteView {
    fn from(data: &str) -> Self {
        Self::new(data.as_bytes())
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.b))
    }
}
