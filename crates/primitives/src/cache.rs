//! Lazily computed, write-once values
//!
//! Nodes compute their content address on first request and keep it; this
//! module provides the cell they keep it in.

use std::sync::OnceLock;

/// Write-once cache for a value derived from immutable data.
///
/// Cloning a filled cache clones the value; cloning an empty one yields an
/// empty cache. The cache never participates in equality of the owning type.
#[derive(Debug)]
pub struct OnceCache<T> {
    value: OnceLock<T>,
}

impl<T> OnceCache<T> {
    /// Create a new empty cache
    pub const fn new() -> Self {
        Self {
            value: OnceLock::new(),
        }
    }

    /// Create a cache that already holds `value`
    pub fn with_value(value: T) -> Self {
        let cache = Self::new();
        // a fresh cell is always empty
        let _ = cache.value.set(value);
        cache
    }

    /// Get the cached value if it exists
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// Get the cached value, computing it if necessary
    pub fn get_or_compute<F>(&self, compute_fn: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.value.get_or_init(compute_fn)
    }
}

impl<T> Default for OnceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OnceCache<T> {
    fn clone(&self) -> Self {
        match self.value.get() {
            Some(value) => Self::with_value(value.clone()),
            None => Self::new(),
        }
    }
}
