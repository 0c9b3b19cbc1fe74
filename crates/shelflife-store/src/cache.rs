//! # Product Query Cache
//!
//! Explicit cache object for the product list, shared between the service
//! and the caller surface.
//!
//! ## Consistency Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Cache Reconciliation                                  │
//! │                                                                         │
//! │  fetch_all success ──────► set(PRODUCTS_KEY, list)                     │
//! │                                                                         │
//! │  add success ────────────► invalidate(PRODUCTS_KEY)                    │
//! │                            (next read refetches and sees the new row)  │
//! │                                                                         │
//! │  delete success ─────────► patch_remove(PRODUCTS_KEY, id)              │
//! │                            (cached list filtered in place, no refetch) │
//! │                                                                         │
//! │  Read-after-write: a read after a successful delete sees the patched   │
//! │  list immediately; a read after a successful add refetches remotely.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Locks are held only across synchronous map operations, never across an
//! await point.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use shelflife_core::Product;

/// The fixed key the product list is cached under.
pub const PRODUCTS_KEY: &str = "products";

/// Shared product query cache.
///
/// Cloning is cheap; clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct ProductCache {
    inner: Arc<RwLock<HashMap<String, Vec<Product>>>>,
}

impl ProductCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        ProductCache::default()
    }

    /// Returns the cached value for `key`, if any.
    pub async fn get(&self, key: &str) -> Option<Vec<Product>> {
        self.inner.read().await.get(key).cloned()
    }

    /// Stores `products` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, products: Vec<Product>) {
        self.inner.write().await.insert(key.to_string(), products);
    }

    /// Drops the cached value for `key`. The next read must refetch.
    pub async fn invalidate(&self, key: &str) {
        self.inner.write().await.remove(key);
    }

    /// Filters the product with `id` out of the cached list, if one is
    /// cached. A missing entry is left missing - patching never fabricates
    /// a list.
    pub async fn patch_remove(&self, key: &str, id: &str) {
        let mut guard = self.inner.write().await;
        if let Some(products) = guard.get_mut(key) {
            products.retain(|product| product.id != id);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
