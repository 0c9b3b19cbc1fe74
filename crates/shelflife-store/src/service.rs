//! # Product Service
//!
//! The mutation/query layer: three operations wrapping the remote store
//! adapter with error normalization and local-cache reconciliation.
//!
//! ## Operation Contracts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Product Lifecycle                                 │
//! │                                                                         │
//! │  fetch_all                                                              │
//! │    select (ordered by expired_at asc) ──► cache.set ──► caller         │
//! │                                                                         │
//! │  add_product                                                            │
//! │    [image?] upload {id}/{name} ──► public URL                          │
//! │        │ upload failure: warn + continue with no image (non-fatal)     │
//! │        ▼                                                                │
//! │    insert row ──► cache.invalidate ──► inserted row                    │
//! │        │ insert failure: fatal, surfaced to caller                     │
//! │                                                                         │
//! │  delete_product                                                         │
//! │    list {id}/ ──► remove all listed objects (one batched call)         │
//! │        │ list/remove failure: warn + continue (orphans possible)       │
//! │        ▼                                                                │
//! │    delete row ──► cache.patch_remove ──► ()                            │
//! │        │ row-delete failure: fatal, cache untouched                    │
//! │                                                                         │
//! │  Ordering guarantee: within one delete, the storage-removal attempt    │
//! │  is always issued before the row-deletion attempt.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Each mutation targets a single row/prefix; no cross-mutation coordination
//! exists or is needed. The per-id "deletion in progress" flag is advisory
//! state for callers that want to disable redundant input - it does not
//! enforce exclusion at the data layer.

use std::collections::HashSet;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{ProductCache, PRODUCTS_KEY};
use crate::error::StoreResult;
use crate::remote::{ProductRow, RemoteStore};
use shelflife_core::{image_object_path, ImagePayload, NewProduct, Product};

/// Mutation/query layer over a remote store adapter.
///
/// Inputs to `add_product` are assumed pre-validated by the caller
/// (`shelflife_core::validation`); the service performs no validation.
///
/// ## Usage
/// ```rust,ignore
/// let service = ProductService::new(HttpStore::new(config)?);
///
/// let products = service.fetch_all().await?;
/// service.delete_product(&products[0].id).await?;
/// ```
#[derive(Debug)]
pub struct ProductService<S> {
    store: S,
    cache: ProductCache,
    deleting: Mutex<HashSet<String>>,
}

impl<S: RemoteStore> ProductService<S> {
    /// Creates a service with an empty cache.
    pub fn new(store: S) -> Self {
        ProductService {
            store,
            cache: ProductCache::new(),
            deleting: Mutex::new(HashSet::new()),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fetches the full product list, ascending by `expired_at`, and caches
    /// it.
    ///
    /// A remote failure is an explicit error - an empty shelf and a failed
    /// fetch are never conflated.
    pub async fn fetch_all(&self) -> StoreResult<Vec<Product>> {
        let products = self.store.select_products().await?;

        debug!(count = products.len(), "Fetched product list");
        self.cache.set(PRODUCTS_KEY, products.clone()).await;

        Ok(products)
    }

    /// Returns the cached product list without touching the remote, if a
    /// cached list exists.
    pub async fn cached_products(&self) -> Option<Vec<Product>> {
        self.cache.get(PRODUCTS_KEY).await
    }

    /// Whether a delete for `id` is currently in flight.
    ///
    /// Advisory only: callers use it to disable redundant input while a
    /// delete runs, nothing more.
    pub async fn is_deleting(&self, id: &str) -> bool {
        self.deleting.lock().await.contains(id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product, uploading its image first if one is attached.
    ///
    /// ## Steps
    /// 1. If an image payload is present, upload it under `{id}/{file_name}`
    ///    (overwriting any object at that key) and resolve its public URL.
    /// 2. Upload failure is non-fatal: the product is created without an
    ///    image rather than aborting the whole operation.
    /// 3. Insert the row; the transient image payload itself is never
    ///    persisted. Insert failure is fatal.
    ///
    /// On success the cached list is invalidated so the next read refetches.
    pub async fn add_product(&self, input: NewProduct) -> StoreResult<Product> {
        let image_url = match &input.image {
            Some(image) => self.upload_image(&input.id, image).await,
            None => None,
        };

        let row = ProductRow::from_input(&input, image_url);
        let product = self.store.insert_product(&row).await?;

        self.cache.invalidate(PRODUCTS_KEY).await;
        info!(id = %product.id, name = %product.name, "Product added");

        Ok(product)
    }

    /// Deletes a product and, best-effort, every image stored under its
    /// prefix.
    ///
    /// ## Steps
    /// 1. List objects under `{id}/`. Listing failure is non-fatal.
    /// 2. Remove all listed objects in one batched call. Removal failure is
    ///    non-fatal (orphaned objects are a documented limitation).
    /// 3. Delete the row. This is the only fatal step.
    ///
    /// On success the cached list is patched in place; after that, neither
    /// the cache nor a fresh fetch contains the id.
    pub async fn delete_product(&self, id: &str) -> StoreResult<()> {
        self.deleting.lock().await.insert(id.to_string());
        let result = self.delete_inner(id).await;
        self.deleting.lock().await.remove(id);
        result
    }

    async fn delete_inner(&self, id: &str) -> StoreResult<()> {
        // Step 1 + 2: sweep the product's storage prefix. Both steps are
        // best-effort; the row deletion below proceeds regardless.
        match self.store.list_objects(id).await {
            Ok(names) if !names.is_empty() => {
                let paths: Vec<String> = names
                    .iter()
                    .map(|name| image_object_path(id, name))
                    .collect();

                debug!(id = %id, count = paths.len(), "Removing stored images");
                if let Err(error) = self.store.remove_objects(&paths).await {
                    warn!(id = %id, %error, "Image removal failed, deleting row anyway");
                }
            }
            Ok(_) => {
                debug!(id = %id, "No stored images to remove");
            }
            Err(error) => {
                warn!(id = %id, %error, "Image listing failed, deleting row anyway");
            }
        }

        // Step 3: the row deletion. Failure here fails the operation.
        self.store.delete_product(id).await?;

        self.cache.patch_remove(PRODUCTS_KEY, id).await;
        info!(id = %id, "Product deleted");

        Ok(())
    }

    /// Uploads an image under the product's storage prefix and resolves its
    /// public URL. Returns `None` on failure - product creation is never
    /// blocked by an image-upload failure.
    async fn upload_image(&self, product_id: &str, image: &ImagePayload) -> Option<String> {
        let path = image_object_path(product_id, &image.file_name);

        match self
            .store
            .upload_object(&path, image.bytes.clone(), &image.content_type)
            .await
        {
            Ok(()) => Some(self.store.public_url(&path)),
            Err(error) => {
                warn!(path = %path, %error, "Image upload failed, creating product without image");
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::{Arc, Mutex as StdMutex};

    /// Which fake operations should fail.
    #[derive(Debug, Clone, Copy, Default)]
    struct Failures {
        upload: bool,
        list: bool,
        remove: bool,
        insert: bool,
        select: bool,
        row_delete: bool,
    }

    #[derive(Debug, Default)]
    struct FakeInner {
        rows: StdMutex<Vec<Product>>,
        objects: StdMutex<Vec<String>>,
        removed_batches: StdMutex<Vec<Vec<String>>>,
        calls: StdMutex<Vec<&'static str>>,
    }

    /// In-memory stand-in for the hosted backend. Clones share state so
    /// tests can inspect it after handing one to the service.
    #[derive(Debug, Clone, Default)]
    struct FakeStore {
        inner: Arc<FakeInner>,
        failures: Failures,
    }

    impl FakeStore {
        fn failing(failures: Failures) -> Self {
            FakeStore {
                inner: Arc::default(),
                failures,
            }
        }

        fn seed_object(&self, path: &str) {
            self.inner.objects.lock().unwrap().push(path.to_string());
        }

        fn object_paths(&self) -> Vec<String> {
            self.inner.objects.lock().unwrap().clone()
        }

        fn removed_batches(&self) -> Vec<Vec<String>> {
            self.inner.removed_batches.lock().unwrap().clone()
        }

        fn calls(&self) -> Vec<&'static str> {
            self.inner.calls.lock().unwrap().clone()
        }

        fn rejected(operation: &'static str) -> StoreError {
            StoreError::Rejected {
                operation,
                status: 500,
                message: "injected failure".to_string(),
            }
        }
    }

    #[async_trait]
    impl RemoteStore for FakeStore {
        async fn insert_product(&self, row: &ProductRow) -> StoreResult<Product> {
            self.inner.calls.lock().unwrap().push("insert");
            if self.failures.insert {
                return Err(Self::rejected("insert product"));
            }

            let product = Product {
                id: row.id.clone(),
                name: row.name.clone(),
                description: row.description.clone(),
                created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
                expired_at: row.expired_at,
                image_url: row.image_url.clone(),
            };
            self.inner.rows.lock().unwrap().push(product.clone());
            Ok(product)
        }

        async fn select_products(&self) -> StoreResult<Vec<Product>> {
            self.inner.calls.lock().unwrap().push("select");
            if self.failures.select {
                return Err(Self::rejected("select products"));
            }

            let mut products = self.inner.rows.lock().unwrap().clone();
            products.sort_by_key(|product| product.expired_at);
            Ok(products)
        }

        async fn delete_product(&self, id: &str) -> StoreResult<()> {
            self.inner.calls.lock().unwrap().push("delete_row");
            if self.failures.row_delete {
                return Err(Self::rejected("delete product row"));
            }

            self.inner
                .rows
                .lock()
                .unwrap()
                .retain(|product| product.id != id);
            Ok(())
        }

        async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>> {
            self.inner.calls.lock().unwrap().push("list");
            if self.failures.list {
                return Err(Self::rejected("list objects"));
            }

            let folder = format!("{}/", prefix);
            let names = self
                .inner
                .objects
                .lock()
                .unwrap()
                .iter()
                .filter_map(|path| path.strip_prefix(&folder).map(str::to_string))
                .collect();
            Ok(names)
        }

        async fn remove_objects(&self, paths: &[String]) -> StoreResult<()> {
            self.inner.calls.lock().unwrap().push("remove");
            if self.failures.remove {
                return Err(Self::rejected("remove objects"));
            }

            self.inner
                .removed_batches
                .lock()
                .unwrap()
                .push(paths.to_vec());
            self.inner
                .objects
                .lock()
                .unwrap()
                .retain(|path| !paths.contains(path));
            Ok(())
        }

        async fn upload_object(
            &self,
            path: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> StoreResult<()> {
            self.inner.calls.lock().unwrap().push("upload");
            if self.failures.upload {
                return Err(Self::rejected("upload object"));
            }

            self.inner.objects.lock().unwrap().push(path.to_string());
            Ok(())
        }

        fn public_url(&self, path: &str) -> String {
            format!("https://fake.store/public/{}", path)
        }
    }

    fn expires(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, day, 0, 0, 0).unwrap()
    }

    fn image(file_name: &str) -> ImagePayload {
        ImagePayload {
            bytes: vec![0xFF, 0xD8, 0xFF],
            file_name: file_name.to_string(),
            content_type: "image/jpeg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_without_image_has_no_image_url() {
        let store = FakeStore::default();
        let service = ProductService::new(store.clone());

        let product = service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(1)))
            .await
            .unwrap();

        assert!(product.image_url.is_none());
        assert!(store.object_paths().is_empty());
    }

    #[tokio::test]
    async fn test_add_with_image_resolves_public_url() {
        let store = FakeStore::default();
        let service = ProductService::new(store.clone());

        let input = NewProduct::new("Milk", "Whole milk", expires(1)).with_image(image("milk.jpg"));
        let id = input.id.clone();

        let product = service.add_product(input).await.unwrap();

        let expected_path = format!("{}/milk.jpg", id);
        assert_eq!(
            product.image_url.as_deref(),
            Some(format!("https://fake.store/public/{}", expected_path).as_str())
        );
        assert_eq!(store.object_paths(), vec![expected_path]);
    }

    #[tokio::test]
    async fn test_add_survives_upload_failure() {
        let store = FakeStore::failing(Failures {
            upload: true,
            ..Failures::default()
        });
        let service = ProductService::new(store.clone());

        let input = NewProduct::new("Milk", "Whole milk", expires(1)).with_image(image("milk.jpg"));
        let product = service.add_product(input).await.unwrap();

        // Creation is not blocked by the failed upload; the row simply has
        // no image.
        assert!(product.image_url.is_none());
        assert!(store.calls().contains(&"insert"));
    }

    #[tokio::test]
    async fn test_add_insert_failure_is_fatal() {
        let store = FakeStore::failing(Failures {
            insert: true,
            ..Failures::default()
        });
        let service = ProductService::new(store);

        let result = service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(1)))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_invalidates_cache() {
        let store = FakeStore::default();
        let service = ProductService::new(store);

        service.fetch_all().await.unwrap();
        assert!(service.cached_products().await.is_some());

        service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(1)))
            .await
            .unwrap();

        // Invalidate-on-add: the next read must refetch.
        assert!(service.cached_products().await.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_all_objects_batched_before_row() {
        let store = FakeStore::default();
        let service = ProductService::new(store.clone());

        let product = service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(1)))
            .await
            .unwrap();
        store.seed_object(&format!("{}/front.jpg", product.id));
        store.seed_object(&format!("{}/back.jpg", product.id));
        store.seed_object(&format!("{}/label.jpg", product.id));
        store.seed_object("other-id/unrelated.jpg");

        service.delete_product(&product.id).await.unwrap();

        // All three objects went in ONE batched call.
        let batches = store.removed_batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
        assert!(batches[0].iter().all(|path| path.starts_with(&product.id)));

        // Unrelated prefixes are untouched.
        assert_eq!(store.object_paths(), vec!["other-id/unrelated.jpg"]);

        // Storage removal was issued before the row deletion.
        let calls = store.calls();
        let remove_at = calls.iter().position(|c| *c == "remove").unwrap();
        let delete_at = calls.iter().position(|c| *c == "delete_row").unwrap();
        assert!(remove_at < delete_at);
    }

    #[tokio::test]
    async fn test_delete_list_failure_still_deletes_row() {
        let store = FakeStore::failing(Failures {
            list: true,
            ..Failures::default()
        });
        let service = ProductService::new(store.clone());

        let product = service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(1)))
            .await
            .unwrap();

        service.delete_product(&product.id).await.unwrap();

        let calls = store.calls();
        assert!(calls.contains(&"delete_row"));
        // Listing failed, so no removal was attempted.
        assert!(!calls.contains(&"remove"));
    }

    #[tokio::test]
    async fn test_delete_remove_failure_still_deletes_row() {
        let store = FakeStore::failing(Failures {
            remove: true,
            ..Failures::default()
        });
        let service = ProductService::new(store.clone());

        let product = service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(1)))
            .await
            .unwrap();
        store.seed_object(&format!("{}/front.jpg", product.id));

        // Removal fails, row deletion still succeeds; the object is now
        // orphaned, which the design accepts.
        service.delete_product(&product.id).await.unwrap();

        assert!(store.calls().contains(&"delete_row"));
        assert_eq!(
            store.object_paths(),
            vec![format!("{}/front.jpg", product.id)]
        );
    }

    #[tokio::test]
    async fn test_delete_row_failure_is_fatal_and_cache_untouched() {
        let store = FakeStore::failing(Failures {
            row_delete: true,
            ..Failures::default()
        });
        let service = ProductService::new(store);

        let product = service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(1)))
            .await
            .unwrap();
        service.fetch_all().await.unwrap();

        let result = service.delete_product(&product.id).await;

        assert!(result.is_err());
        let cached = service.cached_products().await.unwrap();
        assert!(cached.iter().any(|p| p.id == product.id));
    }

    #[tokio::test]
    async fn test_delete_patches_cache_and_fresh_fetch() {
        let store = FakeStore::default();
        let service = ProductService::new(store);

        let keep = service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(2)))
            .await
            .unwrap();
        let gone = service
            .add_product(NewProduct::new("Yogurt", "Plain", expires(1)))
            .await
            .unwrap();
        service.fetch_all().await.unwrap();

        service.delete_product(&gone.id).await.unwrap();

        // Patch-on-delete: the cached list no longer contains the id...
        let cached = service.cached_products().await.unwrap();
        assert!(cached.iter().all(|p| p.id != gone.id));
        assert!(cached.iter().any(|p| p.id == keep.id));

        // ...and neither does a fresh fetch.
        let fresh = service.fetch_all().await.unwrap();
        assert!(fresh.iter().all(|p| p.id != gone.id));
    }

    #[tokio::test]
    async fn test_fetch_all_is_ordered_by_expiry() {
        let store = FakeStore::default();
        let service = ProductService::new(store);

        service
            .add_product(NewProduct::new("Later", "expires later", expires(20)))
            .await
            .unwrap();
        service
            .add_product(NewProduct::new("Soon", "expires soon", expires(2)))
            .await
            .unwrap();
        service
            .add_product(NewProduct::new("Middle", "expires mid", expires(9)))
            .await
            .unwrap();

        let products = service.fetch_all().await.unwrap();

        assert_eq!(products.len(), 3);
        assert!(products
            .windows(2)
            .all(|pair| pair[0].expired_at <= pair[1].expired_at));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_an_error_not_an_empty_list() {
        let store = FakeStore::failing(Failures {
            select: true,
            ..Failures::default()
        });
        let service = ProductService::new(store);

        let result = service.fetch_all().await;

        assert!(matches!(result, Err(StoreError::Rejected { .. })));
        assert!(service.cached_products().await.is_none());
    }

    #[tokio::test]
    async fn test_deleting_flag_clears_after_completion() {
        let store = FakeStore::default();
        let service = ProductService::new(store);

        let product = service
            .add_product(NewProduct::new("Milk", "Whole milk", expires(1)))
            .await
            .unwrap();

        assert!(!service.is_deleting(&product.id).await);
        service.delete_product(&product.id).await.unwrap();
        assert!(!service.is_deleting(&product.id).await);
    }

    #[tokio::test]
    async fn test_deleting_flag_clears_even_on_failure() {
        let store = FakeStore::failing(Failures {
            row_delete: true,
            ..Failures::default()
        });
        let service = ProductService::new(store);

        let result = service.delete_product("some-id").await;

        assert!(result.is_err());
        assert!(!service.is_deleting("some-id").await);
    }
}
