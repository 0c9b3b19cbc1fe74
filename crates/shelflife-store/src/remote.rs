//! # Remote Store Adapter
//!
//! The trait seam between the product service and the hosted backend.
//!
//! ## Adapter Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RemoteStore Operations                             │
//! │                                                                         │
//! │  Table (Product relation)          Object storage (image bucket)       │
//! │  ────────────────────────          ──────────────────────────────      │
//! │  insert_product(row)               upload_object(path, bytes, mime)    │
//! │  select_products()                 list_objects(prefix)                │
//! │  delete_product(id)                remove_objects(paths)               │
//! │                                    public_url(path)                    │
//! │                                                                         │
//! │  The product id doubles as the storage path prefix - the only          │
//! │  cross-cutting contract between the two remote subsystems.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a Trait?
//! The service's contracts (upload-before-insert, sweep-prefix-before-row-
//! delete, cache reconciliation) are testable against an in-memory fake
//! without a network. Production code uses [`crate::http::HttpStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StoreResult;
use shelflife_core::{NewProduct, Product};

// =============================================================================
// Insert Payload
// =============================================================================

/// The row sent to the remote table by the add mutation.
///
/// ## Why a separate type from Product?
/// - `created_at` is server-assigned and must never be sent on insert
/// - the transient image payload must never be persisted; only the resolved
///   public URL is part of the row
#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub expired_at: DateTime<Utc>,
    pub image_url: Option<String>,
}

impl ProductRow {
    /// Builds the insert payload from a mutation input and the image URL
    /// resolved (or not) by the upload step.
    pub fn from_input(input: &NewProduct, image_url: Option<String>) -> Self {
        ProductRow {
            id: input.id.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
            expired_at: input.expired_at,
            image_url,
        }
    }
}

// =============================================================================
// Remote Store Trait
// =============================================================================

/// Adapter over the hosted table-storage and object-storage service.
///
/// Implementations perform each call exactly once - no retries. Failure
/// policy (fatal vs logged-and-ignored) is the service layer's decision,
/// not the adapter's.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Inserts one product row and returns the stored row (including the
    /// server-assigned `created_at`).
    async fn insert_product(&self, row: &ProductRow) -> StoreResult<Product>;

    /// Returns all products ordered ascending by `expired_at`.
    async fn select_products(&self) -> StoreResult<Vec<Product>>;

    /// Deletes the product row with the given id.
    ///
    /// Deleting an id that no longer exists is not an error; the remote
    /// delete simply matches zero rows.
    async fn delete_product(&self, id: &str) -> StoreResult<()>;

    /// Lists object names stored under `{prefix}/` in the image bucket.
    ///
    /// Returns bare file names; callers rebuild full paths with
    /// [`shelflife_core::image_object_path`].
    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Removes the given object paths from the image bucket in one
    /// batched call.
    async fn remove_objects(&self, paths: &[String]) -> StoreResult<()>;

    /// Uploads one object, overwriting any existing object at that path.
    async fn upload_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()>;

    /// Resolves the public URL for an object path.
    ///
    /// Pure derivation; issues no request.
    fn public_url(&self, path: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shelflife_core::ImagePayload;

    #[test]
    fn test_product_row_from_input_without_image() {
        let expired = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();
        let input = NewProduct::new("Milk", "Whole milk", expired);

        let row = ProductRow::from_input(&input, None);

        assert_eq!(row.id, input.id);
        assert_eq!(row.name, "Milk");
        assert_eq!(row.expired_at, expired);
        assert!(row.image_url.is_none());
    }

    #[test]
    fn test_product_row_never_carries_image_bytes() {
        let expired = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();
        let input = NewProduct::new("Milk", "Whole milk", expired).with_image(ImagePayload {
            bytes: vec![1, 2, 3],
            file_name: "milk.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
        });

        let row = ProductRow::from_input(&input, Some("https://cdn/x".to_string()));
        let json = serde_json::to_value(&row).unwrap();

        // The serialized row carries the resolved URL and nothing of the
        // transient payload.
        assert_eq!(json["image_url"], "https://cdn/x");
        assert!(json.get("image").is_none());
        assert!(json.get("bytes").is_none());
    }
}
