//! # Domain Types
//!
//! Core domain types used throughout ShelfLife.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │  ImagePayload   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  bytes          │       │
//! │  │  name           │   │  name           │   │  file_name      │       │
//! │  │  description    │   │  description    │   │  content_type   │       │
//! │  │  created_at     │   │  expired_at     │   └─────────────────┘       │
//! │  │  expired_at     │   │  image (opt)    │                             │
//! │  │  image_url      │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Product     = the persisted row, as read back from the remote table   │
//! │  NewProduct  = the add-mutation input (image payload never persisted)  │
//! │  ImagePayload= transient bytes handed to object storage at creation    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity and Storage Prefix
//! Every product id is a client-generated UUID v4. The id doubles as the
//! object-storage folder name: every image belonging to a product lives under
//! the `{id}/` prefix, and deleting the product must sweep that prefix.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expiry::{days_left, ExpiryStatus};

// =============================================================================
// Product
// =============================================================================

/// A tracked perishable product, as stored in the remote table.
///
/// Products are created once, never edited, and destroyed by the delete
/// mutation. `created_at` is server-assigned and read-only from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4), client-generated at creation.
    /// Immutable; also the object-storage folder name for this product.
    pub id: String,

    /// Display name shown in the product list.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// When the row was created. Server-assigned; never sent on insert.
    pub created_at: DateTime<Utc>,

    /// Client-supplied expiry date. Drives the default list ordering
    /// (ascending) and the "days remaining" display.
    pub expired_at: DateTime<Utc>,

    /// Public URL of the uploaded image, if one was uploaded at creation.
    /// Never updated afterwards.
    pub image_url: Option<String>,
}

impl Product {
    /// Whole days until this product expires, measured from `now`.
    /// Negative once the expiry date has passed.
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        days_left(self.expired_at, now)
    }

    /// Expiry classification for this product, measured from `now`.
    pub fn expiry_status(&self, now: DateTime<Utc>) -> ExpiryStatus {
        ExpiryStatus::classify(self.days_left(now))
    }
}

// =============================================================================
// Image Payload
// =============================================================================

/// Raw image data attached to an add mutation.
///
/// This is a transient value: it is uploaded to object storage at most once
/// and is never persisted to the product table itself (only the resolved
/// public URL is).
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Raw image bytes.
    pub bytes: Vec<u8>,

    /// File name, used as the object key inside the product's folder.
    pub file_name: String,

    /// MIME type (e.g. `image/jpeg`), forwarded to object storage as-is.
    pub content_type: String,
}

// =============================================================================
// New Product
// =============================================================================

/// Input to the add-product mutation.
///
/// The id is generated client-side so the image can be uploaded under the
/// product's folder before the row referencing it exists.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Client-generated UUID v4.
    pub id: String,

    /// Required display name.
    pub name: String,

    /// Required description.
    pub description: String,

    /// Required expiry date.
    pub expired_at: DateTime<Utc>,

    /// Optional image to upload before the row is inserted.
    pub image: Option<ImagePayload>,
}

impl NewProduct {
    /// Creates a new product input with a freshly generated id and no image.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expired_at: DateTime<Utc>,
    ) -> Self {
        NewProduct {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            expired_at,
            image: None,
        }
    }

    /// Attaches an image payload to this input.
    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }
}

// =============================================================================
// Storage Prefix Contract
// =============================================================================

/// Builds the object-storage key for an image belonging to a product.
///
/// Every image object stored remotely lives under a path prefixed by its
/// owning product's id. This is the single cross-cutting contract between
/// the table and the bucket: the delete mutation sweeps `{id}/` before
/// removing the row.
pub fn image_object_path(product_id: &str, file_name: &str) -> String {
    format!("{}/{}", product_id, file_name)
}

// =============================================================================
// Unit Tests
// =============================================================================
