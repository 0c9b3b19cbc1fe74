//! # HTTP Remote Store
//!
//! Production [`RemoteStore`] implementation over the hosted service's REST
//! dialect.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Hosted Service Endpoints                           │
//! │                                                                         │
//! │  Table (PostgREST-style)                                               │
//! │  ───────────────────────                                               │
//! │  GET    {base}/rest/v1/{table}?select=*&order=expired_at.asc           │
//! │  POST   {base}/rest/v1/{table}          Prefer: return=representation  │
//! │  DELETE {base}/rest/v1/{table}?id=eq.{id}                              │
//! │                                                                         │
//! │  Object storage (bucket-scoped)                                        │
//! │  ──────────────────────────────                                        │
//! │  POST   {base}/storage/v1/object/{bucket}/{path}   x-upsert: true      │
//! │  POST   {base}/storage/v1/object/list/{bucket}     body: { prefix }    │
//! │  DELETE {base}/storage/v1/object/{bucket}          body: { prefixes }  │
//! │         {base}/storage/v1/object/public/{bucket}/{path}  (public URL)  │
//! │                                                                         │
//! │  Every request carries the service key as `apikey` + bearer token.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{StoreError, StoreResult};
use crate::remote::{ProductRow, RemoteStore};
use shelflife_core::Product;

// =============================================================================
// Wire Payloads
// =============================================================================

/// Body of the object-listing request.
#[derive(Debug, Serialize)]
struct ListObjectsBody<'a> {
    prefix: &'a str,
    limit: u32,
    offset: u32,
}

/// One entry of the object-listing response. The remote returns more
/// metadata per object; only the name is needed to rebuild paths.
#[derive(Debug, Deserialize)]
struct ObjectEntry {
    name: String,
}

/// Body of the batched object-removal request.
#[derive(Debug, Serialize)]
struct RemoveObjectsBody<'a> {
    prefixes: &'a [String],
}

// =============================================================================
// HTTP Store
// =============================================================================

/// Remote store adapter speaking the hosted service's REST API.
///
/// ## Usage
/// ```rust,ignore
/// let config = RemoteConfig::from_env()?;
/// let store = HttpStore::new(config)?;
/// let products = store.select_products().await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    config: RemoteConfig,
}

impl HttpStore {
    /// Creates the adapter with a configured HTTP client.
    pub fn new(config: RemoteConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(HttpStore { client, config })
    }

    /// URL of the product table endpoint.
    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, self.config.table)
    }

    /// URL of an object inside the image bucket.
    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }

    /// URL of the bucket-scoped listing endpoint.
    fn list_url(&self) -> String {
        format!(
            "{}/storage/v1/object/list/{}",
            self.config.base_url, self.config.bucket
        )
    }

    /// URL of the bucket-scoped batch-removal endpoint.
    fn remove_url(&self) -> String {
        format!(
            "{}/storage/v1/object/{}",
            self.config.base_url, self.config.bucket
        )
    }

    /// Attaches the service key headers every endpoint requires.
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }
}

/// Turns a non-success response into a [`StoreError::Rejected`] carrying the
/// remote's diagnostic body.
async fn ensure_success(operation: &'static str, response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Rejected {
        operation,
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn insert_product(&self, row: &ProductRow) -> StoreResult<Product> {
        const OP: &str = "insert product";
        debug!(id = %row.id, "Inserting product row");

        // The table endpoint accepts an array of rows; we always send one.
        // `return=representation` echoes the stored row back, including the
        // server-assigned created_at.
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| StoreError::transport(OP, e))?;
        let response = ensure_success(OP, response).await?;

        let mut rows: Vec<Product> = response.json().await.map_err(|e| StoreError::decode(OP, e))?;
        rows.pop().ok_or_else(|| StoreError::Decode {
            operation: OP,
            message: "representation was empty".to_string(),
        })
    }

    async fn select_products(&self) -> StoreResult<Vec<Product>> {
        const OP: &str = "select products";
        debug!("Fetching all products");

        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "expired_at.asc")])
            .send()
            .await
            .map_err(|e| StoreError::transport(OP, e))?;
        let response = ensure_success(OP, response).await?;

        let products: Vec<Product> =
            response.json().await.map_err(|e| StoreError::decode(OP, e))?;

        debug!(count = products.len(), "Select returned products");
        Ok(products)
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        const OP: &str = "delete product row";
        debug!(id = %id, "Deleting product row");

        let response = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("id", &format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| StoreError::transport(OP, e))?;
        ensure_success(OP, response).await?;

        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>> {
        const OP: &str = "list objects";
        debug!(prefix = %prefix, "Listing bucket objects");

        let body = ListObjectsBody {
            prefix,
            limit: 1000,
            offset: 0,
        };

        let response = self
            .authed(self.client.post(self.list_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::transport(OP, e))?;
        let response = ensure_success(OP, response).await?;

        let entries: Vec<ObjectEntry> =
            response.json().await.map_err(|e| StoreError::decode(OP, e))?;

        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }

    async fn remove_objects(&self, paths: &[String]) -> StoreResult<()> {
        const OP: &str = "remove objects";
        debug!(count = paths.len(), "Removing bucket objects");

        let body = RemoveObjectsBody { prefixes: paths };

        let response = self
            .authed(self.client.delete(self.remove_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::transport(OP, e))?;
        ensure_success(OP, response).await?;

        Ok(())
    }

    async fn upload_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()> {
        const OP: &str = "upload object";
        debug!(path = %path, size = bytes.len(), "Uploading object");

        // x-upsert allows overwriting an existing object at the same key,
        // matching the at-most-once-per-product upload contract.
        let response = self
            .authed(self.client.post(self.object_url(path)))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StoreError::transport(OP, e))?;
        ensure_success(OP, response).await?;

        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, self.config.bucket, path
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
