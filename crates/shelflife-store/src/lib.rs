//! # shelflife-store: Remote Data Path for ShelfLife
//!
//! This crate provides every remote operation the application performs
//! against the hosted table-storage and object-storage service, plus the
//! local query cache reconciled by the mutations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShelfLife Data Flow                              │
//! │                                                                         │
//! │  CLI command (list / add / delete)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  shelflife-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ProductService │───►│  RemoteStore  │    │ ProductCache │  │   │
//! │  │   │ (service.rs)  │    │  (remote.rs)  │    │  (cache.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ fetch_all     │    │ trait seam    │    │ get/set/     │  │   │
//! │  │   │ add_product   │◄───│ HttpStore     │    │ invalidate/  │  │   │
//! │  │   │ delete_product│    │ (http.rs)     │    │ patch_remove │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   │ HTTPS                               │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Hosted Backend (table + object storage)            │   │
//! │  │        Product relation          product-images bucket          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Connection settings (env vars + builder)
//! - [`error`] - Store error taxonomy
//! - [`remote`] - The adapter trait and the insert payload
//! - [`http`] - Production HTTP adapter
//! - [`cache`] - The product query cache
//! - [`service`] - The mutation/query layer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelflife_store::{HttpStore, ProductService, RemoteConfig};
//!
//! let config = RemoteConfig::from_env()?;
//! let service = ProductService::new(HttpStore::new(config)?);
//!
//! let products = service.fetch_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod remote;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::{ProductCache, PRODUCTS_KEY};
pub use config::{ConfigError, RemoteConfig};
pub use error::{StoreError, StoreResult};
pub use http::HttpStore;
pub use remote::{ProductRow, RemoteStore};
pub use service::ProductService;
