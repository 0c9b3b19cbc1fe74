//! # shelflife-core: Pure Domain Logic for ShelfLife
//!
//! This crate is the **heart** of ShelfLife. It contains all domain logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShelfLife Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Caller Surface (CLI)                         │   │
//! │  │    list ──► add ──► delete                                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelflife-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  expiry   │  │validation │  │   error   │  │   │
//! │  │   │  Product  │  │ days_left │  │   rules   │  │  CoreError│  │   │
//! │  │   │NewProduct │  │  status   │  │  checks   │  │Validation │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shelflife-store (Remote Data Path)               │   │
//! │  │        table + object storage adapter, cache, service           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, ImagePayload)
//! - [`expiry`] - Expiry arithmetic and staleness classification
//! - [`error`] - Domain error types
//! - [`validation`] - Caller-side input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Whole-Day Expiry**: All staleness math is over signed whole days
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use shelflife_core::expiry::{days_left, expiry_label, ExpiryStatus};
//!
//! let now = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
//! let expires = Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap();
//!
//! let days = days_left(expires, now);
//! assert_eq!(days, 6);
//! assert_eq!(ExpiryStatus::classify(days), ExpiryStatus::Warning);
//! assert_eq!(expiry_label(days), "Expires in 6 days");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod expiry;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shelflife_core::Product` instead of
// `use shelflife_core::types::Product`

pub use error::{CoreError, CoreResult, ValidationError};
pub use expiry::{days_left, expiry_label, ExpiryStatus};
pub use types::{image_object_path, ImagePayload, NewProduct, Product};
