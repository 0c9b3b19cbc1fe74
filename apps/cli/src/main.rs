//! # ShelfLife CLI
//!
//! Thin command-line surface over the product service.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CLI Command Flow                                 │
//! │                                                                         │
//! │  shelflife list ─────────► fetch_all ──────► render with expiry labels │
//! │                                                                         │
//! │  shelflife add ──► validate input ──► read image file ──► add_product  │
//! │                    (core rules)       (optional)                        │
//! │                                                                         │
//! │  shelflife delete <id> ──► delete_product (images swept first)         │
//! │                                                                         │
//! │  Any failure surfaces as an error message and a non-zero exit -        │
//! │  a failed fetch is never rendered as an empty shelf.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shelflife_core::validation::validate_new_product;
use shelflife_core::{expiry_label, ImagePayload, NewProduct, Product};
use shelflife_store::config::{ENV_BUCKET, ENV_SERVICE_KEY, ENV_TABLE, ENV_URL};
use shelflife_store::{HttpStore, ProductService, RemoteConfig};

// =============================================================================
// Arguments
// =============================================================================

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Track perishable products against a hosted backend")]
struct Args {
    /// Backend base URL (overrides SHELFLIFE_URL)
    #[arg(long)]
    url: Option<String>,

    /// Service key (overrides SHELFLIFE_SERVICE_KEY)
    #[arg(long)]
    service_key: Option<String>,

    /// Product table name (overrides SHELFLIFE_TABLE)
    #[arg(long)]
    table: Option<String>,

    /// Image bucket name (overrides SHELFLIFE_BUCKET)
    #[arg(long)]
    bucket: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tracked products, soonest expiry first
    List,

    /// Add a product, optionally with a photo
    Add {
        /// Product name
        #[arg(long)]
        name: String,

        /// Product description
        #[arg(long)]
        description: String,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long, value_name = "YYYY-MM-DD")]
        expires: NaiveDate,

        /// Path to an image file to upload alongside the product
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete a product and its stored images
    Delete {
        /// Product id (UUID)
        id: String,
    },
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // --- Resolve config: flags override environment ---
    let config = resolve_config(&args)?;
    let service = ProductService::new(HttpStore::new(config)?);

    match args.command {
        Command::List => run_list(&service).await,
        Command::Add {
            name,
            description,
            expires,
            image,
        } => run_add(&service, name, description, expires, image.as_deref()).await,
        Command::Delete { id } => run_delete(&service, &id).await,
    }
}

/// Merges CLI flags over environment variables into a remote config.
fn resolve_config(args: &Args) -> Result<RemoteConfig> {
    let base_url = args
        .url
        .clone()
        .or_else(|| env::var(ENV_URL).ok())
        .with_context(|| format!("backend URL not set (--url or {})", ENV_URL))?;

    let service_key = args
        .service_key
        .clone()
        .or_else(|| env::var(ENV_SERVICE_KEY).ok())
        .with_context(|| format!("service key not set (--service-key or {})", ENV_SERVICE_KEY))?;

    let mut config = RemoteConfig::new(base_url, service_key);

    if let Some(table) = args.table.clone().or_else(|| env::var(ENV_TABLE).ok()) {
        config = config.table(table);
    }
    if let Some(bucket) = args.bucket.clone().or_else(|| env::var(ENV_BUCKET).ok()) {
        config = config.bucket(bucket);
    }

    Ok(config)
}

// =============================================================================
// Commands
// =============================================================================

/// Fetches and renders the product list.
async fn run_list(service: &ProductService<HttpStore>) -> Result<()> {
    let products = service.fetch_all().await?;

    if products.is_empty() {
        println!("No products tracked.");
        return Ok(());
    }

    let now = Utc::now();
    println!(
        "{:<8} {:<12} {:<20} {:<24} {}",
        "STATUS", "EXPIRES", "LABEL", "NAME", "ID"
    );
    for product in &products {
        print_product(product, now);
    }

    Ok(())
}

fn print_product(product: &Product, now: chrono::DateTime<Utc>) {
    let status = product.expiry_status(now);
    let label = expiry_label(product.days_left(now));
    let marker = if product.image_url.is_some() {
        " [img]"
    } else {
        ""
    };

    println!(
        "{:<8} {:<12} {:<20} {:<24} {}{}",
        status.to_string(),
        product.expired_at.format("%Y-%m-%d").to_string(),
        label,
        product.name,
        product.id,
        marker
    );
}

/// Validates input, reads the optional image, and adds a product.
async fn run_add(
    service: &ProductService<HttpStore>,
    name: String,
    description: String,
    expires: NaiveDate,
    image_path: Option<&Path>,
) -> Result<()> {
    let expired_at = expires.and_time(NaiveTime::MIN).and_utc();

    let mut input = NewProduct::new(name, description, expired_at);
    if let Some(path) = image_path {
        input = input.with_image(read_image(path)?);
    }

    // All fields are required; the mutation itself performs no validation.
    validate_new_product(&input)?;

    let product = service.add_product(input).await?;

    println!("Added {} (id {})", product.name, product.id);
    if let Some(url) = &product.image_url {
        println!("Image: {}", url);
    }

    Ok(())
}

/// Deletes a product by id, sweeping its stored images first.
async fn run_delete(service: &ProductService<HttpStore>, id: &str) -> Result<()> {
    service.delete_product(id).await?;
    println!("Deleted product {}", id);
    Ok(())
}

// =============================================================================
// Image Loading
// =============================================================================

/// Reads an image file into an upload payload.
fn read_image(path: &Path) -> Result<ImagePayload> {
    let bytes =
        fs::read(path).with_context(|| format!("could not read image {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("image path {} has no file name", path.display()))?;

    Ok(ImagePayload {
        bytes,
        file_name,
        content_type: content_type_for(path).to_string(),
    })
}

/// Infers a MIME type from the file extension.
///
/// Unknown extensions fall back to a generic type; the backend stores the
/// object either way.
fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
