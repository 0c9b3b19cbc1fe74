//! # Validation Module
//!
//! Input validation for the add-product flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller surface (CLI / screen)                                │
//! │  ├── THIS MODULE: required-field and length checks                     │
//! │  └── Immediate user feedback before any remote call                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Mutation layer (shelflife-store)                             │
//! │  └── Performs NO validation of its own - inputs arrive pre-checked     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote table                                                 │
//! │  └── NOT NULL / primary-key constraints as the last line               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::NewProduct;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum accepted product name length.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum accepted description length.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product description.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 2000 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates an attached image file name.
///
/// The file name becomes the object key inside the product's storage folder,
/// so it must be non-empty and must not contain a path separator.
pub fn validate_image_file_name(file_name: &str) -> ValidationResult<()> {
    if file_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "image file name".to_string(),
        });
    }

    if file_name.contains('/') {
        return Err(ValidationError::InvalidFormat {
            field: "image file name".to_string(),
            reason: "must not contain '/'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validator
// =============================================================================

/// Validates a complete add-mutation input.
///
/// The mutation layer assumes its inputs already passed this check; callers
/// run it before invoking `add_product`.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_name(&input.name)?;
    validate_description(&input.description)?;

    if let Some(image) = &input.image {
        validate_image_file_name(&image.file_name)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
