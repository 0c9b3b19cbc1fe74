//! # Expiry Module
//!
//! Expiry arithmetic and staleness classification for products.
//!
//! ## Why Whole Days?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FRACTIONAL DAY PROBLEM                                             │
//! │                                                                         │
//! │  "Expires in 1.4 days" is meaningless to a shopper scanning a list.    │
//! │                                                                         │
//! │  OUR RULE: truncate toward zero, keep the sign                          │
//! │     35 hours left   →  1 day                                            │
//! │    -30 hours left   →  -1 day (already stale)                           │
//! │     23 hours left   →  0 days (expires today → most urgent bucket)     │
//! │                                                                         │
//! │  The classification below only ever sees whole signed days.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Classification Bands
//! ```text
//! days_left:   ... -2  -1 │  0   1   2   3   4 │  5   6   7 │  8   9  ...
//!              ───────────┼────────────────────┼────────────┼───────────
//! status:         Stale   │       Urgent       │  Warning   │   Fresh
//! color:          maroon  │        red         │   olive    │   gray
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use shelflife_core::expiry::{days_left, expiry_label, ExpiryStatus};
//!
//! let now = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
//! let expires = Utc.with_ymd_and_hms(2026, 8, 3, 0, 0, 0).unwrap();
//!
//! let days = days_left(expires, now);
//! assert_eq!(days, 2);
//! assert_eq!(ExpiryStatus::classify(days), ExpiryStatus::Urgent);
//! assert_eq!(expiry_label(days), "Expires in 2 days");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed label for products whose expiry date has already passed.
pub const STALE_LABEL: &str = "Stale";

// =============================================================================
// Day Arithmetic
// =============================================================================

/// Whole days between `now` and `expired_at`.
///
/// Fractional days are truncated toward zero and the sign is preserved:
/// a product 35 hours from expiry has 1 day left, a product 30 hours past
/// expiry has -1 days left.
pub fn days_left(expired_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    // Duration::num_days truncates toward zero, which is exactly the
    // behavior the classification bands are defined over.
    expired_at.signed_duration_since(now).num_days()
}

// =============================================================================
// Expiry Status
// =============================================================================

/// Staleness classification of a product, derived from its days left.
///
/// ## Bands
/// - `days_left < 0` → [`ExpiryStatus::Stale`]
/// - `0 ..= 4`       → [`ExpiryStatus::Urgent`]
/// - `5 ..= 7`       → [`ExpiryStatus::Warning`]
/// - `> 7`           → [`ExpiryStatus::Fresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    /// Expiry date has already passed.
    Stale,
    /// Expires within 4 days (including today).
    Urgent,
    /// Expires in 5 to 7 days.
    Warning,
    /// More than a week of shelf life remaining.
    Fresh,
}

impl ExpiryStatus {
    /// Classifies a signed whole-day count into a status band.
    pub const fn classify(days_left: i64) -> Self {
        if days_left < 0 {
            ExpiryStatus::Stale
        } else if days_left <= 4 {
            ExpiryStatus::Urgent
        } else if days_left <= 7 {
            ExpiryStatus::Warning
        } else {
            ExpiryStatus::Fresh
        }
    }

    /// Display color for this status.
    ///
    /// Stale gets its own color so it never blends in with merely-urgent
    /// products in the list view.
    pub const fn color(&self) -> &'static str {
        match self {
            ExpiryStatus::Stale => "maroon",
            ExpiryStatus::Urgent => "red",
            ExpiryStatus::Warning => "olive",
            ExpiryStatus::Fresh => "gray",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpiryStatus::Stale => "stale",
            ExpiryStatus::Urgent => "urgent",
            ExpiryStatus::Warning => "warning",
            ExpiryStatus::Fresh => "fresh",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Human-readable expiry label for a signed whole-day count.
///
/// Stale products get the fixed [`STALE_LABEL`] marker; everything else gets
/// `Expires in N day(s)` with correct pluralization for `N == 1`.
pub fn expiry_label(days_left: i64) -> String {
    if days_left < 0 {
        return STALE_LABEL.to_string();
    }

    if days_left == 1 {
        "Expires in 1 day".to_string()
    } else {
        format!("Expires in {} days", days_left)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_days_left_truncates_toward_zero() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();

        // 35 hours ahead: 1.46 days → 1
        let expires = Utc.with_ymd_and_hms(2026, 8, 2, 11, 0, 0).unwrap();
        assert_eq!(days_left(expires, now), 1);

        // 30 hours behind: -1.25 days → -1
        let expired = Utc.with_ymd_and_hms(2026, 7, 30, 18, 0, 0).unwrap();
        assert_eq!(days_left(expired, now), -1);

        // 23 hours ahead: not a full day yet → 0
        let today = Utc.with_ymd_and_hms(2026, 8, 1, 23, 0, 0).unwrap();
        assert_eq!(days_left(today, now), 0);
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(ExpiryStatus::classify(-1), ExpiryStatus::Stale);
        assert_eq!(ExpiryStatus::classify(0), ExpiryStatus::Urgent);
        assert_eq!(ExpiryStatus::classify(4), ExpiryStatus::Urgent);
        assert_eq!(ExpiryStatus::classify(5), ExpiryStatus::Warning);
        assert_eq!(ExpiryStatus::classify(7), ExpiryStatus::Warning);
        assert_eq!(ExpiryStatus::classify(8), ExpiryStatus::Fresh);
    }

    #[test]
    fn test_status_colors_are_distinct() {
        let colors = [
            ExpiryStatus::Stale.color(),
            ExpiryStatus::Urgent.color(),
            ExpiryStatus::Warning.color(),
            ExpiryStatus::Fresh.color(),
        ];

        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_label_pluralization() {
        assert_eq!(expiry_label(1), "Expires in 1 day");
        assert_eq!(expiry_label(2), "Expires in 2 days");
        assert_eq!(expiry_label(0), "Expires in 0 days");
    }

    #[test]
    fn test_label_stale_marker() {
        assert_eq!(expiry_label(-1), "Stale");
        assert_eq!(expiry_label(-100), "Stale");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExpiryStatus::Stale.to_string(), "stale");
        assert_eq!(ExpiryStatus::Fresh.to_string(), "fresh");
    }
}
