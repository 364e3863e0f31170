//! Request DTOs for the pack calculator API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::packing::{oversized_pack, validate};

/// Request body for POST /api/calculate
///
/// # Fields
/// - `items`: The order quantity
/// - `pack_sizes`: Optional pack sizes (uses the configured set if absent or empty)
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRequest {
    /// The order quantity
    pub items: i64,
    /// Optional explicit pack sizes
    #[serde(default)]
    pub pack_sizes: Option<Vec<i64>>,
}

impl CalculateRequest {
    /// Validates the request data against the largest accepted order and pack size.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, max_order_items: i64, max_pack_size: i64) -> Option<String> {
        if self.items <= 0 {
            return Some("Items must be greater than 0".to_string());
        }
        if self.items > max_order_items {
            return Some(format!("Items must not exceed {}", max_order_items));
        }
        let sizes = self.requested_sizes()?;
        if !validate(sizes) {
            return Some("Invalid pack sizes".to_string());
        }
        oversized_pack(sizes, max_pack_size)
            .map(|size| format!("Pack size {} exceeds maximum of {}", size, max_pack_size))
    }

    /// Explicit sizes, treating an empty list as absent.
    pub fn requested_sizes(&self) -> Option<&[i64]> {
        self.pack_sizes
            .as_deref()
            .filter(|sizes| !sizes.is_empty())
    }
}

/// Request body for POST /api/packs/config
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigUpdateRequest {
    pub pack_sizes: Vec<i64>,
}
