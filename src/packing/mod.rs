//! Packing Module
//!
//! The decomposition engine: a pure function from an order quantity and a set
//! of pack sizes to the optimal set of whole packs.

mod decomposition;
mod optimizer;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use decomposition::Decomposition;
pub use optimizer::{decompose, gcd_of, oversized_pack, validate, MAX_TABLE_SLOTS};
