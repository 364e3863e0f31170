//! Pack Calculator - optimal pack decomposition service
//!
//! Splits an order into whole packs shipping the fewest items, then the fewest
//! packs, and memoizes results in a cache whose entries live longer the more
//! they are reused.

pub mod api;
pub mod cache;
pub mod calculator;
pub mod config;
pub mod error;
pub mod models;
pub mod packing;
pub mod repo;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use calculator::{CalculationOutcome, Calculator};
pub use config::Config;
pub use packing::{decompose, validate, Decomposition};
pub use tasks::spawn_cleanup_task;
