//! API Module
//!
//! HTTP handlers and routing for the pack calculator REST API.
//!
//! # Endpoints
//! - `POST /api/calculate` - Decompose an order into packs
//! - `GET /api/presets` - Predefined pack size sets
//! - `GET /api/history` - Recent calculations
//! - `POST /api/history/clear` - Drop calculation history
//! - `GET /api/health` - Health check endpoint
//! - `GET|POST /api/packs/config` - Read or replace the active pack sizes
//! - `GET /api/cache/stats` - Result cache statistics
//! - `POST /api/cache/clear` - Drop cached results

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
