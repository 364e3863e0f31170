//! Request and Response models for the pack calculator API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod presets;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use presets::{presets, Preset};
pub use requests::{CalculateRequest, ConfigUpdateRequest};
pub use responses::{
    CacheStatsResponse, CalculateResponse, ConfigUpdateResponse, HealthResponse, HistoryResponse,
    MessageResponse, PackConfigResponse, PresetsResponse,
};
