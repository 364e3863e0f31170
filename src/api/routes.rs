//! API Routes
//!
//! Configures the Axum router with all pack calculator endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_clear_handler, cache_stats_handler, calculate_handler, clear_history_handler,
    get_pack_config_handler, health_handler, history_handler, presets_handler,
    update_pack_config_handler, AppState,
};

/// Creates the main router with all endpoints configured under `/api`.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/presets", get(presets_handler))
        .route("/history", get(history_handler))
        .route("/history/clear", post(clear_history_handler))
        .route("/health", get(health_handler))
        .route(
            "/packs/config",
            get(get_pack_config_handler).post(update_pack_config_handler),
        )
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/clear", post(cache_clear_handler));

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
