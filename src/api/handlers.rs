//! API Handlers
//!
//! HTTP request handlers for each pack calculator endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, Json};
use tracing::info;

use crate::cache::{build_cache, ResultCache};
use crate::calculator::Calculator;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    presets, CacheStatsResponse, CalculateRequest, CalculateResponse, ConfigUpdateRequest,
    ConfigUpdateResponse, HealthResponse, HistoryResponse, MessageResponse, PackConfigResponse,
    PresetsResponse,
};
use crate::packing::gcd_of;
use crate::repo::Repository;
use crate::store::{KeyValueStore, MemoryStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub calculator: Calculator,
    /// Largest order quantity accepted by /api/calculate
    pub max_order_items: i64,
    /// Largest explicit pack size accepted by /api/calculate
    pub max_pack_size: i64,
    /// Entries returned by /api/history
    pub history_limit: usize,
    pub started_at: Instant,
}

impl AppState {
    /// Creates a new AppState around a calculator.
    pub fn new(
        calculator: Calculator,
        max_order_items: i64,
        max_pack_size: i64,
        history_limit: usize,
    ) -> Self {
        Self {
            calculator,
            max_order_items,
            max_pack_size,
            history_limit,
            started_at: Instant::now(),
        }
    }

    /// Wires the cache and repository described by `config` on top of `store`.
    pub async fn from_config(config: &Config, store: MemoryStore) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(store);
        let cache = build_cache(&config.cache, store);
        let repo = Repository::with_pack_sizes(
            config.history_capacity,
            config.max_pack_size,
            &config.pack_sizes,
        )
        .await?;

        Ok(Self::new(
            Calculator::new(cache, Arc::new(repo)),
            config.max_order_items,
            config.max_pack_size,
            config.history_limit,
        ))
    }

    fn cache(&self) -> &Arc<dyn ResultCache> {
        self.calculator.cache()
    }

    fn repo(&self) -> &Arc<Repository> {
        self.calculator.repo()
    }
}

/// Handler for POST /api/calculate
pub async fn calculate_handler(
    State(state): State<AppState>,
    Json(req): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>> {
    if let Some(error_msg) = req.validate(state.max_order_items, state.max_pack_size) {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let outcome = state
        .calculator
        .calculate(req.items, req.requested_sizes())
        .await;

    Ok(Json(outcome.into()))
}

/// Handler for GET /api/presets
pub async fn presets_handler() -> Json<PresetsResponse> {
    Json(PresetsResponse { presets: presets() })
}

/// Handler for GET /api/history
pub async fn history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state.repo().get_history(state.history_limit).await;
    Json(HistoryResponse::new(history))
}

/// Handler for POST /api/history/clear
pub async fn clear_history_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.repo().clear_history().await;
    info!("Calculation history cleared");
    Json(MessageResponse::new("History cleared"))
}

/// Handler for GET /api/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.started_at.elapsed().as_secs()))
}

/// Handler for GET /api/packs/config
pub async fn get_pack_config_handler(State(state): State<AppState>) -> Json<PackConfigResponse> {
    let config = state.repo().pack_config().await;
    Json(PackConfigResponse {
        gcd: gcd_of(&config.pack_sizes),
        pack_sizes: config.pack_sizes,
        updated_at: config.updated_at,
    })
}

/// Handler for POST /api/packs/config
pub async fn update_pack_config_handler(
    State(state): State<AppState>,
    Json(req): Json<ConfigUpdateRequest>,
) -> Result<Json<ConfigUpdateResponse>> {
    let config = state.repo().set_pack_sizes(&req.pack_sizes).await?;

    Ok(Json(ConfigUpdateResponse {
        pack_sizes: config.pack_sizes,
        updated_at: config.updated_at,
        message: "Pack sizes updated successfully".to_string(),
    }))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let cache = state.cache();
    Json(CacheStatsResponse {
        enabled: cache.is_enabled(),
        stats: cache.stats().await,
    })
}

/// Handler for POST /api/cache/clear
pub async fn cache_clear_handler(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    state.cache().clear().await?;
    info!("Result cache cleared");
    Ok(Json(MessageResponse::new("Cache cleared successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_state() -> AppState {
        AppState::from_config(&Config::default(), MemoryStore::new(100))
            .await
            .unwrap()
    }

    fn request(items: i64, pack_sizes: Option<Vec<i64>>) -> Json<CalculateRequest> {
        Json(CalculateRequest { items, pack_sizes })
    }

    #[tokio::test]
    async fn test_calculate_handler() {
        let state = test_state().await;

        let Json(resp) = calculate_handler(State(state), request(251, None))
            .await
            .unwrap();

        assert_eq!(resp.total_items, 500);
        assert_eq!(resp.result.get(&500), Some(&1));
        assert!(!resp.cached);
    }

    #[tokio::test]
    async fn test_calculate_handler_rejects_non_positive() {
        let state = test_state().await;
        let result = calculate_handler(State(state), request(0, None)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_calculate_handler_rejects_oversized_order() {
        let state = test_state().await;
        let items = state.max_order_items + 1;
        let result = calculate_handler(State(state), request(items, None)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_calculate_handler_rejects_oversized_pack() {
        let state = test_state().await;
        let result =
            calculate_handler(State(state), request(1, Some(vec![i64::MAX]))).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_update_then_get_pack_config() {
        let state = test_state().await;

        let req = Json(ConfigUpdateRequest {
            pack_sizes: vec![53, 31, 23],
        });
        let Json(updated) = update_pack_config_handler(State(state.clone()), req)
            .await
            .unwrap();
        assert_eq!(updated.pack_sizes, vec![23, 31, 53]);

        let Json(config) = get_pack_config_handler(State(state)).await;
        assert_eq!(config.pack_sizes, vec![23, 31, 53]);
        assert_eq!(config.gcd, 1);
    }

    #[tokio::test]
    async fn test_update_pack_config_rejects_invalid() {
        let state = test_state().await;
        let req = Json(ConfigUpdateRequest {
            pack_sizes: vec![-100, 250],
        });
        let result = update_pack_config_handler(State(state.clone()), req).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));

        let req = Json(ConfigUpdateRequest {
            pack_sizes: vec![250, i64::MAX],
        });
        let result = update_pack_config_handler(State(state.clone()), req).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));

        // Rejected sets leave the active configuration untouched.
        let Json(resp) = calculate_handler(State(state), request(251, None))
            .await
            .unwrap();
        assert_eq!(resp.total_items, 500);
    }

    #[tokio::test]
    async fn test_history_and_clear() {
        let state = test_state().await;
        calculate_handler(State(state.clone()), request(10, Some(vec![3, 5])))
            .await
            .unwrap();

        let Json(history) = history_handler(State(state.clone())).await;
        assert_eq!(history.count, 1);

        clear_history_handler(State(state.clone())).await;
        let Json(history) = history_handler(State(state)).await;
        assert_eq!(history.count, 0);
    }

    #[tokio::test]
    async fn test_cache_stats_and_clear() {
        let state = test_state().await;
        for _ in 0..2 {
            calculate_handler(State(state.clone()), request(10, Some(vec![3, 5])))
                .await
                .unwrap();
        }

        let Json(stats) = cache_stats_handler(State(state.clone())).await;
        assert!(stats.enabled);
        assert_eq!((stats.stats.hits, stats.stats.misses), (1, 1));

        cache_clear_handler(State(state.clone())).await.unwrap();
        let Json(stats) = cache_stats_handler(State(state)).await;
        assert_eq!(stats.stats.total_keys, 0);
        assert_eq!(stats.stats.hits, 0);
    }

    #[tokio::test]
    async fn test_presets_handler() {
        let Json(resp) = presets_handler().await;
        assert_eq!(resp.presets.len(), 3);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(resp) = health_handler(State(test_state().await)).await;
        assert_eq!(resp.status, "ok");
    }
}
