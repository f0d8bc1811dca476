use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::domain::repository::Store;
use crate::domain::types::CollectionCounts;
use crate::state::AppState;
use crate::usecase::dashboard::CountCollectionsUseCase;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<CollectionCounts>,
}

/// `GET /api/health`: store reachability plus document counts.
pub async fn api_health<S: Store>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<HealthResponse>) {
    let unhealthy = || {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "error",
                database: "disconnected",
                counts: None,
            }),
        )
    };
    if !state.store.ping().await {
        return unhealthy();
    }
    let usecase = CountCollectionsUseCase { repo: state.repo() };
    match usecase.execute().await {
        Ok(counts) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "connected",
                counts: Some(counts),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health count failed");
            unhealthy()
        }
    }
}
