use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;
use crate::models::HealthResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        faucet: state.faucet_address.to_string(),
        tracked_addresses: state.faucet.store().len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
