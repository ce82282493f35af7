mod faucet;
mod health;
mod metrics;

use axum::{Router, routing::{get, post}};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use crate::state::AppState;

pub use faucet::faucet_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/faucet", post(faucet_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
