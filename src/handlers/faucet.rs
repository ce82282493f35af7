use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use std::time::Instant;
use crate::error::FaucetError;
use crate::metrics::{DISPENSE_LATENCY, DISPENSED_TOTAL, REJECTED_TOTAL, REQUEST_TOTAL, TRACKED_ADDRESSES};
use crate::models::FaucetRequest;
use crate::state::AppState;

// POST /faucet
pub async fn faucet_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FaucetRequest>, JsonRejection>,
) -> Result<String, FaucetError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    // unreadable body counts as no address
    let address = match payload {
        Ok(Json(request)) => request.address,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable faucet request body");
            None
        }
    };

    let result = match address {
        Some(address) => state.faucet.dispense(&address).await,
        None => Err(FaucetError::InvalidAddress),
    };
    TRACKED_ADDRESSES.set(state.faucet.store().len() as f64);

    match result {
        Ok(tx_hash) => {
            DISPENSED_TOTAL.inc();
            DISPENSE_LATENCY.observe(start_time.elapsed().as_secs_f64());
            Ok(format!("Transaction successful: {tx_hash}"))
        }
        Err(err) => {
            REJECTED_TOTAL.with_label_values(&[err.reason()]).inc();
            Err(err)
        }
    }
}
