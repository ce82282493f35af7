//! NFT-gated native token faucet.
//!
//! `POST /faucet` with `{ "address": "0x..." }` sends a fixed amount of the chain's
//! native token to the address, at most once per cooldown window per address.
//! `GET /health` and `GET /metrics` are served alongside.
//!
//! Configuration comes from flags or the environment (`.env` is loaded first),
//! see `config.rs`.

mod address;
mod chain;
mod clock;
mod config;
mod error;
mod faucet;
mod handlers;
mod metrics;
mod models;
mod rate_limit;
mod shutdown;
mod state;

use alloy_primitives::utils::format_ether;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::chain::EvmBackend;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::faucet::{Faucet, FaucetPolicy};
use crate::rate_limit::InMemoryCooldownStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let backend = EvmBackend::new(config.rpc_url.clone(), config.signer.clone(), config.nft_contract);
    let faucet_address = backend.faucet_address();
    // informational only, a node that is down now may be up by the first request
    match backend.faucet_balance().await {
        Ok(balance) => tracing::info!(faucet = %faucet_address, balance = %format_ether(balance), "Faucet wallet balance"),
        Err(e) => tracing::warn!(faucet = %faucet_address, error = %e, "Could not read faucet balance"),
    }

    let faucet = Faucet::new(
        FaucetPolicy::from(&config),
        Arc::new(InMemoryCooldownStore::new()),
        Arc::new(backend),
        Arc::new(SystemClock),
    );
    let state = Arc::new(AppState {
        faucet,
        faucet_address,
    });

    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;

    tracing::info!("Faucet running on http://{}", config.listen);
    tracing::info!(
        amount = %format_ether(config.amount),
        cooldown_secs = config.cooldown.as_secs(),
        rpc_timeout_secs = config.rpc_timeout.as_secs(),
        require_minted = config.require_minted,
        "Dispense policy"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    Ok(())
}
