//! The dispense flow: validate, reserve the cooldown slot, query eligibility,
//! transfer, commit.

use alloy_primitives::{Address, TxHash, U256};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::address::parse_address;
use crate::chain::{ChainError, FaucetBackend};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::{FaucetError, Stage};
use crate::rate_limit::{CooldownStore, Reservation};

#[derive(Debug, Clone)]
pub struct FaucetPolicy {
    pub amount: U256,
    pub cooldown: Duration,
    pub rpc_timeout: Duration,
    pub require_minted: bool,
}

impl From<&Config> for FaucetPolicy {
    fn from(config: &Config) -> Self {
        Self {
            amount: config.amount,
            cooldown: config.cooldown,
            rpc_timeout: config.rpc_timeout,
            require_minted: config.require_minted,
        }
    }
}

pub struct Faucet {
    policy: FaucetPolicy,
    store: Arc<dyn CooldownStore>,
    backend: Arc<dyn FaucetBackend>,
    clock: Arc<dyn Clock>,
}

impl Faucet {
    pub fn new(
        policy: FaucetPolicy,
        store: Arc<dyn CooldownStore>,
        backend: Arc<dyn FaucetBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policy,
            store,
            backend,
            clock,
        }
    }

    pub fn store(&self) -> &dyn CooldownStore {
        self.store.as_ref()
    }

    /// Sends the configured amount to `raw_address` unless it is malformed or still
    /// cooling down.
    ///
    /// The cooldown slot is taken before any chain call and only kept when the
    /// transfer was accepted by the node; every failure after that point gives it back.
    pub async fn dispense(&self, raw_address: &str) -> Result<TxHash, FaucetError> {
        let address = parse_address(raw_address).ok_or(FaucetError::InvalidAddress)?;

        let reservation = self
            .store
            .try_reserve(address, self.clock.now_millis(), self.policy.cooldown)
            .map_err(|cooling| {
                debug!(
                    %address,
                    last_request_ms = cooling.last_request_ms,
                    retry_after_ms = cooling.retry_after_ms,
                    "Address is cooling down"
                );
                FaucetError::RateLimited {
                    retry_after_ms: cooling.retry_after_ms,
                }
            })?;

        // released on drop too, so a cancelled request gives its slot back
        let held = HeldReservation {
            store: self.store.as_ref(),
            reservation: Some(reservation),
        };

        match self.transfer(address).await {
            Ok(tx_hash) => {
                held.commit(self.clock.now_millis());
                info!(%address, %tx_hash, "Dispensed");
                Ok(tx_hash)
            }
            Err(err) => {
                drop(held);
                warn!(%address, error = %err, "Dispense failed");
                Err(err)
            }
        }
    }

    async fn transfer(&self, address: Address) -> Result<TxHash, FaucetError> {
        let minted = self
            .bounded(Stage::Eligibility, self.backend.has_minted_already(address))
            .await?;
        info!(%address, minted, "Eligibility checked");
        if self.policy.require_minted && !minted {
            return Err(FaucetError::NotEligible);
        }

        self.bounded(
            Stage::Transfer,
            self.backend.send_value(address, self.policy.amount),
        )
        .await
    }

    async fn bounded<T>(
        &self,
        stage: Stage,
        call: impl Future<Output = Result<T, ChainError>>,
    ) -> Result<T, FaucetError> {
        let after = self.policy.rpc_timeout;
        tokio::time::timeout(after, call)
            .await
            .map_err(|_| FaucetError::Timeout { stage, after })?
            .map_err(|e| FaucetError::TransferFailed(e.to_string()))
    }
}

struct HeldReservation<'a> {
    store: &'a dyn CooldownStore,
    reservation: Option<Reservation>,
}

impl HeldReservation<'_> {
    fn commit(mut self, now_ms: u64) {
        if let Some(reservation) = self.reservation.take() {
            self.store.commit(reservation, now_ms);
        }
    }
}

impl Drop for HeldReservation<'_> {
    fn drop(&mut self) {
        if let Some(reservation) = self.reservation.take() {
            debug!(address = %reservation.address, "Releasing cooldown reservation");
            self.store.release(reservation);
        }
    }
}
