//! On-chain collaborators of the faucet: the eligibility contract and the
//! dispensing wallet.

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::sol;
use alloy_transport::TransportError;
use async_trait::async_trait;
use url::Url;

sol! {
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IFaucetNft {
        function hasMintedAlready(address account) external view returns (bool);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// What the faucet needs from the chain.
#[async_trait]
pub trait FaucetBackend: Send + Sync {
    /// Whether `account` has already minted from the eligibility contract.
    async fn has_minted_already(&self, account: Address) -> Result<bool, ChainError>;

    /// Signs and submits a plain value transfer, returning once the node accepted it.
    async fn send_value(&self, to: Address, value: U256) -> Result<TxHash, ChainError>;
}

pub struct EvmBackend {
    provider: DynProvider,
    nft_contract: Address,
    faucet_address: Address,
}

impl EvmBackend {
    pub fn new(rpc_url: Url, signer: PrivateKeySigner, nft_contract: Address) -> Self {
        let faucet_address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(rpc_url)
            .erased();
        tracing::info!(faucet = %faucet_address, nft_contract = %nft_contract, "Initialized EVM provider");
        Self {
            provider,
            nft_contract,
            faucet_address,
        }
    }

    pub fn faucet_address(&self) -> Address {
        self.faucet_address
    }

    pub async fn faucet_balance(&self) -> Result<U256, ChainError> {
        Ok(self.provider.get_balance(self.faucet_address).await?)
    }
}

#[async_trait]
impl FaucetBackend for EvmBackend {
    async fn has_minted_already(&self, account: Address) -> Result<bool, ChainError> {
        let nft = IFaucetNft::new(self.nft_contract, self.provider.clone());
        Ok(nft.hasMintedAlready(account).call().await?)
    }

    async fn send_value(&self, to: Address, value: U256) -> Result<TxHash, ChainError> {
        let tx = TransactionRequest::default()
            .with_from(self.faucet_address)
            .with_to(to)
            .with_value(value);
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use alloy_transport::TransportErrorKind;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Clone, Copy)]
    pub enum Outcome {
        Ok,
        Fail,
        Hang,
    }

    /// Scriptable backend that records what the faucet asked for.
    pub struct FakeBackend {
        pub minted: bool,
        pub eligibility: Outcome,
        pub transfer: Mutex<Outcome>,
        pub eligibility_calls: AtomicUsize,
        pub transfers: Mutex<Vec<(Address, U256)>>,
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self {
                minted: true,
                eligibility: Outcome::Ok,
                transfer: Mutex::new(Outcome::Ok),
                eligibility_calls: AtomicUsize::new(0),
                transfers: Mutex::new(Vec::new()),
            }
        }
    }

    impl FakeBackend {
        pub fn set_transfer(&self, outcome: Outcome) {
            *self.transfer.lock().unwrap() = outcome;
        }

        pub fn calls(&self) -> usize {
            self.eligibility_calls.load(Ordering::SeqCst) + self.transfers.lock().unwrap().len()
        }
    }

    async fn run(outcome: Outcome, message: &str) -> Result<(), ChainError> {
        match outcome {
            Outcome::Ok => Ok(()),
            Outcome::Fail => Err(TransportErrorKind::custom_str(message).into()),
            Outcome::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
        }
    }

    #[async_trait]
    impl FaucetBackend for FakeBackend {
        async fn has_minted_already(&self, _account: Address) -> Result<bool, ChainError> {
            self.eligibility_calls.fetch_add(1, Ordering::SeqCst);
            run(self.eligibility, "execution reverted").await?;
            Ok(self.minted)
        }

        async fn send_value(&self, to: Address, value: U256) -> Result<TxHash, ChainError> {
            let outcome = *self.transfer.lock().unwrap();
            run(outcome, "insufficient funds for gas * price + value").await?;
            let mut transfers = self.transfers.lock().unwrap();
            transfers.push((to, value));
            Ok(TxHash::with_last_byte(transfers.len() as u8))
        }
    }
}
