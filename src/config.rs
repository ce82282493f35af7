use alloy_primitives::utils::parse_ether;
use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

// CLI argument structure, every flag can also come from the environment (or .env)
#[derive(Parser, Clone)]
#[command(name = "nft-faucet")]
#[command(about = "Native token faucet for EVM test networks")]
pub struct Args {
    // JSON-RPC endpoint of the node
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: String,

    // Hex private key of the dispensing wallet
    #[arg(long, env = "FAUCET_PRIVATE_KEY", hide_env_values = true)]
    pub faucet_private_key: String,

    // Contract exposing hasMintedAlready(address)
    #[arg(long, env = "NFT_CONTRACT_ADDRESS")]
    pub nft_contract_address: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    // Amount sent per request, in ether
    #[arg(long, env = "FAUCET_AMOUNT", default_value = "0.01")]
    pub amount: String,

    // Per-address cooldown in seconds (6 hours)
    #[arg(long, env = "FAUCET_COOLDOWN_SECS", default_value_t = 21_600)]
    pub cooldown_secs: u64,

    // Upper bound for each RPC call (eligibility query, transfer)
    #[arg(long, env = "RPC_TIMEOUT_SECS", default_value_t = 30)]
    pub rpc_timeout_secs: u64,

    // Reject addresses whose hasMintedAlready() is false
    #[arg(long, env = "FAUCET_REQUIRE_MINTED", default_value_t = false)]
    pub require_minted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid RPC url {0}: {1}")]
    RpcUrl(String, url::ParseError),
    #[error("Invalid faucet private key: {0}")]
    PrivateKey(#[from] alloy_signer_local::LocalSignerError),
    #[error("Invalid NFT contract address {0}")]
    ContractAddress(String),
    #[error("Invalid faucet amount {0}: {1}")]
    Amount(String, alloy_primitives::utils::UnitsError),
    #[error("Faucet amount must be greater than zero")]
    ZeroAmount,
    #[error("RPC timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validated runtime configuration, built once at startup.
#[derive(Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub rpc_url: Url,
    pub signer: PrivateKeySigner,
    pub nft_contract: Address,
    pub amount: U256,
    pub cooldown: Duration,
    pub rpc_timeout: Duration,
    pub require_minted: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let rpc_url =
            Url::parse(&args.rpc_url).map_err(|e| ConfigError::RpcUrl(args.rpc_url.clone(), e))?;
        let signer = PrivateKeySigner::from_str(args.faucet_private_key.trim())?;
        let nft_contract = Address::from_str(&args.nft_contract_address)
            .map_err(|_| ConfigError::ContractAddress(args.nft_contract_address.clone()))?;
        let amount =
            parse_ether(&args.amount).map_err(|e| ConfigError::Amount(args.amount.clone(), e))?;
        if amount.is_zero() {
            return Err(ConfigError::ZeroAmount);
        }
        if args.rpc_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            listen: SocketAddr::new(args.host, args.port),
            rpc_url,
            signer,
            nft_contract,
            amount,
            cooldown: Duration::from_secs(args.cooldown_secs),
            rpc_timeout: Duration::from_secs(args.rpc_timeout_secs),
            require_minted: args.require_minted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // anvil's first dev account
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn args() -> Args {
        Args::parse_from([
            "nft-faucet",
            "--rpc-url",
            "http://localhost:8545",
            "--faucet-private-key",
            DEV_KEY,
            "--nft-contract-address",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        ])
    }

    #[test]
    fn defaults_match_original_faucet() {
        let config = Config::from_args(args()).unwrap();
        assert_eq!(config.listen.port(), 3000);
        assert_eq!(config.cooldown, Duration::from_millis(21_600_000));
        assert_eq!(config.amount, U256::from(10_000_000_000_000_000u64));
        assert!(!config.require_minted);
        assert_eq!(
            config.signer.address(),
            Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap()
        );
    }

    #[test]
    fn rejects_bad_contract_address() {
        let mut args = args();
        args.nft_contract_address = "0x1234".to_string();
        assert!(matches!(
            Config::from_args(args),
            Err(ConfigError::ContractAddress(_))
        ));
    }

    #[test]
    fn rejects_bad_private_key() {
        let mut args = args();
        args.faucet_private_key = "not-a-key".to_string();
        assert!(matches!(
            Config::from_args(args),
            Err(ConfigError::PrivateKey(_))
        ));
    }

    #[test]
    fn rejects_zero_amount() {
        let mut args = args();
        args.amount = "0".to_string();
        assert!(matches!(Config::from_args(args), Err(ConfigError::ZeroAmount)));
    }
}
