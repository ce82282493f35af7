use alloy_primitives::Address;
use crate::faucet::Faucet;

// app's shared state
pub struct AppState {
    pub faucet: Faucet,
    pub faucet_address: Address, // wallet the funds come from
}
