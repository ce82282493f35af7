use serde::{Deserialize, Serialize};

// POST /faucet body
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct FaucetRequest {
    // missing field is answered like any other invalid address
    #[serde(default)]
    pub address: Option<String>,
}

// GET /health body
#[derive(Serialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    pub faucet: String,
    pub tracked_addresses: usize,
    pub timestamp: String,
}
