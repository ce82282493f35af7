use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;

/// Stage of a dispense that talks to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Eligibility,
    Transfer,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Eligibility => write!(f, "eligibility check"),
            Stage::Transfer => write!(f, "transfer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FaucetError {
    #[error("Invalid Ethereum address.")]
    InvalidAddress,

    #[error("Request limit reached. Please try again later.")]
    RateLimited { retry_after_ms: u64 },

    #[error("No NFT found in the given address.")]
    NotEligible,

    // underlying message goes out to the caller as-is
    #[error("Error: {0}")]
    TransferFailed(String),

    #[error("Error: {stage} timed out after {}s", .after.as_secs())]
    Timeout { stage: Stage, after: Duration },
}

impl FaucetError {
    pub fn status(&self) -> StatusCode {
        match self {
            FaucetError::InvalidAddress | FaucetError::NotEligible => StatusCode::BAD_REQUEST,
            FaucetError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            FaucetError::TransferFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FaucetError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    // label for the rejection counter
    pub fn reason(&self) -> &'static str {
        match self {
            FaucetError::InvalidAddress => "invalid_address",
            FaucetError::RateLimited { .. } => "rate_limited",
            FaucetError::NotEligible => "not_eligible",
            FaucetError::TransferFailed(_) => "transfer_failed",
            FaucetError::Timeout { .. } => "timeout",
        }
    }
}

impl IntoResponse for FaucetError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
