use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::OrderId;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Wallet rejected the transaction: {0}")]
    Rejected(String),
    #[error("Wallet bridge unavailable: {0}")]
    BridgeUnavailable(String),
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Buy request handed to the external signer/executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyRequest {
    pub order_id: OrderId,
    pub token_address: String,
    pub amount_native: f64,
    pub slippage_bps: u32,
}

/// Receipt returned by the signer on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyReceipt {
    pub signature: String,
}

/// External signer/executor that actually submits the buy transaction.
///
/// Implementations own their own timeout and cancellation policy; the core
/// imposes none and only reacts to resolution. A call that never resolves
/// leaves its order executing forever, bounded by the implementation's own
/// contract.
#[async_trait::async_trait]
pub trait ExecutionPort: Send + Sync {
    async fn execute_buy(&self, request: BuyRequest) -> Result<BuyReceipt, ExecutorError>;
}
