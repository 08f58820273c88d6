//! Wallet Bridge
//!
//! Adapter between the core and the external wallet provider that signs and
//! submits transactions. Requests flow out over a channel to the host;
//! responses flow back through [`WalletBridge::handle_response`].
//!
//! Responses are correlated by a per-request id held in a pending map of
//! oneshot senders, so any number of in-flight requests can await their own
//! answer without clobbering each other. A response carrying an id with no
//! pending entry (for example one that arrives after its order was purged)
//! is dropped with a warning.
//!
//! No timeout is imposed here: the wallet provider owns its own timeout and
//! cancellation, and the bridge only reacts to resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

use crate::ports::{BuyReceipt, BuyRequest, ExecutionPort, ExecutorError};

/// Outbound message to the wallet provider.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BridgeRequest {
    ExecuteBuy {
        request_id: u64,
        #[serde(flatten)]
        buy: BuyRequest,
    },
}

impl BridgeRequest {
    pub fn request_id(&self) -> u64 {
        match self {
            BridgeRequest::ExecuteBuy { request_id, .. } => *request_id,
        }
    }
}

/// Inbound message from the wallet provider.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeResponse {
    pub request_id: u64,
    pub success: bool,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request-id-correlated client for the external wallet provider.
pub struct WalletBridge {
    next_id: AtomicU64,
    pending: Mutex<HashMap<u64, oneshot::Sender<BridgeResponse>>>,
    outbound: mpsc::UnboundedSender<BridgeRequest>,
}

impl WalletBridge {
    /// Create a bridge and the receiver the host drains for outbound
    /// requests.
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<BridgeRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bridge = Arc::new(Self {
            next_id: AtomicU64::new(0),
            pending: Mutex::new(HashMap::new()),
            outbound: tx,
        });
        (bridge, rx)
    }

    /// Feed a wallet provider response back into the bridge. Responses with
    /// no pending waiter are dropped.
    pub fn handle_response(&self, response: BridgeResponse) {
        let waiter = self
            .pending
            .lock()
            .expect("pending map poisoned")
            .remove(&response.request_id);
        match waiter {
            Some(tx) => {
                // The waiter may have been dropped (caller gave up); that is
                // equivalent to a late response and ignored the same way.
                let _ = tx.send(response);
            }
            None => {
                tracing::warn!(
                    request_id = response.request_id,
                    "dropping wallet response with no pending request"
                );
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().expect("pending map poisoned").len()
    }

    async fn round_trip(&self, buy: BuyRequest) -> Result<BridgeResponse, ExecutorError> {
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .expect("pending map poisoned")
            .insert(request_id, tx);

        let request = BridgeRequest::ExecuteBuy { request_id, buy };
        if self.outbound.send(request).is_err() {
            self.pending
                .lock()
                .expect("pending map poisoned")
                .remove(&request_id);
            return Err(ExecutorError::BridgeUnavailable(
                "wallet provider channel closed".to_string(),
            ));
        }

        rx.await.map_err(|_| {
            ExecutorError::BridgeUnavailable("wallet bridge shut down while waiting".to_string())
        })
    }
}

#[async_trait::async_trait]
impl ExecutionPort for WalletBridge {
    async fn execute_buy(&self, request: BuyRequest) -> Result<BuyReceipt, ExecutorError> {
        let response = self.round_trip(request).await?;
        if response.success {
            let signature = response.signature.ok_or_else(|| {
                ExecutorError::ExecutionFailed(
                    "wallet reported success without a signature".to_string(),
                )
            })?;
            Ok(BuyReceipt { signature })
        } else {
            Err(ExecutorError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "Unknown error occurred".to_string()),
            ))
        }
    }
}
