//! Dev Sell Signals
//!
//! A signal is one normalized observation from the external watcher: the dev
//! wallet of a monitored pair sold some percentage of its holdings. Signals
//! are consumed exactly once by the policy evaluator and then discarded.

use serde::{Deserialize, Serialize};

use super::ContextId;

/// One observed dev sell, as delivered by the external watcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevSellSignal {
    /// Token mint address of the monitored pair
    pub token_address: String,
    /// Wallet believed to control the token supply, if known
    #[serde(default)]
    pub dev_wallet: Option<String>,
    /// Percentage of the dev wallet's holdings sold (0-100)
    pub sell_percentage: f64,
    /// Opaque pair metadata passed through from the watcher
    #[serde(default)]
    pub pair_info: serde_json::Value,
    /// Monitoring session that produced the observation
    pub origin_context: ContextId,
}
