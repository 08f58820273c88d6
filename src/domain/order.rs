//! Order Types
//!
//! An order is the unit of tracked work: one buy request with a forward-only
//! lifecycle (`Executing -> Completed` or `Executing -> Failed`). Orders are
//! owned exclusively by the [`OrderTracker`](super::tracker::OrderTracker);
//! everything else holds only the order id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ContextId;

/// Unique order identifier, collision-free within the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What caused the order to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderTrigger {
    /// Fired by the policy evaluator on a qualifying dev sell
    DevSell,
    /// Fired directly by the user, bypassing policy
    Manual,
}

/// Order lifecycle status. Transitions are forward-only:
/// `Executing -> Completed` or `Executing -> Failed`, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Executing,
    Completed,
    Failed,
}

impl OrderStatus {
    /// Whether the order has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }
}

/// Parameters for a new order, before the tracker assigns it an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderInput {
    pub token_address: String,
    pub amount_native: f64,
    pub slippage_bps: u32,
    pub origin_context: ContextId,
    /// Defaults to manual: a bare buy payload from the host is a
    /// user-initiated order
    #[serde(default = "default_trigger")]
    pub trigger: OrderTrigger,
    /// Sell percentage that triggered the order, when trigger is dev_sell
    #[serde(default)]
    pub trigger_sell_percentage: Option<f64>,
}

fn default_trigger() -> OrderTrigger {
    OrderTrigger::Manual
}

/// Terminal outcome applied to an executing order.
#[derive(Debug, Clone)]
pub enum OrderOutcome {
    Completed { signature: String },
    Failed { error: String },
}

/// A tracked buy order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub token_address: String,
    pub amount_native: f64,
    pub slippage_bps: u32,
    pub origin_context: ContextId,
    pub trigger: OrderTrigger,
    pub trigger_sell_percentage: Option<f64>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Execution receipt from the signer, set on completion
    pub signature: Option<String>,
    /// Failure message, set on failure
    pub error: Option<String>,
}

impl Order {
    /// Create a fresh executing order from its input.
    pub fn new(input: OrderInput) -> Self {
        Self {
            token_address: input.token_address,
            amount_native: input.amount_native,
            slippage_bps: input.slippage_bps,
            origin_context: input.origin_context,
            trigger: input.trigger,
            trigger_sell_percentage: input.trigger_sell_percentage,
            status: OrderStatus::Executing,
            created_at: Utc::now(),
            completed_at: None,
            signature: None,
            error: None,
        }
    }
}
