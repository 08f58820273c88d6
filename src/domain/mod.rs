//! Domain Layer - Core sniper logic
//!
//! Pure business logic with no I/O: policy evaluation, order lifecycle,
//! session tracking. Everything here is synchronous; async boundaries live in
//! the ports and application layers.

pub mod order;
pub mod policy;
pub mod sessions;
pub mod settings;
pub mod signal;
pub mod tracker;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a monitoring context (one host tab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(pub u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub use order::{Order, OrderId, OrderInput, OrderOutcome, OrderStatus, OrderTrigger};
pub use policy::{evaluate, Decision};
pub use sessions::SessionRegistry;
pub use settings::Settings;
pub use signal::DevSellSignal;
pub use tracker::OrderTracker;
