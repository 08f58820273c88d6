//! Ports Layer - Trait definitions for external collaborators
//!
//! Following hexagonal architecture, these traits abstract:
//! - Trade execution (the external wallet signer/executor)
//! - Outcome notifications (best-effort user reporting)
//! - Settings persistence (durable user policy)

pub mod execution;
pub mod mocks;
pub mod notifications;
pub mod settings_store;

pub use execution::{BuyReceipt, BuyRequest, ExecutionPort, ExecutorError};
pub use notifications::{NotificationEvent, NotificationKind, NotificationSink};
pub use settings_store::{SettingsStore, StoreError};
