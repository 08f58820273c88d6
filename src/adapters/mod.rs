//! Adapters Layer - Concrete implementations of the ports
//!
//! - `wallet_bridge`: request-id-correlated client for the external signer
//! - `storage`: file-backed settings store
//! - `notify`: log and webhook notification sinks
//! - `cli`: command-line interface

pub mod cli;
pub mod notify;
pub mod storage;
pub mod wallet_bridge;
