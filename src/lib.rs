//! DevSniper - Dev-Wallet Sell Sniper Core
//!
//! Watches dev-wallet sell signals for newly listed token pairs and fires a
//! buy order through a connected wallet bridge when the observed sell volume
//! crosses a user-configured threshold.
//!
//! # Modules
//!
//! - `domain`: Core logic (Settings, PolicyEvaluator, OrderTracker, SessionRegistry)
//! - `ports`: Trait abstractions (ExecutionPort, NotificationSink, SettingsStore)
//! - `adapters`: External implementations (WalletBridge, file storage, sinks, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: SniperService and the host request/response types

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
