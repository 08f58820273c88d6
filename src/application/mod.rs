//! Application Layer - Service wiring and request dispatch

pub mod requests;
pub mod service;

pub use requests::{ExecutionOutcome, Request, Response};
pub use service::SniperService;
