//! Recording mocks for the port traits, used by unit and integration tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::Settings;

use super::execution::{BuyReceipt, BuyRequest, ExecutionPort, ExecutorError};
use super::notifications::{NotificationEvent, NotificationSink};
use super::settings_store::{SettingsStore, StoreError};

/// Mock executor that records requests and replays queued responses.
#[derive(Default)]
pub struct MockExecutor {
    calls: Arc<Mutex<Vec<BuyRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<BuyReceipt, ExecutorError>>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to queue a successful execution with the given receipt
    pub fn with_success(self, signature: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(BuyReceipt {
            signature: signature.to_string(),
        }));
        self
    }

    /// Builder method to queue a failed execution
    pub fn with_failure(self, error: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ExecutorError::ExecutionFailed(error.to_string())));
        self
    }

    /// Get all recorded requests
    pub fn get_calls(&self) -> Vec<BuyRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionPort for MockExecutor {
    async fn execute_buy(&self, request: BuyRequest) -> Result<BuyReceipt, ExecutorError> {
        self.calls.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ExecutorError::BridgeUnavailable(
                    "No response configured".to_string(),
                ))
            })
    }
}

/// Mock notification sink that records every reported event.
#[derive(Default)]
pub struct MockNotifier {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for MockNotifier {
    async fn report(&self, event: NotificationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// In-memory settings store for tests.
pub struct MemorySettingsStore {
    settings: Mutex<Settings>,
    fail_writes: bool,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
            fail_writes: false,
        }
    }

    /// Builder method to make every write fail
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self) -> Settings {
        self.settings.lock().unwrap().clone()
    }

    async fn set(&self, settings: Settings) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteFailed("store unavailable".to_string()));
        }
        *self.settings.lock().unwrap() = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderId;

    fn request() -> BuyRequest {
        BuyRequest {
            order_id: OrderId("buy_0_test".to_string()),
            token_address: "TokenMint111".to_string(),
            amount_native: 0.1,
            slippage_bps: 10,
        }
    }

    #[tokio::test]
    async fn test_mock_executor_replays_responses_in_order() {
        let executor = MockExecutor::new().with_success("sig1").with_failure("boom");

        let first = executor.execute_buy(request()).await;
        assert_eq!(first.unwrap().signature, "sig1");

        let second = executor.execute_buy(request()).await;
        assert!(second.is_err());

        assert_eq!(executor.get_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_executor_errs_without_configured_response() {
        let executor = MockExecutor::new();
        let result = executor.execute_buy(request()).await;
        assert!(matches!(result, Err(ExecutorError::BridgeUnavailable(_))));
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemorySettingsStore::default();
        let mut settings = store.get().await;
        settings.sell_threshold_pct = 42;
        store.set(settings.clone()).await.unwrap();
        assert_eq!(store.get().await, settings);
    }

    #[tokio::test]
    async fn test_memory_store_failing_writes() {
        let store = MemorySettingsStore::default().with_failing_writes();
        let result = store.set(Settings::default()).await;
        assert!(matches!(result, Err(StoreError::WriteFailed(_))));
    }
}
