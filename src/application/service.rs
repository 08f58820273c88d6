//! Sniper Service
//!
//! The background service at the center of the pipeline: dispatches host
//! requests, evaluates dev sell signals against policy, and drives buy orders
//! to a terminal state. Owns the order tracker and session registry for the
//! life of the process; collaborators are injected through the port traits.

use std::sync::Arc;

use crate::domain::{
    self, DevSellSignal, OrderInput, OrderOutcome, OrderTracker, OrderTrigger, SessionRegistry,
};
use crate::ports::{BuyRequest, ExecutionPort, NotificationEvent, NotificationSink, SettingsStore};

use super::requests::{ExecutionOutcome, Request, Response};

pub struct SniperService {
    tracker: Arc<OrderTracker>,
    sessions: SessionRegistry,
    executor: Arc<dyn ExecutionPort>,
    settings: Arc<dyn SettingsStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl SniperService {
    pub fn new(
        executor: Arc<dyn ExecutionPort>,
        settings: Arc<dyn SettingsStore>,
        notifier: Arc<dyn NotificationSink>,
        monitored_domain: impl Into<String>,
    ) -> Self {
        let tracker = Arc::new(OrderTracker::new());
        let sessions = SessionRegistry::new(Arc::clone(&tracker), monitored_domain);
        Self {
            tracker,
            sessions,
            executor,
            settings,
            notifier,
        }
    }

    pub fn tracker(&self) -> &OrderTracker {
        &self.tracker
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Dispatch one host request. Never returns an unhandled fault; every
    /// failure is folded into the response payload.
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::RegisterTab { context_id } => {
                self.sessions.register(context_id);
                Response::ok()
            }
            Request::UnregisterTab { context_id } => {
                self.sessions.unregister(context_id);
                Response::ok()
            }
            Request::DevSellDetected(signal) => {
                self.on_dev_sell(signal).await;
                Response::ok()
            }
            Request::ExecuteBuyOrder(input) => {
                Response::Execution(self.execute_buy(input).await)
            }
            Request::GetActiveSnipes => Response::snipes(self.tracker.list_all()),
            Request::GetSettings => Response::settings(self.settings.get().await),
            Request::UpdateSettings(settings) => match self.settings.set(settings).await {
                Ok(()) => Response::ok(),
                Err(e) => {
                    // Best-effort persistence; the caller learns, the core moves on
                    tracing::warn!(error = %e, "settings write failed");
                    Response::error(e.to_string())
                }
            },
            Request::ContextUpdated {
                context_id,
                new_location,
            } => {
                self.sessions.context_navigated(context_id, &new_location);
                Response::ok()
            }
            Request::ContextRemoved { context_id } => {
                self.sessions.context_closed(context_id);
                Response::ok()
            }
        }
    }

    /// Evaluate one dev sell signal against current policy and fire a buy if
    /// it qualifies. A rejected signal is not an error; it is logged and
    /// dropped.
    pub async fn on_dev_sell(&self, signal: DevSellSignal) {
        tracing::info!(
            token = %signal.token_address,
            sell_pct = signal.sell_percentage,
            dev_wallet = ?signal.dev_wallet,
            "dev sell detected"
        );

        // Settings read completes before evaluation; no stale reads within
        // a single evaluation.
        let settings = self.settings.get().await;
        let decision = domain::evaluate(&signal, &settings);

        if !decision.triggered {
            tracing::info!(reason = %decision.reason, "signal rejected by policy");
            return;
        }

        tracing::info!(reason = %decision.reason, "executing buy order");
        let input = OrderInput {
            token_address: signal.token_address,
            amount_native: settings.buy_amount_native,
            slippage_bps: settings.slippage_bps,
            origin_context: signal.origin_context,
            trigger: OrderTrigger::DevSell,
            trigger_sell_percentage: Some(signal.sell_percentage),
        };
        // The outcome is recorded on the order and reported through the
        // notifier; the signal path itself has no caller to inform.
        let _ = self.execute_buy(input).await;
    }

    /// Drive one buy order: create it, hand it to the external signer, apply
    /// the terminal transition, and report the outcome.
    ///
    /// No internal timeout is imposed on the signer call; the external
    /// executor owns its own cancellation. Every fault in this method's own
    /// control flow lands the order in `Failed`, never stuck `Executing`.
    pub async fn execute_buy(&self, input: OrderInput) -> ExecutionOutcome {
        // The signer call operates on data copied out of the input, never on
        // live tracker state.
        let token_address = input.token_address.clone();
        let amount_native = input.amount_native;
        let slippage_bps = input.slippage_bps;

        let order_id = self.tracker.create(input);
        let request = BuyRequest {
            order_id: order_id.clone(),
            token_address,
            amount_native,
            slippage_bps,
        };

        tracing::info!(order_id = %order_id, token = %request.token_address, "order executing");

        match self.executor.execute_buy(request).await {
            Ok(receipt) => {
                self.tracker.transition(
                    &order_id,
                    OrderOutcome::Completed {
                        signature: receipt.signature.clone(),
                    },
                );
                self.notifier
                    .report(NotificationEvent::success(
                        "Buy Order Executed!",
                        format!("Successfully bought {} SOL worth of tokens", amount_native),
                        &receipt.signature,
                    ))
                    .await;
                tracing::info!(order_id = %order_id, signature = %receipt.signature, "order completed");
                ExecutionOutcome {
                    success: true,
                    order_id,
                    signature: Some(receipt.signature),
                    error: None,
                }
            }
            Err(e) => {
                let error = e.to_string();
                self.tracker.transition(
                    &order_id,
                    OrderOutcome::Failed {
                        error: error.clone(),
                    },
                );
                self.notifier
                    .report(NotificationEvent::error("Buy Order Failed", error.clone()))
                    .await;
                tracing::warn!(order_id = %order_id, error = %error, "order failed");
                ExecutionOutcome {
                    success: false,
                    order_id,
                    signature: None,
                    error: Some(error),
                }
            }
        }
    }
}
