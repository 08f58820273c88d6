//! Order Tracker
//!
//! In-memory registry of in-flight and completed orders. All mutations are
//! synchronous and non-suspending so interleaved async tasks never observe a
//! half-applied state; the only lock is a short-lived std mutex around the
//! map itself.
//!
//! Orders stay in the registry after completion and are removed only when
//! their owning context is torn down (`purge_by_context`). A long-lived
//! context therefore accumulates order history until it closes - an explicit
//! resource-lifetime policy, not a leak.

use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::order::{Order, OrderId, OrderInput, OrderOutcome, OrderStatus};
use super::ContextId;

/// Registry of all orders created during the process lifetime.
#[derive(Debug, Default)]
pub struct OrderTracker {
    orders: Mutex<HashMap<OrderId, Order>>,
    next_seq: AtomicU64,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh executing order and return its id. Non-blocking.
    ///
    /// Ids combine a process-lifetime monotonic counter with a random base36
    /// suffix, so uniqueness holds even across identical inputs.
    pub fn create(&self, input: OrderInput) -> OrderId {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let id = OrderId(format!("buy_{}_{}", seq, random_suffix()));
        let order = Order::new(input);
        self.orders
            .lock()
            .expect("order registry poisoned")
            .insert(id.clone(), order);
        id
    }

    /// Apply a terminal outcome to an executing order.
    ///
    /// Idempotent: an order that already reached a terminal state is left
    /// untouched (guards against duplicate completion callbacks), and an
    /// unknown id is a no-op (a late executor response for a purged order).
    pub fn transition(&self, id: &OrderId, outcome: OrderOutcome) {
        let mut orders = self.orders.lock().expect("order registry poisoned");
        let Some(order) = orders.get_mut(id) else {
            tracing::debug!(order_id = %id, "transition for unknown order ignored");
            return;
        };
        if order.status.is_terminal() {
            tracing::debug!(order_id = %id, status = ?order.status, "order already terminal");
            return;
        }
        match outcome {
            OrderOutcome::Completed { signature } => {
                order.status = OrderStatus::Completed;
                order.signature = Some(signature);
                order.completed_at = Some(chrono::Utc::now());
            }
            OrderOutcome::Failed { error } => {
                order.status = OrderStatus::Failed;
                order.error = Some(error);
                order.completed_at = Some(chrono::Utc::now());
            }
        }
    }

    /// Point-in-time copy of one order.
    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders
            .lock()
            .expect("order registry poisoned")
            .get(id)
            .cloned()
    }

    /// Point-in-time snapshot of every tracked order.
    pub fn list_all(&self) -> Vec<(OrderId, Order)> {
        self.orders
            .lock()
            .expect("order registry poisoned")
            .iter()
            .map(|(id, order)| (id.clone(), order.clone()))
            .collect()
    }

    /// Remove every order spawned by the given context, regardless of status.
    pub fn purge_by_context(&self, context: ContextId) {
        let mut orders = self.orders.lock().expect("order registry poisoned");
        let before = orders.len();
        orders.retain(|_, order| order.origin_context != context);
        let purged = before - orders.len();
        if purged > 0 {
            tracing::info!(context = %context, purged, "purged orders for closed context");
        }
    }

    pub fn len(&self) -> usize {
        self.orders.lock().expect("order registry poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderTrigger;
    use std::collections::HashSet;

    fn input(token: &str, context: u64) -> OrderInput {
        OrderInput {
            token_address: token.to_string(),
            amount_native: 0.1,
            slippage_bps: 10,
            origin_context: ContextId(context),
            trigger: OrderTrigger::DevSell,
            trigger_sell_percentage: Some(12.0),
        }
    }

    #[test]
    fn test_create_inserts_executing_order() {
        let tracker = OrderTracker::new();
        let id = tracker.create(input("ABC", 1));
        let order = tracker.get(&id).unwrap();
        assert_eq!(order.status, OrderStatus::Executing);
        assert_eq!(order.token_address, "ABC");
    }

    #[test]
    fn test_ids_are_unique() {
        let tracker = OrderTracker::new();
        let ids: HashSet<OrderId> = (0..1000).map(|_| tracker.create(input("ABC", 1))).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_transition_to_completed() {
        let tracker = OrderTracker::new();
        let id = tracker.create(input("ABC", 1));
        tracker.transition(
            &id,
            OrderOutcome::Completed {
                signature: "sig1".to_string(),
            },
        );
        let order = tracker.get(&id).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.signature.as_deref(), Some("sig1"));
        assert!(order.completed_at.is_some());
    }

    #[test]
    fn test_transition_is_idempotent_once_terminal() {
        let tracker = OrderTracker::new();
        let id = tracker.create(input("ABC", 1));
        tracker.transition(
            &id,
            OrderOutcome::Completed {
                signature: "sig1".to_string(),
            },
        );
        // Second transition with a different outcome is a no-op
        tracker.transition(
            &id,
            OrderOutcome::Failed {
                error: "late duplicate".to_string(),
            },
        );
        let order = tracker.get(&id).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.signature.as_deref(), Some("sig1"));
        assert!(order.error.is_none());
    }

    #[test]
    fn test_transition_unknown_id_is_noop() {
        let tracker = OrderTracker::new();
        tracker.transition(
            &OrderId("buy_0_missing".to_string()),
            OrderOutcome::Failed {
                error: "boom".to_string(),
            },
        );
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_purge_removes_all_statuses_for_context() {
        let tracker = OrderTracker::new();
        let a = tracker.create(input("ABC", 1));
        let _b = tracker.create(input("DEF", 1));
        let c = tracker.create(input("GHI", 2));
        tracker.transition(
            &a,
            OrderOutcome::Completed {
                signature: "sig".to_string(),
            },
        );

        tracker.purge_by_context(ContextId(1));

        let remaining = tracker.list_all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].0, c);
        assert!(remaining
            .iter()
            .all(|(_, o)| o.origin_context == ContextId(2)));
    }

    #[test]
    fn test_completed_orders_stay_until_purge() {
        let tracker = OrderTracker::new();
        let id = tracker.create(input("ABC", 1));
        tracker.transition(
            &id,
            OrderOutcome::Failed {
                error: "rejected".to_string(),
            },
        );
        assert!(tracker.get(&id).is_some());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_list_all_is_a_snapshot() {
        let tracker = OrderTracker::new();
        let id = tracker.create(input("ABC", 1));
        let snapshot = tracker.list_all();
        tracker.transition(
            &id,
            OrderOutcome::Completed {
                signature: "sig".to_string(),
            },
        );
        // Snapshot still shows the state at capture time
        assert_eq!(snapshot[0].1.status, OrderStatus::Executing);
    }
}
