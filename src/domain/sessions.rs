//! Monitoring Session Registry
//!
//! Tracks which monitoring contexts (host tabs) are active and garbage
//! collects their orders on teardown. Unregistering a context is the only
//! deletion path for orders.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::tracker::OrderTracker;
use super::ContextId;

/// Active monitoring sessions, keyed by context id.
#[derive(Debug)]
pub struct SessionRegistry {
    active: Mutex<HashSet<ContextId>>,
    tracker: Arc<OrderTracker>,
    /// Domain a context must stay on to keep its session alive
    monitored_domain: String,
}

impl SessionRegistry {
    pub fn new(tracker: Arc<OrderTracker>, monitored_domain: impl Into<String>) -> Self {
        Self {
            active: Mutex::new(HashSet::new()),
            tracker,
            monitored_domain: monitored_domain.into(),
        }
    }

    /// Add a context to the active set. Idempotent.
    pub fn register(&self, context: ContextId) {
        self.active
            .lock()
            .expect("session registry poisoned")
            .insert(context);
        tracing::info!(context = %context, "registered monitoring context");
    }

    /// Remove a context and purge every order it spawned.
    pub fn unregister(&self, context: ContextId) {
        self.active
            .lock()
            .expect("session registry poisoned")
            .remove(&context);
        self.tracker.purge_by_context(context);
        tracing::info!(context = %context, "unregistered monitoring context");
    }

    /// A registered context navigated somewhere. If the new location left the
    /// monitored domain the session is torn down.
    pub fn context_navigated(&self, context: ContextId, new_location: &str) {
        if self.is_registered(context) && !new_location.contains(&self.monitored_domain) {
            tracing::info!(
                context = %context,
                location = new_location,
                "context navigated away from monitored domain"
            );
            self.unregister(context);
        }
    }

    /// A context was closed by the host. Always tears the session down.
    pub fn context_closed(&self, context: ContextId) {
        self.unregister(context);
    }

    pub fn is_registered(&self, context: ContextId) -> bool {
        self.active
            .lock()
            .expect("session registry poisoned")
            .contains(&context)
    }

    pub fn active_count(&self) -> usize {
        self.active.lock().expect("session registry poisoned").len()
    }
}
