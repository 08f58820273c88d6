//! Message Port Requests and Responses
//!
//! The host environment drives the core through discrete requests tagged by
//! an `action` string. Dispatch is a closed enum with exhaustive matching;
//! unknown action tags are rejected at the parse boundary with the
//! `Unknown action` error the host expects.

use serde::{Deserialize, Serialize};

use crate::domain::{ContextId, DevSellSignal, Order, OrderId, OrderInput, Settings};

/// Inbound request from the host environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Request {
    /// A monitoring context came online
    RegisterTab { context_id: ContextId },
    /// A monitoring context stopped monitoring
    UnregisterTab { context_id: ContextId },
    /// The watcher observed a dev sell
    DevSellDetected(DevSellSignal),
    /// Direct user-initiated buy, bypassing policy
    ExecuteBuyOrder(OrderInput),
    /// Snapshot of all tracked orders
    GetActiveSnipes,
    /// Current user settings
    GetSettings,
    /// Persist new user settings
    UpdateSettings(Settings),
    /// A context navigated to a new location
    ContextUpdated {
        context_id: ContextId,
        new_location: String,
    },
    /// A context was closed by the host
    ContextRemoved { context_id: ContextId },
}

/// Action tags accepted by [`Request`]. Kept next to the enum so the parse
/// boundary can tell an unknown action from otherwise malformed input.
const KNOWN_ACTIONS: &[&str] = &[
    "registerTab",
    "unregisterTab",
    "devSellDetected",
    "executeBuyOrder",
    "getActiveSnipes",
    "getSettings",
    "updateSettings",
    "contextUpdated",
    "contextRemoved",
];

impl Request {
    /// Parse a request from its JSON representation.
    ///
    /// An unrecognized `action` tag yields the literal `Unknown action`
    /// error; other malformed input yields the serde error message.
    pub fn parse(value: serde_json::Value) -> Result<Self, String> {
        match value.get("action").and_then(|a| a.as_str()) {
            None => return Err("Unknown action".to_string()),
            Some(action) if !KNOWN_ACTIONS.contains(&action) => {
                return Err("Unknown action".to_string())
            }
            Some(_) => {}
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }
}

/// Result of driving one buy order to a terminal state.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub order_id: OrderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outbound response to the host environment.
///
/// Every response carries `success`; error responses carry only the message.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Ack {
        success: bool,
    },
    Failure {
        success: bool,
        error: String,
    },
    Execution(ExecutionOutcome),
    Snipes {
        success: bool,
        active_snipes: Vec<(OrderId, Order)>,
    },
    CurrentSettings {
        success: bool,
        settings: Settings,
    },
}

impl Response {
    pub fn ok() -> Self {
        Response::Ack { success: true }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Failure {
            success: false,
            error: message.into(),
        }
    }

    pub fn snipes(active_snipes: Vec<(OrderId, Order)>) -> Self {
        Response::Snipes {
            success: true,
            active_snipes,
        }
    }

    pub fn settings(settings: Settings) -> Self {
        Response::CurrentSettings {
            success: true,
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_register_tab() {
        let request = Request::parse(json!({
            "action": "registerTab",
            "data": { "context_id": 42 }
        }))
        .unwrap();
        assert!(matches!(
            request,
            Request::RegisterTab {
                context_id: ContextId(42)
            }
        ));
    }

    #[test]
    fn test_parse_dev_sell_detected() {
        let request = Request::parse(json!({
            "action": "devSellDetected",
            "data": {
                "token_address": "TokenMint111",
                "sell_percentage": 15.0,
                "origin_context": 1
            }
        }))
        .unwrap();
        match request {
            Request::DevSellDetected(signal) => {
                assert_eq!(signal.token_address, "TokenMint111");
                assert_eq!(signal.sell_percentage, 15.0);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_parse_minimal_buy_order_defaults_to_manual() {
        let request = Request::parse(json!({
            "action": "executeBuyOrder",
            "data": {
                "token_address": "TokenMint111",
                "amount_native": 0.1,
                "slippage_bps": 10,
                "origin_context": 3
            }
        }))
        .unwrap();
        match request {
            Request::ExecuteBuyOrder(input) => {
                assert_eq!(input.trigger, crate::domain::OrderTrigger::Manual);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_rejected() {
        let err = Request::parse(json!({ "action": "selfDestruct" })).unwrap_err();
        assert_eq!(err, "Unknown action");
    }

    #[test]
    fn test_missing_action_rejected() {
        let err = Request::parse(json!({ "data": {} })).unwrap_err();
        assert_eq!(err, "Unknown action");
    }

    #[test]
    fn test_known_action_with_bad_payload_is_not_unknown() {
        let err = Request::parse(json!({
            "action": "registerTab",
            "data": { "context_id": "not a number" }
        }))
        .unwrap_err();
        assert_ne!(err, "Unknown action");
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(Response::error("Unknown action")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Unknown action");
    }

    #[test]
    fn test_ack_response_shape() {
        let json = serde_json::to_value(Response::ok()).unwrap();
        assert_eq!(json["success"], true);
    }
}
