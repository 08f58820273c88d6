//! Policy Evaluator
//!
//! Pure decision function: given one dev sell signal and the current user
//! settings, decide whether to fire a buy. The boundary is inclusive - a sell
//! percentage exactly equal to the threshold triggers. There is deliberately
//! no hysteresis, rate limiting, or per-token dedup: every qualifying signal
//! produces exactly one trigger evaluation.

use super::settings::Settings;
use super::signal::DevSellSignal;

/// Outcome of evaluating a signal against policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub triggered: bool,
    pub reason: String,
}

/// Evaluate a dev sell signal against the configured threshold.
pub fn evaluate(signal: &DevSellSignal, settings: &Settings) -> Decision {
    let threshold = settings.sell_threshold_pct as f64;
    if signal.sell_percentage >= threshold {
        Decision {
            triggered: true,
            reason: format!(
                "threshold met ({}% >= {}%)",
                signal.sell_percentage, threshold
            ),
        }
    } else {
        Decision {
            triggered: false,
            reason: format!(
                "threshold not met ({}% < {}%)",
                signal.sell_percentage, threshold
            ),
        }
    }
}
