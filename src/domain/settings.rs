//! User Policy Settings
//!
//! The three knobs the user controls: sell threshold, buy amount, slippage.
//! Missing fields fall back to per-field defaults so a partially written
//! settings document still deserializes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SELL_THRESHOLD_PCT: u32 = 10;
pub const DEFAULT_BUY_AMOUNT_NATIVE: f64 = 0.1;
pub const DEFAULT_SLIPPAGE_BPS: u32 = 10;

/// User policy for the sniper.
///
/// Values are accepted as-is; out-of-range settings (e.g. a threshold above
/// 100) are a documented limitation and not rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Dev sell percentage at which a buy triggers (inclusive boundary)
    #[serde(default = "default_sell_threshold")]
    pub sell_threshold_pct: u32,
    /// Amount of native currency (SOL) to spend per buy
    #[serde(default = "default_buy_amount")]
    pub buy_amount_native: f64,
    /// Slippage tolerance in basis points
    #[serde(default = "default_slippage")]
    pub slippage_bps: u32,
}

fn default_sell_threshold() -> u32 {
    DEFAULT_SELL_THRESHOLD_PCT
}

fn default_buy_amount() -> f64 {
    DEFAULT_BUY_AMOUNT_NATIVE
}

fn default_slippage() -> u32 {
    DEFAULT_SLIPPAGE_BPS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sell_threshold_pct: DEFAULT_SELL_THRESHOLD_PCT,
            buy_amount_native: DEFAULT_BUY_AMOUNT_NATIVE,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sell_threshold_pct, 10);
        assert_eq!(settings.buy_amount_native, 0.1);
        assert_eq!(settings.slippage_bps, 10);
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_fields_fall_back_individually() {
        let settings: Settings = serde_json::from_str(r#"{"sell_threshold_pct": 25}"#).unwrap();
        assert_eq!(settings.sell_threshold_pct, 25);
        assert_eq!(settings.buy_amount_native, 0.1);
        assert_eq!(settings.slippage_bps, 10);
    }

    #[test]
    fn test_roundtrip() {
        let settings = Settings {
            sell_threshold_pct: 15,
            buy_amount_native: 0.5,
            slippage_bps: 100,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_out_of_range_values_accepted() {
        // No range validation on user policy values
        let settings: Settings =
            serde_json::from_str(r#"{"sell_threshold_pct": 250, "slippage_bps": 99999}"#).unwrap();
        assert_eq!(settings.sell_threshold_pct, 250);
        assert_eq!(settings.slippage_bps, 99999);
    }
}
