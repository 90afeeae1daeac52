use meridian_core::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// When the settlement loop runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMode {
    /// Only when the caller invokes `settle()`
    #[default]
    OnDemand,
    /// After every submission; fills are buffered until the next `settle()`
    OnSubmit,
}

/// How a market order's price is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPricing {
    /// Re-resolved on every comparison and fill
    #[default]
    Floating,
    /// Resolved once at creation and fixed from then on
    Captured,
}

/// Settlement engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Last ask price before any trade happens
    pub initial_ask_price: Price,
    /// Last bid price before any trade happens
    pub initial_bid_price: Price,
    pub settlement: SettlementMode,
    pub market_pricing: MarketPricing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_market_price(Decimal::ONE)
    }
}

impl EngineConfig {
    /// Seed both sides' last price with the same value
    pub fn with_market_price(price: Price) -> Self {
        Self {
            initial_ask_price: price,
            initial_bid_price: price,
            settlement: SettlementMode::default(),
            market_pricing: MarketPricing::default(),
        }
    }

    pub fn settlement(mut self, mode: SettlementMode) -> Self {
        self.settlement = mode;
        self
    }

    pub fn market_pricing(mut self, pricing: MarketPricing) -> Self {
        self.market_pricing = pricing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.initial_ask_price, dec!(1));
        assert_eq!(config.initial_bid_price, dec!(1));
        assert_eq!(config.settlement, SettlementMode::OnDemand);
        assert_eq!(config.market_pricing, MarketPricing::Floating);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"initial_ask_price":"10","settlement":"on_submit"}"#)
                .unwrap();
        assert_eq!(config.initial_ask_price, dec!(10));
        assert_eq!(config.initial_bid_price, dec!(1));
        assert_eq!(config.settlement, SettlementMode::OnSubmit);
        assert_eq!(config.market_pricing, MarketPricing::Floating);
    }
}
