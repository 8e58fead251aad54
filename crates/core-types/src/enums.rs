use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of a trade as the backend's `/trade` endpoint expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    /// The wire value sent in the `action` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = CoreError;

    /// Accepts the wire names as well as the labels shown on the trade form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "买入" => Ok(TradeAction::Buy),
            "sell" | "卖出" => Ok(TradeAction::Sell),
            other => Err(CoreError::InvalidInput(
                "action".to_string(),
                format!("expected buy or sell, got '{}'", other),
            )),
        }
    }
}
