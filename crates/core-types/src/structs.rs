use crate::enums::TradeAction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Request payloads ---

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    /// The starting cash balance of the new account.
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_funds: Decimal,
}

/// Body of `POST /knowledge`.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeQuestion {
    pub question: String,
}

/// Body of `POST /strategy`.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyRequest {
    pub instruction: String,
}

/// Body of `POST /trade`.
#[derive(Debug, Clone, Serialize)]
pub struct TradeOrder {
    pub action: TradeAction,
    pub stock_code: String,
    pub quantity: i64,
}

// --- Response fields ---

/// The fields returned by a successful `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReceipt {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub risk_profile: Option<String>,
}

/// The fields returned by `GET /check-auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// A single holding from `GET /positions`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Position {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
}

/// The fields returned by a successful `POST /trade`.
///
/// Read leniently: an accepted order must never look like a failed one
/// because an id arrived as a number or a field is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeReceipt {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub transaction_id: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl TradeReceipt {
    pub fn message_text(&self) -> Option<String> {
        value_text(self.message.as_ref())
    }

    pub fn transaction_id_text(&self) -> Option<String> {
        value_text(self.transaction_id.as_ref())
    }

    pub fn timestamp_text(&self) -> Option<String> {
        value_text(self.timestamp.as_ref())
    }
}

/// A stock recommended as part of a [`StrategyPlan`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecommendedStock {
    #[serde(default)]
    pub name: Option<Value>,
    /// Generators sometimes emit codes as numbers, e.g. `600000`.
    #[serde(default)]
    pub code: Option<Value>,
}

impl RecommendedStock {
    pub fn name_text(&self) -> Option<String> {
        value_text(self.name.as_ref())
    }

    pub fn code_text(&self) -> Option<String> {
        value_text(self.code.as_ref())
    }
}

/// One generated investment strategy from `POST /strategy`.
///
/// Every field is optional and untyped: the generator is free-form and the
/// UI substitutes placeholders for anything missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPlan {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub risk_level: Option<Value>,
    /// Arrives as either a number or a preformatted string such as "8%-12%".
    #[serde(default)]
    pub annual_return: Option<Value>,
    #[serde(default)]
    pub recommended_stocks: Option<Vec<RecommendedStock>>,
}

impl StrategyPlan {
    pub fn title_text(&self) -> Option<String> {
        value_text(self.title.as_ref())
    }

    pub fn description_text(&self) -> Option<String> {
        value_text(self.description.as_ref())
    }

    pub fn risk_level_text(&self) -> Option<String> {
        value_text(self.risk_level.as_ref())
    }

    /// The annual return as display text, if the generator supplied one.
    pub fn annual_return_text(&self) -> Option<String> {
        value_text(self.annual_return.as_ref())
    }
}

/// Display text for a free-form JSON field. Null and blank strings are absent.
fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
