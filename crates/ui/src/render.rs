//! Text formatting shared by every surface.

use core_types::{Position, StrategyPlan, TradeReceipt};
use rust_decimal::Decimal;

pub const UNKNOWN_ERROR: &str = "未知错误";
/// Placeholder for a value the backend did not supply.
const UNKNOWN: &str = "未知";

/// Prices are shown in yuan with two decimals, e.g. `￥10.50`.
pub fn format_price(price: Decimal) -> String {
    format!("￥{:.2}", price.round_dp(2))
}

/// The four cells of a positions row: code, name, quantity, price.
pub fn position_cells(position: &Position) -> [String; 4] {
    [
        position.code.clone(),
        position.name.clone(),
        position.quantity.to_string(),
        format_price(position.price),
    ]
}

/// Multi-line rendering of a generated strategy, with placeholders for gaps.
pub fn format_strategy(plan: &StrategyPlan) -> String {
    let title = plan.title_text().unwrap_or_else(|| "智能投资策略".to_string());
    let description = plan
        .description_text()
        .unwrap_or_else(|| "未获取到策略描述".to_string());
    let risk_level = plan.risk_level_text().unwrap_or_else(|| UNKNOWN.to_string());
    let annual_return = plan.annual_return_text().unwrap_or_else(|| "N/A".to_string());

    let stocks = plan
        .recommended_stocks
        .as_deref()
        .filter(|stocks| !stocks.is_empty())
        .map(|stocks| {
            stocks
                .iter()
                .map(|stock| {
                    format!(
                        "{}({})",
                        stock.name_text().unwrap_or_else(|| UNKNOWN.to_string()),
                        stock.code_text().unwrap_or_else(|| UNKNOWN.to_string())
                    )
                })
                .collect::<Vec<_>>()
                .join("、")
        })
        .unwrap_or_else(|| "无推荐股票".to_string());

    format!(
        "{}\n{}\n风险等级：{} | 历史年化收益：{}\n推荐股票：{}",
        title, description, risk_level, annual_return, stocks
    )
}

/// The inline error for a rejected strategy request.
pub fn format_strategy_failure(message: &str, suggestions: &[String]) -> String {
    let advice = if suggestions.is_empty() {
        "无具体建议".to_string()
    } else {
        suggestions.join(" ")
    };
    format!("{}\n建议：{}", message, advice)
}

/// Built for every accepted order, whatever shape the receipt fields take.
pub fn trade_success_alert(receipt: &TradeReceipt) -> String {
    let headline = match receipt.message_text() {
        Some(message) => format!("交易成功：{}", message),
        None => "交易成功".to_string(),
    };
    format!(
        "{}\n交易ID：{}\n时间：{}",
        headline,
        receipt.transaction_id_text().unwrap_or_else(|| UNKNOWN.to_string()),
        receipt.timestamp_text().unwrap_or_else(|| UNKNOWN.to_string())
    )
}

/// The backend prefixes business failures with `交易失败:`; only the
/// explanation after the last prefix is shown.
pub fn trade_failure_alert(message: &str) -> String {
    let detail = message
        .rsplit("交易失败:")
        .next()
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .unwrap_or(UNKNOWN_ERROR);
    format!("交易失败：{}", detail)
}

/// `text` unless it is blank.
pub fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}
