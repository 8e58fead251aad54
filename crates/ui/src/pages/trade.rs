use crate::error::UiError;
use crate::pages::{PageContext, enter};
use crate::render::{trade_failure_alert, trade_success_alert};
use crate::surface::{PositionsView, Surface};
use api_client::ResultEnvelope;
use core_types::{Position, TradeAction, TradeOrder, TradeReceipt};

const PENDING: &str = "提交中...⌛";
pub const POSITIONS_FAILED: &str = "获取持仓数据失败，请检查网络或重试";
pub const POSITIONS_EMPTY: &str = "当前无持仓股票";
pub const POSITIONS_UNEXPECTED: &str = "加载持仓数据时发生未知错误";

/// Positions table plus the trade entry form.
pub struct TradePage {
    ctx: PageContext,
}

impl TradePage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Checks for a stored token (no network call) and loads positions.
    /// Returns `false` after redirecting to login.
    pub async fn open(&self, surface: &mut dyn Surface) -> bool {
        if !enter(self.ctx.guard.require_token(), surface) {
            return false;
        }
        self.load_positions(surface).await;
        true
    }

    pub async fn load_positions(&self, surface: &mut dyn Surface) {
        let result = self.ctx.client.positions().await;
        let view = positions_view(&result).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Positions response could not be rendered.");
            PositionsView::Notice(POSITIONS_UNEXPECTED.to_string())
        });
        surface.render_positions(&view);
    }

    /// Submits the trade form. The raw field values are validated here;
    /// positions are reloaded once the backend has answered.
    pub async fn submit_trade(
        &self,
        surface: &mut dyn Surface,
        action: &str,
        stock_code: &str,
        quantity: &str,
    ) {
        let order = match parse_order(action, stock_code, quantity) {
            Ok(order) => order,
            Err(message) => {
                surface.alert(&message);
                return;
            }
        };

        surface.show_pending(PENDING);
        let result = self.ctx.client.trade(&order).await;
        surface.clear_pending();

        let alert = if result.success {
            // The order went through; an unreadable receipt only loses detail.
            let receipt = result.decode::<TradeReceipt>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Trade receipt could not be read.");
                TradeReceipt::default()
            });
            tracing::info!(
                action = %order.action,
                stock_code = %order.stock_code,
                quantity = order.quantity,
                transaction_id = ?receipt.transaction_id_text(),
                "Trade executed."
            );
            trade_success_alert(&receipt)
        } else {
            trade_failure_alert(result.message())
        };
        surface.alert(&alert);

        self.load_positions(surface).await;
    }
}

fn positions_view(result: &ResultEnvelope) -> Result<PositionsView, UiError> {
    if !result.success {
        return Ok(PositionsView::Notice(POSITIONS_FAILED.to_string()));
    }

    let positions: Vec<Position> = result.data()?;
    if positions.is_empty() {
        Ok(PositionsView::Notice(POSITIONS_EMPTY.to_string()))
    } else {
        Ok(PositionsView::Rows(positions))
    }
}

/// Validates the form fields into an order, or returns the message to show.
fn parse_order(action: &str, stock_code: &str, quantity: &str) -> Result<TradeOrder, String> {
    let action: TradeAction = action
        .parse()
        .map_err(|_| "请选择交易类型（buy 或 sell）".to_string())?;

    let stock_code = stock_code.trim();
    if stock_code.is_empty() {
        return Err("请输入股票代码".to_string());
    }

    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| "请输入有效的交易数量".to_string())?;
    if quantity <= 0 {
        return Err("交易数量必须大于0".to_string());
    }

    Ok(TradeOrder {
        action,
        stock_code: stock_code.to_string(),
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_order_accepts_form_values() {
        let order = parse_order("buy", " 600000 ", "100").unwrap();
        assert_eq!(order.action, TradeAction::Buy);
        assert_eq!(order.stock_code, "600000");
        assert_eq!(order.quantity, 100);
    }

    #[test]
    fn parse_order_rejects_bad_fields() {
        assert_eq!(parse_order("hold", "600000", "100").unwrap_err(), "请选择交易类型（buy 或 sell）");
        assert_eq!(parse_order("sell", "  ", "100").unwrap_err(), "请输入股票代码");
        assert_eq!(parse_order("sell", "600000", "ten").unwrap_err(), "请输入有效的交易数量");
        assert_eq!(parse_order("sell", "600000", "1.5").unwrap_err(), "请输入有效的交易数量");
        assert_eq!(parse_order("sell", "600000", "0").unwrap_err(), "交易数量必须大于0");
    }

    #[test]
    fn positions_view_covers_every_outcome() {
        let failed = ResultEnvelope::failure("请求失败");
        assert_eq!(
            positions_view(&failed).unwrap(),
            PositionsView::Notice(POSITIONS_FAILED.to_string())
        );

        let empty = ResultEnvelope::from_body(json!({"data": []}));
        assert_eq!(
            positions_view(&empty).unwrap(),
            PositionsView::Notice(POSITIONS_EMPTY.to_string())
        );

        let malformed = ResultEnvelope::from_body(json!({"data": [{"code": 600000}]}));
        assert!(positions_view(&malformed).is_err());
    }
}
