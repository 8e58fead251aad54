use crate::error::UiError;
use crate::pages::{PageContext, enter};
use crate::render::{format_strategy, format_strategy_failure};
use crate::surface::{ChatMessage, Surface};
use api_client::ResultEnvelope;
use core_types::{StrategyPlan, StrategyRequest};

const PENDING: &str = "策略生成中，请稍候...预计1-5分钟";
pub const EMPTY_INSTRUCTION: &str = "请输入投资需求";

/// AI strategy generation, presented as a chat.
pub struct StrategyPage {
    ctx: PageContext,
}

impl StrategyPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Verifies the session with the backend. Returns `false` after
    /// redirecting to login.
    pub async fn open(&self, surface: &mut dyn Surface) -> bool {
        enter(self.ctx.guard.verify().await, surface)
    }

    pub async fn generate(&self, surface: &mut dyn Surface, input: &str) {
        let instruction = input.trim();
        if instruction.is_empty() {
            surface.show_validation_error(EMPTY_INSTRUCTION);
            return;
        }

        surface.append_message(ChatMessage::user(instruction));
        surface.show_pending(PENDING);

        let result = self
            .ctx
            .client
            .generate_strategy(&StrategyRequest {
                instruction: instruction.to_string(),
            })
            .await;

        surface.clear_pending();
        if let Err(e) = render_result(surface, &result) {
            tracing::warn!(error = %e, "Strategy response could not be rendered.");
            surface.append_message(ChatMessage::assistant_error(format!("策略生成失败：{}", e)));
        }
    }
}

fn render_result(surface: &mut dyn Surface, result: &ResultEnvelope) -> Result<(), UiError> {
    if !result.success {
        let text = format_strategy_failure(result.message(), &result.suggestions());
        surface.append_message(ChatMessage::assistant_error(text));
        return Ok(());
    }

    let plans: Vec<StrategyPlan> = result.data()?;
    let plan = plans
        .into_iter()
        .next()
        .ok_or_else(|| UiError::MissingData("未获取到策略数据".to_string()))?;

    surface.append_message(ChatMessage::assistant(format_strategy(&plan)));
    Ok(())
}
