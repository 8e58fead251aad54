use crate::pages::{PageContext, enter};
use crate::render::{UNKNOWN_ERROR, non_empty};
use crate::surface::{ChatMessage, Surface};
use core_types::KnowledgeQuestion;

const PENDING: &str = "正在为您解答，请稍候...";

/// The "ask the assistant" chat.
pub struct ConsultPage {
    ctx: PageContext,
}

impl ConsultPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Verifies the session with the backend. Returns `false` after
    /// redirecting to login.
    pub async fn open(&self, surface: &mut dyn Surface) -> bool {
        enter(self.ctx.guard.verify().await, surface)
    }

    /// Sends one question. Blank input is ignored.
    pub async fn send_message(&self, surface: &mut dyn Surface, input: &str) {
        let question = input.trim();
        if question.is_empty() {
            return;
        }

        surface.append_message(ChatMessage::user(question));
        surface.show_pending(PENDING);

        let result = self
            .ctx
            .client
            .ask_knowledge(&KnowledgeQuestion {
                question: question.to_string(),
            })
            .await;

        surface.clear_pending();
        if result.success {
            surface.append_message(ChatMessage::assistant(result.message()));
        } else {
            let reason = non_empty(result.message.as_deref()).unwrap_or(UNKNOWN_ERROR);
            surface.append_message(ChatMessage::assistant_error(format!("咨询失败：{}", reason)));
        }
    }
}
