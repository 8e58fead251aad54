use crate::pages::{PageContext, enter};
use crate::surface::{Page, Surface};
use api_client::Gate;

/// Session housekeeping: who am I, and log out.
pub struct AccountPage {
    ctx: PageContext,
}

impl AccountPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Verifies the session with the backend and shows the user it belongs to.
    pub async fn whoami(&self, surface: &mut dyn Surface) {
        let gate = self.ctx.guard.verify().await;
        let user_id = match &gate {
            Gate::Pass { user_id } => user_id.clone(),
            Gate::RedirectToLogin { .. } => None,
        };
        if enter(gate, surface) {
            surface.show_notice(&format!(
                "登录状态有效，用户ID：{}",
                user_id.as_deref().unwrap_or("未知")
            ));
        }
    }

    /// Forgets the stored token.
    pub fn logout(&self, surface: &mut dyn Surface) {
        match self.ctx.tokens.clear() {
            Ok(()) => {
                tracing::info!("Logged out.");
                surface.alert("已退出登录");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete the session token.");
                surface.alert(&format!("退出登录失败：{}", e));
            }
        }
        surface.navigate(Page::Login);
    }
}
