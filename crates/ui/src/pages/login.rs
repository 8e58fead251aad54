use crate::error::UiError;
use crate::pages::PageContext;
use crate::render::{UNKNOWN_ERROR, format_price, non_empty};
use crate::surface::{Page, Surface};
use api_client::ResultEnvelope;
use core_types::{Credentials, LoginReceipt};

pub struct LoginPage {
    ctx: PageContext,
}

impl LoginPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Submits the login form. On success the token replaces any stored
    /// one and the user is sent to the trade page.
    pub async fn submit(&self, surface: &mut dyn Surface, username: &str, password: &str) {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            surface.alert("请输入用户名和密码");
            return;
        }

        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let result = self.ctx.client.login(&credentials).await;

        if !result.success {
            let reason = non_empty(result.message.as_deref()).unwrap_or(UNKNOWN_ERROR);
            surface.alert(&format!("登录失败：{}", reason));
            return;
        }

        match self.accept(&result) {
            Ok(receipt) => {
                tracing::info!(username, user_id = ?receipt.user_id, "Logged in.");
                surface.alert("登录成功！");
                if let Some(summary) = account_summary(&receipt) {
                    surface.show_notice(&summary);
                }
                surface.navigate(Page::Trade);
            }
            Err(e) => {
                tracing::error!(error = %e, "Login response could not be used.");
                surface.alert(&format!("登录失败：{}", e));
            }
        }
    }

    fn accept(&self, result: &ResultEnvelope) -> Result<LoginReceipt, UiError> {
        let receipt: LoginReceipt = result.decode()?;
        if receipt.token.is_empty() {
            return Err(UiError::MissingData("未返回登录凭证".to_string()));
        }
        self.ctx.tokens.save(&receipt.token)?;
        Ok(receipt)
    }
}

fn account_summary(receipt: &LoginReceipt) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(user_id) = &receipt.user_id {
        parts.push(format!("用户ID：{}", user_id));
    }
    if let Some(balance) = receipt.balance {
        parts.push(format!("可用资金：{}", format_price(balance)));
    }
    if let Some(risk_profile) = &receipt.risk_profile {
        parts.push(format!("风险偏好：{}", risk_profile));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}
