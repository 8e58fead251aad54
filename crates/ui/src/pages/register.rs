use crate::pages::PageContext;
use crate::render::{UNKNOWN_ERROR, non_empty};
use crate::surface::{Page, Surface};
use core_types::Registration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Starting balance offered to new accounts when none is given.
pub const DEFAULT_INITIAL_FUNDS: Decimal = dec!(10000);

pub struct RegisterPage {
    ctx: PageContext,
}

impl RegisterPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    pub async fn submit(
        &self,
        surface: &mut dyn Surface,
        username: &str,
        password: &str,
        confirm: &str,
        initial_funds: Decimal,
    ) {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            surface.alert("请输入用户名和密码");
            return;
        }
        if password != confirm {
            surface.alert("密码与确认密码不一致");
            return;
        }
        if initial_funds.is_sign_negative() {
            surface.alert("初始资金不能为负数");
            return;
        }

        let registration = Registration {
            username: username.to_string(),
            password: password.to_string(),
            initial_funds,
        };
        let result = self.ctx.client.register(&registration).await;

        if result.success {
            tracing::info!(username, "Registered a new account.");
            surface.alert("注册成功！请登录");
            surface.navigate(Page::Login);
        } else {
            let reason = non_empty(result.message.as_deref()).unwrap_or(UNKNOWN_ERROR);
            surface.alert(&format!("注册失败：{}", reason));
        }
    }
}
