use crate::ApiClient;
use crate::token_store::TokenStore;
use core_types::AuthStatus;
use std::sync::Arc;

/// Shown when a page that only checks for a local token finds none.
pub const LOGIN_REQUIRED_NOTICE: &str = "请先登录！";
/// Shown whenever the backend rejects the session or verifying it fails.
pub const SESSION_EXPIRED_NOTICE: &str = "登录状态异常，请重新登录";

/// The outcome of a session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// The page may proceed.
    Pass { user_id: Option<String> },
    /// The page must not proceed; the user belongs on the login page.
    RedirectToLogin { notice: Option<String> },
}

impl Gate {
    pub fn is_pass(&self) -> bool {
        matches!(self, Gate::Pass { .. })
    }

    fn redirect(notice: Option<&str>) -> Self {
        Gate::RedirectToLogin {
            notice: notice.map(str::to_string),
        }
    }
}

/// Decides whether a protected page may run.
///
/// The guard never leaves the caller in between: every path ends in
/// either [`Gate::Pass`] or [`Gate::RedirectToLogin`].
#[derive(Clone)]
pub struct SessionGuard {
    client: Arc<dyn ApiClient>,
    tokens: Arc<dyn TokenStore>,
}

impl SessionGuard {
    pub fn new(client: Arc<dyn ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }

    /// Local check only: passes if a token is stored. Makes no network call.
    pub fn require_token(&self) -> Gate {
        match self.tokens.load() {
            Ok(Some(_)) => Gate::Pass { user_id: None },
            Ok(None) => {
                tracing::info!("No session token stored; redirecting to login.");
                Gate::redirect(Some(LOGIN_REQUIRED_NOTICE))
            }
            Err(e) => {
                tracing::error!(error = %e, "Session check failed.");
                Gate::redirect(Some(SESSION_EXPIRED_NOTICE))
            }
        }
    }

    /// Server-verified check for pages that act on the user's behalf.
    ///
    /// With no token stored this redirects without a network call. A
    /// rejected token is deleted before redirecting.
    pub async fn verify(&self) -> Gate {
        match self.tokens.load() {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::info!("No session token stored; redirecting to login.");
                return Gate::redirect(None);
            }
            Err(e) => {
                tracing::error!(error = %e, "Session check failed.");
                return Gate::redirect(Some(SESSION_EXPIRED_NOTICE));
            }
        }

        let result = self.client.check_auth().await;
        if !result.success {
            tracing::info!(reason = result.message(), "Backend rejected the session token.");
            if let Err(e) = self.tokens.clear() {
                tracing::error!(error = %e, "Failed to delete the rejected session token.");
            }
            return Gate::redirect(Some(SESSION_EXPIRED_NOTICE));
        }

        let user_id = result
            .decode::<AuthStatus>()
            .ok()
            .and_then(|status| status.user_id);
        tracing::debug!(user_id = ?user_id, "Session verified.");
        Gate::Pass { user_id }
    }
}
