use crate::surface::{Page, Surface};
use api_client::{ApiClient, Gate, SessionGuard, TokenStore};
use std::sync::Arc;

mod account;
mod consult;
mod login;
mod register;
mod strategy;
mod trade;

pub use account::AccountPage;
pub use consult::ConsultPage;
pub use login::LoginPage;
pub use register::{DEFAULT_INITIAL_FUNDS, RegisterPage};
pub use strategy::{EMPTY_INSTRUCTION, StrategyPage};
pub use trade::{POSITIONS_EMPTY, POSITIONS_FAILED, POSITIONS_UNEXPECTED, TradePage};

/// The collaborators every page shares.
#[derive(Clone)]
pub struct PageContext {
    pub client: Arc<dyn ApiClient>,
    pub tokens: Arc<dyn TokenStore>,
    pub guard: SessionGuard,
}

impl PageContext {
    pub fn new(client: Arc<dyn ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        let guard = SessionGuard::new(client.clone(), tokens.clone());
        Self {
            client,
            tokens,
            guard,
        }
    }
}

/// Applies a session check to the surface. Returns whether the page may proceed.
fn enter(gate: Gate, surface: &mut dyn Surface) -> bool {
    match gate {
        Gate::Pass { .. } => true,
        Gate::RedirectToLogin { notice } => {
            if let Some(notice) = notice {
                surface.alert(&notice);
            }
            surface.navigate(Page::Login);
            false
        }
    }
}
