//! # Stockpilot UI Crate
//!
//! The interactive pages of the advisory client: login, registration,
//! consultation chat, strategy generation and positions/trading. Each page
//! turns a user action into one call through the `api-client` pipeline and
//! renders the normalized result onto a [`Surface`].
//!
//! ## Public API
//!
//! - `Surface`: what a page may do to the screen; `TerminalSurface` draws it on a TTY.
//! - `PageContext`: the shared client, token store and session guard.
//! - One struct per page in [`pages`].

pub mod error;
pub mod pages;
pub mod render;
pub mod surface;
pub mod terminal;

pub use error::UiError;
pub use pages::{
    AccountPage, ConsultPage, DEFAULT_INITIAL_FUNDS, EMPTY_INSTRUCTION, LoginPage, POSITIONS_EMPTY,
    POSITIONS_FAILED, POSITIONS_UNEXPECTED, PageContext, RegisterPage, StrategyPage, TradePage,
};
pub use surface::{ChatMessage, Page, PositionsView, Speaker, Surface};
pub use terminal::TerminalSurface;
