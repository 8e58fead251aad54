use core_types::Position;

/// The pages a user can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    Consult,
    Strategy,
    Trade,
}

impl Page {
    /// The CLI subcommand that opens this page.
    pub fn command(&self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Register => "register",
            Page::Consult => "consult",
            Page::Strategy => "strategy",
            Page::Trade => "trade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One bubble in a chat-style view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
    /// Rendered with the error styling.
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn assistant_error(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            is_error: true,
        }
    }
}

/// What the positions table shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionsView {
    Rows(Vec<Position>),
    /// A single full-width row explaining why there are no rows.
    Notice(String),
}

/// Everything a page can do to the screen.
pub trait Surface: Send {
    /// A blocking notification (login, register and trade outcomes).
    fn alert(&mut self, message: &str);

    /// Local validation feedback shown next to the input.
    fn show_validation_error(&mut self, message: &str);

    /// An informational line that is not part of a chat.
    fn show_notice(&mut self, message: &str);

    /// Shows a transient "working" element. At most one is visible.
    fn show_pending(&mut self, message: &str);

    /// Removes the pending element, if any.
    fn clear_pending(&mut self);

    fn append_message(&mut self, message: ChatMessage);

    fn render_positions(&mut self, view: &PositionsView);

    fn navigate(&mut self, page: Page);
}
