#![allow(dead_code)]

use api_client::{HttpApiClient, MemoryTokenStore, TokenStore};
use configuration::ApiConfig;
use ui::{ChatMessage, Page, PageContext, PositionsView, Surface};
use std::sync::Arc;
use wiremock::MockServer;

/// Everything a page did to the screen, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Alert(String),
    ValidationError(String),
    Notice(String),
    Pending(String),
    PendingCleared,
    Message(ChatMessage),
    Positions(PositionsView),
    Navigate(Page),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<Event>,
}

impl RecordingSurface {
    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Alert(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<&ChatMessage> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn positions(&self) -> Vec<&PositionsView> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Positions(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<Page> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Navigate(page) => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn pending_is_clear(&self) -> bool {
        let shown = self
            .events
            .iter()
            .filter(|event| matches!(event, Event::Pending(_)))
            .count();
        let cleared = self
            .events
            .iter()
            .filter(|event| matches!(event, Event::PendingCleared))
            .count();
        shown == cleared
    }
}

impl Surface for RecordingSurface {
    fn alert(&mut self, message: &str) {
        self.events.push(Event::Alert(message.to_string()));
    }

    fn show_validation_error(&mut self, message: &str) {
        self.events.push(Event::ValidationError(message.to_string()));
    }

    fn show_notice(&mut self, message: &str) {
        self.events.push(Event::Notice(message.to_string()));
    }

    fn show_pending(&mut self, message: &str) {
        self.events.push(Event::Pending(message.to_string()));
    }

    fn clear_pending(&mut self) {
        self.events.push(Event::PendingCleared);
    }

    fn append_message(&mut self, message: ChatMessage) {
        self.events.push(Event::Message(message));
    }

    fn render_positions(&mut self, view: &PositionsView) {
        self.events.push(Event::Positions(view.clone()));
    }

    fn navigate(&mut self, page: Page) {
        self.events.push(Event::Navigate(page));
    }
}

/// A page context talking to `server`, with `token` pre-stored if given.
pub fn context(server: &MockServer, token: Option<&str>) -> (PageContext, Arc<MemoryTokenStore>) {
    let tokens = Arc::new(match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    });
    let config = ApiConfig {
        base_url: server.uri(),
        timeout_secs: None,
    };
    let store: Arc<dyn TokenStore> = tokens.clone();
    let client = HttpApiClient::new(&config, store.clone()).unwrap();
    (PageContext::new(Arc::new(client), store), tokens)
}
