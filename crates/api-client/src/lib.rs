use crate::envelope::server_message;
use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::{Credentials, KnowledgeQuestion, Registration, StrategyRequest, TradeOrder};
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;

pub mod envelope;
pub mod error;
pub mod session;
pub mod token_store;

// --- Public API ---
pub use envelope::ResultEnvelope;
pub use error::{ApiError, TokenStoreError};
pub use reqwest::Method;
pub use session::{Gate, SessionGuard};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Backend endpoint paths.
pub mod endpoints {
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const CHECK_AUTH: &str = "/check-auth";
    pub const KNOWLEDGE: &str = "/knowledge";
    pub const STRATEGY: &str = "/strategy";
    pub const POSITIONS: &str = "/positions";
    pub const TRADE: &str = "/trade";
}

/// The interface every page uses to talk to the backend.
///
/// `request` never fails: transport errors, error statuses and malformed
/// bodies all come back as a [`ResultEnvelope`] with `success == false`.
/// Callers branch on that flag only.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Sends one authenticated request. `payload` is ignored for GET.
    async fn request(&self, path: &str, method: Method, payload: Value) -> ResultEnvelope;

    async fn get(&self, path: &str) -> ResultEnvelope {
        self.request(path, Method::GET, Value::Object(Map::new()))
            .await
    }

    async fn post(&self, path: &str, payload: Value) -> ResultEnvelope {
        self.request(path, Method::POST, payload).await
    }

    async fn login(&self, credentials: &Credentials) -> ResultEnvelope {
        match to_payload(credentials) {
            Ok(payload) => self.post(endpoints::LOGIN, payload).await,
            Err(failed) => failed,
        }
    }

    async fn register(&self, registration: &Registration) -> ResultEnvelope {
        match to_payload(registration) {
            Ok(payload) => self.post(endpoints::REGISTER, payload).await,
            Err(failed) => failed,
        }
    }

    async fn check_auth(&self) -> ResultEnvelope {
        self.get(endpoints::CHECK_AUTH).await
    }

    async fn ask_knowledge(&self, question: &KnowledgeQuestion) -> ResultEnvelope {
        match to_payload(question) {
            Ok(payload) => self.post(endpoints::KNOWLEDGE, payload).await,
            Err(failed) => failed,
        }
    }

    async fn generate_strategy(&self, request: &StrategyRequest) -> ResultEnvelope {
        match to_payload(request) {
            Ok(payload) => self.post(endpoints::STRATEGY, payload).await,
            Err(failed) => failed,
        }
    }

    async fn positions(&self) -> ResultEnvelope {
        self.get(endpoints::POSITIONS).await
    }

    async fn trade(&self, order: &TradeOrder) -> ResultEnvelope {
        match to_payload(order) {
            Ok(payload) => self.post(endpoints::TRADE, payload).await,
            Err(failed) => failed,
        }
    }
}

fn to_payload<T: Serialize>(value: &T) -> Result<Value, ResultEnvelope> {
    serde_json::to_value(value).map_err(|e| ResultEnvelope::failure(e.to_string()))
}

/// The reqwest-backed implementation of [`ApiClient`].
#[derive(Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpApiClient {
    pub fn new(api_config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = api_config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bearer value for the current token. A missing token is sent as
    /// an empty credential; the backend decides whether that is fatal.
    fn bearer(&self) -> String {
        let token = self.tokens.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read the session token; sending an empty credential.");
            None
        });
        format!("Bearer {}", token.unwrap_or_default())
    }

    async fn send(&self, path: &str, method: &Method, payload: &Value) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.bearer());
        if *method != Method::GET {
            // Also sets `Content-Type: application/json`.
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<Value>(&text)
                .map_err(|e| ApiError::Deserialization(e.to_string()))
        } else {
            let body = serde_json::from_str::<Value>(&text).ok();
            Err(ApiError::Status {
                status: status.as_u16(),
                message: body.as_ref().and_then(server_message),
            })
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn request(&self, path: &str, method: Method, payload: Value) -> ResultEnvelope {
        let started = Instant::now();

        match self.send(path, &method, &payload).await {
            Ok(body) => {
                let envelope = ResultEnvelope::from_body(body);
                tracing::debug!(
                    %method,
                    path,
                    success = envelope.success,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "API request completed."
                );
                envelope
            }
            Err(e) => {
                tracing::warn!(
                    %method,
                    path,
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "API request failed."
                );
                ResultEnvelope::failure(e.user_message())
            }
        }
    }
}
