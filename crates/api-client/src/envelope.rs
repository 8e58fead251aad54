use crate::error::ApiError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// The uniform result of every backend call.
///
/// `success` is always present. On the success path the remaining fields
/// are the backend's JSON body as received; on the failure path `message`
/// carries the best available explanation and `fields` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ResultEnvelope {
    /// Wraps a body the backend returned with a non-error status.
    ///
    /// Bodies without a `success` flag are successes (the HTTP status
    /// already said so); a flag that is present but not a boolean is a
    /// failure. Non-object bodies land under `data`. A `message` that is
    /// not a string stays in `fields` untouched.
    pub fn from_body(body: Value) -> Self {
        let mut fields = match body {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        let success = match fields.remove("success") {
            Some(Value::Bool(flag)) => flag,
            None => true,
            Some(other) => {
                tracing::warn!(success = %other, "Response carries a non-boolean success flag.");
                false
            }
        };
        let message = match fields.remove("message") {
            Some(Value::String(text)) => Some(text),
            Some(other) => {
                fields.insert("message".to_string(), other);
                None
            }
            None => None,
        };

        Self {
            success,
            message,
            fields,
        }
    }

    /// A failed result carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            fields: Map::new(),
        }
    }

    /// The message text, or an empty string when the backend sent none.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The envelope as a single JSON object, `success` and `message` included.
    pub fn to_value(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert("success".to_string(), Value::Bool(self.success));
        if let Some(message) = &self.message {
            map.insert("message".to_string(), Value::String(message.clone()));
        }
        Value::Object(map)
    }

    /// Decodes the whole envelope into an endpoint-specific type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.to_value())
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Decodes the `data` field, treating a missing or null `data` as `T::default()`.
    pub fn data<T: DeserializeOwned + Default>(&self) -> Result<T, ApiError> {
        match self.fields.get("data") {
            None | Some(Value::Null) => Ok(T::default()),
            Some(data) => serde_json::from_value(data.clone())
                .map_err(|e| ApiError::Deserialization(e.to_string())),
        }
    }

    /// The string items of a `suggestions` array, if any.
    pub fn suggestions(&self) -> Vec<String> {
        match self.fields.get("suggestions") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Picks a human-readable explanation out of an error body.
///
/// Handles the plain `{"message": ...}` shape as well as FastAPI's
/// `{"detail": "..."}` and `{"detail": [{"msg": ...}]}` shapes.
pub(crate) fn server_message(body: &Value) -> Option<String> {
    fn non_empty(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    if let Some(message) = body.get("message").and_then(non_empty) {
        return Some(message);
    }

    match body.get("detail")? {
        Value::String(_) => body.get("detail").and_then(non_empty),
        Value::Object(detail) => detail.get("message").and_then(non_empty),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(non_empty))
            .next(),
        _ => None,
    }
}
