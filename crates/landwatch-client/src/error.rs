//! Error types for the client crate.

use serde_json::Value;
use thiserror::Error;

/// Everything that can go wrong between a UI event and a usable response.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Success status, but the payload reports a failure.
    #[error("{message}")]
    Application { message: String },

    /// The response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// A payload could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ClientError {
    /// The message the server put in its payload, if any.
    ///
    /// For HTTP errors this is the `message` (or `error`) field of a JSON body.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ClientError::Http { body, .. } => {
                let value: Value = serde_json::from_str(body).ok()?;
                ["message", "error"]
                    .iter()
                    .find_map(|key| value.get(*key).and_then(Value::as_str))
                    .filter(|m| !m.trim().is_empty())
                    .map(str::to_string)
            }
            ClientError::Application { message } => Some(message.clone()),
            _ => None,
        }
    }

    /// Human-readable message for banners, alerts and error rows.
    pub fn user_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message;
        }
        match self {
            ClientError::Http {
                status,
                status_text,
                body,
            } => {
                let head = format!("{status} {status_text}");
                let head = head.trim_end();
                if body.trim().is_empty() {
                    head.to_string()
                } else {
                    format!("{head}: {}", body.trim())
                }
            }
            other => other.to_string(),
        }
    }

    /// HTTP status of the failure, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
