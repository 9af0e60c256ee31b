//! Wire types and error mapping shared by the HTTP providers

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Build the two-message conversation every oracle call uses
pub(crate) fn conversation(system_instruction: &str, user_content: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: system_instruction.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: user_content.to_string(),
        },
    ]
}

/// Map a transport failure to an oracle error
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout(timeout)
    } else {
        LlmError::Unavailable(format!("Request failed: {}", err))
    }
}

/// Map a non-success HTTP status to an oracle error
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str, model: &str) -> LlmError {
    match status.as_u16() {
        404 => LlmError::ModelNotAvailable(model.to_string()),
        429 => LlmError::RateLimited,
        401 | 403 => LlmError::Unavailable(format!("HTTP {}: authentication rejected", status)),
        408 | 504 => LlmError::Unavailable(format!("HTTP {}: gateway timeout", status)),
        _ => LlmError::Unavailable(format!("HTTP {}: {}", status, body)),
    }
}

/// Build an HTTP client with the per-request timeout applied
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}
