//! Mock provider for deterministic testing

use crate::{CompletionOracle, LlmError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Model name reported by [`MockProvider`]
pub const MOCK_MODEL_NAME: &str = "mock-model";

type Responder = Arc<dyn Fn(&str, &str) -> Result<String, LlmError> + Send + Sync>;

/// One recorded oracle call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// System instruction sent
    pub system_instruction: String,
    /// User content sent
    pub user_content: String,
}

/// Mock oracle returning pre-configured responses without network calls
///
/// Lookup order for each call: a scripted reply keyed by the exact user
/// content, then the responder function (if any), then the default response.
/// Every call is recorded in order.
///
/// # Examples
///
/// ```
/// use pulsecheck_llm::{CompletionOracle, MockProvider};
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut provider = MockProvider::default();
/// provider.add_response("chunk one", "velocity 12");
/// assert_eq!(provider.complete("sys", "chunk one").await.unwrap(), "velocity 12");
/// assert_eq!(provider.call_count(), 1);
/// # }
/// ```
#[derive(Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Result<String, LlmError>>>>,
    responder: Option<Responder>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all calls
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            responder: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Create a MockProvider that computes each reply from the call
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        let mut provider = Self::default();
        provider.responder = Some(Arc::new(responder));
        provider
    }

    /// Add a specific response for a given user content
    pub fn add_response(&mut self, user_content: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(user_content.into(), Ok(response.into()));
    }

    /// Configure a failure for a given user content
    pub fn add_error(&mut self, user_content: impl Into<String>, error: LlmError) {
        lock(&self.responses).insert(user_content.into(), Err(error));
    }

    /// Sleep before answering every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of calls made so far
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Get every call made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("default_response", &self.default_response)
            .field("has_responder", &self.responder.is_some())
            .field("call_count", &self.call_count())
            .finish()
    }
}

#[async_trait]
impl CompletionOracle for MockProvider {
    async fn complete(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, LlmError> {
        lock(&self.calls).push(RecordedCall {
            system_instruction: system_instruction.to_string(),
            user_content: user_content.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(scripted) = lock(&self.responses).get(user_content) {
            return scripted.clone();
        }
        if let Some(responder) = &self.responder {
            return responder(system_instruction, user_content);
        }
        Ok(self.default_response.clone())
    }

    fn model_name(&self) -> &str {
        MOCK_MODEL_NAME
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
