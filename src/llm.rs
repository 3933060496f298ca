//! LLM provider abstraction
//!
//! The interview only needs one operation from a provider: given the whole
//! conversation, produce the next model turn.

mod error;
mod gemini;
mod types;

#[cfg(test)]
pub mod testing;

pub use error::{LlmError, LlmErrorKind};
pub use gemini::GeminiService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    turns = request.messages.len(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    turns = request.messages.len(),
                    error = %e.message,
                    kind = ?e.kind,
                    retryable = e.kind.is_retryable(),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockLlmService;
    use super::*;

    #[tokio::test]
    async fn test_logging_service_passes_through() {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        mock.queue_response(LlmResponse::from_text("hello"));
        mock.queue_error(LlmError::network("down"));

        let service = LoggingService::new(mock.clone());
        assert_eq!(service.model_id(), "mock-model");

        let request = LlmRequest {
            messages: vec![LlmMessage::user("hi")],
            max_tokens: None,
        };
        let first = service.complete(&request).await.unwrap();
        assert_eq!(first.text, "hello");

        let second = service.complete(&request).await.unwrap_err();
        assert_eq!(second.kind, LlmErrorKind::Network);
        assert_eq!(mock.recorded_requests().len(), 2);
    }
}
