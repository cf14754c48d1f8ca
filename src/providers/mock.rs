/*!
 * Mock provider implementation for testing and dry runs.
 *
 * The mock understands the entry-marker framing used by the provider-backed
 * translator and answers with every entry prefixed by `[TRANSLATED]`:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::truncated()` - Drops the end marker
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{CompletionRequest, CompletionResponse, Provider};
use crate::translation::service::{END_MARKER, ENTRY_MARKER_PREFIX};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Always fails with an error
    Failing,
    /// Returns truncated responses (missing END marker)
    Truncated,
    /// Returns empty response
    Empty,
    /// Simulates slow response
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of requests received, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&CompletionRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns truncated responses
    pub fn truncated() -> Self {
        Self::new(MockBehavior::Truncated)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that answers after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&CompletionRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Generate a properly framed batch response for the given entries
    pub fn generate_batch_response(entries: &[&str]) -> String {
        let mut response = String::new();
        for (i, entry) in entries.iter().enumerate() {
            response.push_str(&format!("{}{}>>\n", ENTRY_MARKER_PREFIX, i));
            response.push_str(&format!("[TRANSLATED] {}\n", entry));
        }
        response.push_str(END_MARKER);
        response
    }

    /// Translate the framed part of a prompt, keeping markers in place
    fn translate_payload(prompt: &str) -> String {
        let Some(start) = prompt.find(ENTRY_MARKER_PREFIX) else {
            return format!("[TRANSLATED] {}", prompt.trim());
        };

        prompt[start..]
            .lines()
            .map(|line| {
                if line.starts_with(ENTRY_MARKER_PREFIX) || line.starts_with(END_MARKER) || line.trim().is_empty() {
                    line.to_string()
                } else {
                    format!("[TRANSLATED] {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn working_text(&self, request: &CompletionRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => Self::translate_payload(&request.prompt),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        let prompt_tokens = Some(request.prompt.len() as u64);

        let text = match self.behavior {
            MockBehavior::Working => self.working_text(&request),
            MockBehavior::Failing => {
                return Err(ProviderError::ApiError {
                    message: "Simulated provider failure".to_string(),
                    status_code: 500,
                });
            }
            MockBehavior::Truncated => self.working_text(&request).replace(END_MARKER, ""),
            MockBehavior::Empty => String::new(),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                self.working_text(&request)
            }
        };

        Ok(CompletionResponse {
            completion_tokens: Some((text.len() / 2) as u64),
            text,
            prompt_tokens,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated outage".to_string())),
            _ => Ok(()),
        }
    }
}
