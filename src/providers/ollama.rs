use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;

use super::{CompletionRequest, CompletionResponse, Provider};

/// Ollama client for interacting with the Ollama API
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: Url,
    /// Model used for every request
    model: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Generated text
    #[serde(default)]
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Build a non-streaming request from a provider-neutral completion request
    pub fn from_completion(model: &str, request: CompletionRequest) -> Self {
        Self {
            model: model.to_string(),
            prompt: request.prompt,
            system: request.system,
            options: request.temperature.map(|temperature| GenerationOptions {
                temperature: Some(temperature),
            }),
            stream: false,
        }
    }
}

impl Ollama {
    /// Create a new Ollama client
    ///
    /// `endpoint` must be an absolute http(s) URL such as `http://localhost:11434`.
    pub fn new_with_config(
        endpoint: &str,
        model: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ProviderError> {
        let mut base_url = Url::parse(endpoint)
            .map_err(|e| ProviderError::ConnectionError(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ProviderError::ConnectionError(format!(
                "Unsupported scheme in endpoint '{}'",
                endpoint
            )));
        }
        // API paths are joined relative to the endpoint, which keeps any path prefix
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self {
            base_url,
            model: model.into(),
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Model used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of an API path, relative to the endpoint
    pub fn api_url(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid API path '{}': {}", path, e)))
    }

    /// Generate text from the Ollama API with retry logic
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = self.api_url("api/generate")?;
        let mut attempt = 0;

        loop {
            match self.send_generate(url.clone(), request).await {
                Ok(response) => return Ok(response),
                // Client errors will not improve on retry
                Err(e @ ProviderError::ApiError { status_code: 400..=499, .. }) => return Err(e),
                Err(e) if attempt >= self.max_retries => {
                    error!("Ollama request failed after {} attempts: {}", attempt + 1, e);
                    return Err(e);
                }
                Err(e) => {
                    let backoff = self.backoff_base_ms.saturating_mul(1u64 << attempt.min(16));
                    warn!("Ollama request failed ({}), retrying in {}ms", e, backoff);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn send_generate(&self, url: Url, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        Self::parse_generate_body(&body)
    }

    /// Parse a generate response, accepting both a single object and JSONL chunks
    pub fn parse_generate_body(body: &str) -> Result<GenerationResponse, ProviderError> {
        if let Ok(response) = serde_json::from_str::<GenerationResponse>(body) {
            return Ok(response);
        }

        debug!("Ollama response is not a single JSON object, trying line-delimited chunks");
        let mut merged: Option<GenerationResponse> = None;
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let chunk: GenerationResponse = serde_json::from_str(line)
                .map_err(|e| ProviderError::ParseError(format!("{}: {}", e, truncate(line, 200))))?;
            match merged.as_mut() {
                Some(acc) => {
                    acc.response.push_str(&chunk.response);
                    acc.done = chunk.done;
                    acc.prompt_eval_count = chunk.prompt_eval_count.or(acc.prompt_eval_count);
                    acc.eval_count = chunk.eval_count.or(acc.eval_count);
                }
                None => merged = Some(chunk),
            }
        }

        merged.ok_or_else(|| ProviderError::ParseError("Empty response body".to_string()))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

#[async_trait]
impl Provider for Ollama {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let request = GenerationRequest::from_completion(&self.model, request);
        let response = self.generate(&request).await?;
        Ok(CompletionResponse {
            text: response.response,
            prompt_tokens: response.prompt_eval_count,
            completion_tokens: response.eval_count,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = self.api_url("api/tags")?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: response.status().as_u16(),
                message: "Ollama server is not reachable".to_string(),
            })
        }
    }
}
