/*!
 * Translation services consumed by the translation list.
 *
 * `TranslationService` is the seam the list talks to. `ProviderTranslator`
 * implements it on top of any LLM `Provider` by framing the whole batch into a
 * single request with entry markers and splitting the reply back by position.
 */

use async_trait::async_trait;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;

use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::{CompletionRequest, Provider};

/// Marker opening each entry in a batch payload
pub const ENTRY_MARKER_PREFIX: &str = "<<ENTRY_";

/// Marker closing a batch payload
pub const END_MARKER: &str = "<<END>>";

static ENTRY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"<<ENTRY_(\d+)>>").unwrap());

/// Machine translation backend for a batch of lines
///
/// Implementations return exactly one translation per input text, in input order.
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate `texts` from `source_language` to `target_language`
    async fn translate_batch(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, TranslationError>;
}

/// Options for the provider-backed translator
#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    /// System prompt template, placeholders: {source_language}, {target_language}
    pub system_prompt: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            system_prompt: "You are a professional subtitle translator. Translate every entry from {source_language} to {target_language}.".to_string(),
            temperature: 0.3,
        }
    }
}

/// Translation service backed by an LLM provider
#[derive(Debug, Clone)]
pub struct ProviderTranslator<P: Provider> {
    provider: P,
    options: TranslatorOptions,
}

impl<P: Provider> ProviderTranslator<P> {
    /// Create a translator with default options
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, TranslatorOptions::default())
    }

    /// Create a translator with explicit options
    pub fn with_options(provider: P, options: TranslatorOptions) -> Self {
        Self { provider, options }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Render the system prompt for a language pair
    pub fn system_prompt(&self, source_language: &str, target_language: &str) -> String {
        let source = language_utils::get_language_name(source_language)
            .unwrap_or_else(|_| source_language.to_string());
        let target = language_utils::get_language_name(target_language)
            .unwrap_or_else(|_| target_language.to_string());

        format!(
            "{}\nEach entry starts with a marker such as {}0>> and the input ends with {}. \
             Keep every marker unchanged, translate only the text between markers and return nothing else.",
            self.options
                .system_prompt
                .replace("{source_language}", &source)
                .replace("{target_language}", &target),
            ENTRY_MARKER_PREFIX,
            END_MARKER
        )
    }
}

/// Frame texts into one payload with entry markers
pub fn pack_batch(texts: &[String]) -> String {
    let mut payload = String::new();
    for (idx, text) in texts.iter().enumerate() {
        payload.push_str(&format!("{}{}>>\n", ENTRY_MARKER_PREFIX, idx));
        payload.push_str(text);
        payload.push('\n');
    }
    payload.push_str(END_MARKER);
    payload
}

/// Split a framed reply back into `expected` translations
pub fn unpack_batch(response: &str, expected: usize) -> Result<Vec<String>, TranslationError> {
    let end = response
        .find(END_MARKER)
        .ok_or_else(|| TranslationError::MalformedResponse("missing end marker".to_string()))?;
    let body = &response[..end];

    let markers: Vec<(usize, usize, usize)> = ENTRY_MARKER
        .captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let idx = caps[1].parse().ok()?;
            Some((idx, whole.start(), whole.end()))
        })
        .collect();

    let mut slots: Vec<Option<String>> = vec![None; expected];
    for (pos, (idx, _, content_start)) in markers.iter().enumerate() {
        let content_end = markers.get(pos + 1).map_or(body.len(), |(_, start, _)| *start);
        if let Some(slot) = slots.get_mut(*idx) {
            *slot = Some(body[*content_start..content_end].trim().to_string());
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| {
            slot.ok_or_else(|| TranslationError::MalformedResponse(format!("missing entry {}", idx)))
        })
        .collect()
}

#[async_trait]
impl<P: Provider> TranslationService for ProviderTranslator<P> {
    async fn translate_batch(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, TranslationError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = CompletionRequest::new(pack_batch(texts))
            .system(self.system_prompt(source_language, target_language))
            .temperature(self.options.temperature);

        debug!("Sending {} entries to provider", texts.len());
        let start_time = Instant::now();
        let response = self.provider.complete(request).await?;
        info!(
            "Provider answered {} entries in {:?} (tokens: {:?} in, {:?} out)",
            texts.len(),
            start_time.elapsed(),
            response.prompt_tokens,
            response.completion_tokens
        );

        unpack_batch(&response.text, texts.len())
    }
}
