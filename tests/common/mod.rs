/*!
 * Common test utilities for the captionlist test suite
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use captionlist::captions::{CaptionHandle, CaptionSet, EditableCaptionSet, SubtitleRecord};
use captionlist::errors::TranslationError;
use captionlist::translation::{TranslationEvent, TranslationList, TranslationService};

/// One call received by the recording service
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub texts: Vec<String>,
    pub source_language: String,
    pub target_language: String,
}

/// How the recording service answers
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Prefix every text
    Echo(&'static str),
    /// Return these translations whatever was asked
    Fixed(Vec<String>),
    /// Fail with this error
    Fail(TranslationError),
}

/// Translation service that records every call and answers from a script
#[derive(Debug, Clone)]
pub struct RecordingService {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    response: ScriptedResponse,
}

impl RecordingService {
    pub fn new(response: ScriptedResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    pub fn echo(prefix: &'static str) -> Self {
        Self::new(ScriptedResponse::Echo(prefix))
    }

    pub fn fixed(translations: &[&str]) -> Self {
        Self::new(ScriptedResponse::Fixed(translations.iter().map(|t| t.to_string()).collect()))
    }

    pub fn failing(error: TranslationError) -> Self {
        Self::new(ScriptedResponse::Fail(error))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TranslationService for RecordingService {
    async fn translate_batch(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, TranslationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            texts: texts.to_vec(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        });

        match &self.response {
            ScriptedResponse::Echo(prefix) => Ok(texts.iter().map(|t| format!("{}{}", prefix, t)).collect()),
            ScriptedResponse::Fixed(translations) => Ok(translations.clone()),
            ScriptedResponse::Fail(error) => Err(error.clone()),
        }
    }
}

/// Caption set wrapper counting `create_dependent_translation` calls
#[derive(Debug, Default)]
pub struct CountingCaptionSet {
    pub inner: EditableCaptionSet,
    pub created: Vec<(f64, String)>,
}

impl CaptionSet for CountingCaptionSet {
    fn lookup(&self) -> HashMap<String, CaptionHandle> {
        self.inner.lookup()
    }

    fn create_dependent_translation(&mut self, sub_order: f64, subtitle_id: &str) -> CaptionHandle {
        self.created.push((sub_order, subtitle_id.to_string()));
        self.inner.create_dependent_translation(sub_order, subtitle_id)
    }
}

/// The two-record example: "b" (order 2) arrives before "a" (order 1)
pub fn sample_records() -> Vec<SubtitleRecord> {
    vec![
        SubtitleRecord::new("b", 2.0, "y"),
        SubtitleRecord::new("a", 1.0, "x"),
    ]
}

/// Subscribe a listener collecting every event of `list`
pub fn capture_events<S: CaptionSet>(list: &mut TranslationList<S>) -> Arc<Mutex<Vec<TranslationEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    list.subscribe(Box::new(move |event: &TranslationEvent| {
        sink.lock().unwrap().push(event.clone());
    }));
    events
}
