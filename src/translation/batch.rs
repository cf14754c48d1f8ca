/*!
 * Translation batches.
 *
 * A batch is the set of rows that were empty when a translation request was
 * issued. It carries the generation it was issued under and the revision of
 * every target row, so the list can tell on completion whether the batch was
 * superseded or whether a row was edited in the meantime.
 */

use serde::{Deserialize, Serialize};

use super::rows::RowRef;

/// What to do with a completion that belongs to a superseded batch
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Ignore completions of older batches and keep rows edited since submission
    #[default]
    Discard,
    /// Write every completion back, last write wins
    Apply,
}

/// One row scheduled for translation
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Row receiving the translation
    pub target: RowRef,
    /// Text sent to the service
    pub source_text: String,
    /// Row revision at submission time
    pub revision: u64,
}

/// Rows submitted together in one translation request
#[derive(Debug, Clone)]
pub struct TranslationBatch {
    generation: u64,
    items: Vec<BatchItem>,
    source_language: String,
    target_language: String,
}

impl TranslationBatch {
    /// Create a batch for the given generation
    pub fn new(
        generation: u64,
        items: Vec<BatchItem>,
        source_language: &str,
        target_language: &str,
    ) -> Self {
        Self {
            generation,
            items,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// Generation this batch was issued under
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Scheduled rows, title first, then body rows in list order
    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    /// Row references in submission order
    pub fn targets(&self) -> Vec<RowRef> {
        self.items.iter().map(|item| item.target).collect()
    }

    /// Source texts in submission order
    pub fn texts(&self) -> Vec<String> {
        self.items.iter().map(|item| item.source_text.clone()).collect()
    }

    /// Source language code
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Target language code
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Number of rows in the batch
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the batch holds no rows
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of a `translate_all` call or a batch completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// No row was empty, nothing was sent
    NothingToTranslate,
    /// Translations were written back
    Applied {
        /// Rows written
        written: usize,
        /// Rows left alone because they were edited after submission
        skipped: usize,
    },
    /// A newer batch was issued before this one completed
    Superseded {
        /// Generation of the discarded batch
        generation: u64,
        /// Generation current at completion time
        current: u64,
    },
}
