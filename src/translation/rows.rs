/*!
 * Rows of the translation list.
 *
 * A row is one translatable line. Body rows are bound to a subtitle record and
 * write their translation into the caption entry they share with the caption
 * set. The title row keeps its translation to itself.
 */

use std::fmt;

use crate::captions::{CaptionHandle, SubtitleRecord};

/// Contract the list relies on when batching and writing back translations
pub trait TranslatableRow {
    /// Text to translate
    fn source_text(&self) -> &str;

    /// Current translated text
    fn translation(&self) -> String;

    /// Number of translation writes seen by this row
    fn revision(&self) -> u64;

    /// True when no translation has been entered yet
    fn is_empty(&self) -> bool {
        self.translation().trim().is_empty()
    }

    /// Overwrite the translation, whatever it currently holds
    fn set_translation_content(&mut self, text: &str);
}

/// Stable identity of a row inside a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowRef {
    /// The video title row
    Title,
    /// Body row at this position in the sorted sequence
    Body(usize),
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Body(index) => write!(f, "row #{}", index),
        }
    }
}

/// Translation row for one subtitle line
#[derive(Debug, Clone)]
pub struct TranslationRow {
    record: SubtitleRecord,
    caption: CaptionHandle,
}

impl TranslationRow {
    /// Bind a record to its caption entry
    pub fn new(record: SubtitleRecord, caption: CaptionHandle) -> Self {
        Self { record, caption }
    }

    /// The subtitle record this row displays
    pub fn record(&self) -> &SubtitleRecord {
        &self.record
    }

    /// The caption entry receiving the translation
    pub fn caption(&self) -> &CaptionHandle {
        &self.caption
    }
}

impl TranslatableRow for TranslationRow {
    fn source_text(&self) -> &str {
        &self.record.text
    }

    fn translation(&self) -> String {
        self.caption.read().text().to_string()
    }

    fn revision(&self) -> u64 {
        self.caption.read().revision()
    }

    fn is_empty(&self) -> bool {
        self.caption.read().is_blank()
    }

    fn set_translation_content(&mut self, text: &str) {
        self.caption.write().set_text(text);
    }
}

/// Translation row for the video title
#[derive(Debug, Clone, Default)]
pub struct TitleRow {
    title: String,
    translation: String,
    revision: u64,
}

impl TitleRow {
    /// Create an untranslated title row
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            translation: String::new(),
            revision: 0,
        }
    }

    /// Original video title
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl TranslatableRow for TitleRow {
    fn source_text(&self) -> &str {
        &self.title
    }

    fn translation(&self) -> String {
        self.translation.clone()
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_translation_content(&mut self, text: &str) {
        self.translation = text.to_string();
        self.revision += 1;
    }
}
