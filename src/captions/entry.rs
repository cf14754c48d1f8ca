use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to a caption entry.
///
/// The caption set and the translation row bound to it hold the same handle,
/// so a write through either side is visible to both.
pub type CaptionHandle = Arc<RwLock<CaptionEntry>>;

/// Editable caption for one subtitle line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Identifier of the subtitle this caption belongs to
    pub subtitle_id: String,

    /// Position of the caption in the set
    pub sub_order: f64,

    /// Caption text
    #[serde(default)]
    text: String,

    /// Bumped on every text write
    #[serde(skip)]
    revision: u64,
}

impl CaptionEntry {
    /// Create a caption with the given text
    pub fn new(subtitle_id: impl Into<String>, sub_order: f64, text: impl Into<String>) -> Self {
        Self {
            subtitle_id: subtitle_id.into(),
            sub_order,
            text: text.into(),
            revision: 0,
        }
    }

    /// Create a caption with no text yet
    pub fn empty(subtitle_id: impl Into<String>, sub_order: f64) -> Self {
        Self::new(subtitle_id, sub_order, String::new())
    }

    /// Current caption text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Overwrite the caption text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revision += 1;
    }

    /// Number of writes since the entry was created or loaded
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when the text is blank
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Wrap the entry into a shared handle
    pub fn into_handle(self) -> CaptionHandle {
        Arc::new(RwLock::new(self))
    }
}
