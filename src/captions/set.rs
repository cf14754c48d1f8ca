use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

use crate::errors::CaptionError;

use super::entry::{CaptionEntry, CaptionHandle};

/// Store of editable captions keyed by subtitle id.
///
/// The translation list only reads the set through `lookup` and extends it
/// through `create_dependent_translation`; it never removes captions.
pub trait CaptionSet {
    /// Build a fresh `subtitle_id -> caption` map of the current contents
    fn lookup(&self) -> HashMap<String, CaptionHandle>;

    /// Add an empty caption for a subtitle that has no translation yet
    fn create_dependent_translation(&mut self, sub_order: f64, subtitle_id: &str) -> CaptionHandle;
}

impl<T: CaptionSet + ?Sized> CaptionSet for &mut T {
    fn lookup(&self) -> HashMap<String, CaptionHandle> {
        (**self).lookup()
    }

    fn create_dependent_translation(&mut self, sub_order: f64, subtitle_id: &str) -> CaptionHandle {
        (**self).create_dependent_translation(sub_order, subtitle_id)
    }
}

/// In-memory caption set kept ordered by `sub_order`
#[derive(Debug, Default)]
pub struct EditableCaptionSet {
    captions: Vec<CaptionHandle>,
}

impl EditableCaptionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from plain entries, keeping the first entry per subtitle id
    pub fn from_entries(entries: impl IntoIterator<Item = CaptionEntry>) -> Self {
        let mut set = Self::new();
        for entry in entries {
            if let Err(e) = set.insert(entry) {
                warn!("Skipping caption: {}", e);
            }
        }
        set
    }

    /// Insert a caption at its ordered position
    pub fn insert(&mut self, entry: CaptionEntry) -> Result<CaptionHandle, CaptionError> {
        if self.find(&entry.subtitle_id).is_some() {
            return Err(CaptionError::DuplicateSubtitle(entry.subtitle_id));
        }

        let order = entry.sub_order;
        let position = self
            .captions
            .partition_point(|c| c.read().sub_order <= order);
        let handle = entry.into_handle();
        self.captions.insert(position, handle.clone());
        Ok(handle)
    }

    /// Find the caption for a subtitle id
    pub fn find(&self, subtitle_id: &str) -> Option<CaptionHandle> {
        self.captions
            .iter()
            .find(|c| c.read().subtitle_id == subtitle_id)
            .cloned()
    }

    /// Captions in display order
    pub fn captions(&self) -> &[CaptionHandle] {
        &self.captions
    }

    /// Snapshot of all captions in display order
    pub fn entries(&self) -> Vec<CaptionEntry> {
        self.captions.iter().map(|c| c.read().clone()).collect()
    }

    /// Number of captions
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// True when the set holds no captions
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}

impl CaptionSet for EditableCaptionSet {
    fn lookup(&self) -> HashMap<String, CaptionHandle> {
        self.captions
            .iter()
            .map(|c| (c.read().subtitle_id.clone(), c.clone()))
            .collect()
    }

    fn create_dependent_translation(&mut self, sub_order: f64, subtitle_id: &str) -> CaptionHandle {
        match self.insert(CaptionEntry::empty(subtitle_id, sub_order)) {
            Ok(handle) => {
                debug!("Created dependent caption for subtitle '{}' at {}", subtitle_id, sub_order);
                handle
            }
            Err(e) => {
                // Already present: hand back the existing caption
                warn!("{}", e);
                self.find(subtitle_id)
                    .unwrap_or_else(|| CaptionEntry::empty(subtitle_id, sub_order).into_handle())
            }
        }
    }
}

impl Serialize for EditableCaptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EditableCaptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<CaptionEntry>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries))
    }
}
