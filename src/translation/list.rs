/*!
 * Translation list: the ordered set of rows shown while translating a video.
 *
 * The list sorts the incoming subtitle records, binds each one to a caption
 * entry (creating the entry when the caption set has none), and batches every
 * empty row to a translation service, writing results back by position.
 */

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::captions::{CaptionSet, SubtitleRecord, sort_records};
use crate::errors::{ListError, TranslationError};
use crate::language_utils;
use crate::render::{RenderNode, RenderTarget};

use super::batch::{BatchItem, BatchOutcome, StalePolicy, TranslationBatch};
use super::events::{EventListener, TranslationEvent};
use super::rows::{RowRef, TitleRow, TranslatableRow, TranslationRow};
use super::service::TranslationService;

/// One translated subtitle line, as exported for saving
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslatedLine {
    pub subtitle_id: String,
    pub sub_order: f64,
    pub original: String,
    pub translation: String,
}

/// Translated video title, as exported for saving
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleTranslation {
    pub original: String,
    pub translation: String,
}

/// Snapshot of every row of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleTranslation>,
    pub lines: Vec<TranslatedLine>,
}

/// Ordered collection of translation rows bound to a caption set
pub struct TranslationList<S: CaptionSet> {
    caption_set: S,
    records: Vec<SubtitleRecord>,
    video_title: String,
    title_row: Option<TitleRow>,
    rows: Vec<TranslationRow>,
    materialized: bool,
    generation: u64,
    stale_policy: StalePolicy,
    listeners: Vec<EventListener>,
}

impl<S: CaptionSet> TranslationList<S> {
    /// Create a list, sorting `records` ascending by `sub_order`.
    ///
    /// The title is kept verbatim; an absent or empty title disables the title row.
    pub fn new(caption_set: S, mut records: Vec<SubtitleRecord>, video_title: Option<&str>) -> Self {
        sort_records(&mut records);
        let video_title = video_title.unwrap_or_default().to_string();

        Self {
            caption_set,
            records,
            video_title,
            title_row: None,
            rows: Vec::new(),
            materialized: false,
            generation: 0,
            stale_policy: StalePolicy::default(),
            listeners: Vec::new(),
        }
    }

    /// Set how completions of superseded batches are handled
    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    /// Register a listener for translation events
    pub fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Create the rows and attach them to `target`.
    ///
    /// Runs once per list; a second call fails without touching anything.
    pub fn materialize(&mut self, target: &mut dyn RenderTarget) -> Result<(), ListError> {
        if self.materialized {
            return Err(ListError::AlreadyMaterialized);
        }
        self.materialized = true;

        if !self.video_title.is_empty() {
            let title_row = self.title_row.insert(TitleRow::new(self.video_title.clone()));
            target.attach(RenderNode::Title(title_row));
        }

        let captions = self.caption_set.lookup();
        let mut created = 0;

        for record in &self.records {
            let caption = match captions.get(&record.subtitle_id) {
                Some(caption) => caption.clone(),
                None => {
                    created += 1;
                    self.caption_set
                        .create_dependent_translation(record.sub_order, &record.subtitle_id)
                }
            };

            let index = self.rows.len();
            self.rows.push(TranslationRow::new(record.clone(), caption));
            target.attach(RenderNode::Subtitle {
                index,
                row: &self.rows[index],
            });
        }

        debug!(
            "Materialized {} rows ({} new captions, title row: {})",
            self.rows.len(),
            created,
            self.title_row.is_some()
        );
        Ok(())
    }

    /// Forward a title translation into the title row, if there is one
    pub fn set_title_translation(&mut self, text: &str) {
        if let Some(title_row) = self.title_row.as_mut() {
            title_row.set_translation_content(text);
        }
    }

    /// Overwrite one row with a user-entered translation
    pub fn edit_row(&mut self, target: RowRef, text: &str) -> Result<(), ListError> {
        let row = self
            .row_mut(target)
            .ok_or_else(|| ListError::NoSuchRow(target.to_string()))?;
        row.set_translation_content(text);
        Ok(())
    }

    /// Collect every empty row into a new batch.
    ///
    /// Returns `None` when nothing is empty, whatever the language codes.
    /// Issuing a batch supersedes any batch still outstanding.
    pub fn prepare_batch(
        &mut self,
        source_language: &str,
        target_language: &str,
    ) -> Result<Option<TranslationBatch>, TranslationError> {
        let title = self
            .title_row
            .iter()
            .filter(|row| row.is_empty())
            .map(|row| BatchItem {
                target: RowRef::Title,
                source_text: row.source_text().to_string(),
                revision: row.revision(),
            });
        let body = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_empty())
            .map(|(index, row)| BatchItem {
                target: RowRef::Body(index),
                source_text: row.source_text().to_string(),
                revision: row.revision(),
            });
        let items: Vec<BatchItem> = title.chain(body).collect();

        if items.is_empty() {
            debug!("No empty rows, nothing to translate");
            return Ok(None);
        }

        // Codes reach the service unchanged, only their primary subtag is checked
        for code in [source_language, target_language] {
            language_utils::validate_language_code(code)
                .map_err(|_| TranslationError::InvalidLanguage(code.to_string()))?;
        }

        self.generation += 1;
        let batch = TranslationBatch::new(self.generation, items, source_language, target_language);
        info!(
            "Submitting {} rows for translation ({} -> {}), batch {}",
            batch.len(),
            source_language,
            target_language,
            batch.generation()
        );
        self.emit(&TranslationEvent::Submitted {
            generation: batch.generation(),
            rows: batch.len(),
        });

        Ok(Some(batch))
    }

    /// Write the service result for `batch` back into its rows.
    ///
    /// Errors leave every row untouched and are reported to listeners before
    /// being returned.
    pub fn complete_batch(
        &mut self,
        batch: TranslationBatch,
        result: Result<Vec<String>, TranslationError>,
    ) -> Result<BatchOutcome, TranslationError> {
        let translations = match result {
            Ok(translations) if translations.len() == batch.len() => translations,
            Ok(translations) => {
                return Err(self.fail(
                    &batch,
                    TranslationError::LengthMismatch {
                        expected: batch.len(),
                        actual: translations.len(),
                    },
                ));
            }
            Err(e) => return Err(self.fail(&batch, e)),
        };

        let stale = batch.generation() != self.generation;
        if stale {
            match self.stale_policy {
                StalePolicy::Discard => {
                    warn!(
                        "Ignoring translations of batch {}, batch {} was issued since",
                        batch.generation(),
                        self.generation
                    );
                    self.emit(&TranslationEvent::Superseded {
                        generation: batch.generation(),
                        current: self.generation,
                    });
                    return Ok(BatchOutcome::Superseded {
                        generation: batch.generation(),
                        current: self.generation,
                    });
                }
                StalePolicy::Apply => {
                    warn!("Applying translations of superseded batch {}", batch.generation());
                }
            }
        }

        let keep_edits = self.stale_policy == StalePolicy::Discard;
        let mut written = 0;
        let mut skipped = 0;
        for (item, text) in batch.items().iter().zip(translations) {
            let Some(row) = self.row_mut(item.target) else {
                continue;
            };
            if keep_edits && row.revision() != item.revision {
                debug!("Keeping {} edited after submission", item.target);
                skipped += 1;
                continue;
            }
            row.set_translation_content(&text);
            written += 1;
        }

        info!(
            "Batch {} completed: {} rows written, {} kept",
            batch.generation(),
            written,
            skipped
        );
        self.emit(&TranslationEvent::Completed {
            generation: batch.generation(),
            written,
            skipped,
        });

        Ok(BatchOutcome::Applied { written, skipped })
    }

    /// Translate every empty row through `service` in a single batch
    pub async fn translate_all<T>(
        &mut self,
        service: &T,
        source_language: &str,
        target_language: &str,
    ) -> Result<BatchOutcome, TranslationError>
    where
        T: TranslationService + ?Sized,
    {
        let Some(batch) = self.prepare_batch(source_language, target_language)? else {
            return Ok(BatchOutcome::NothingToTranslate);
        };

        let result = service
            .translate_batch(&batch.texts(), batch.source_language(), batch.target_language())
            .await;
        self.complete_batch(batch, result)
    }

    /// Sorted subtitle records
    pub fn records(&self) -> &[SubtitleRecord] {
        &self.records
    }

    /// Normalized video title, empty when there is none
    pub fn video_title(&self) -> &str {
        &self.video_title
    }

    /// The title row, once materialized
    pub fn title_row(&self) -> Option<&TitleRow> {
        self.title_row.as_ref()
    }

    /// Body rows in display order
    pub fn rows(&self) -> &[TranslationRow] {
        &self.rows
    }

    /// Look up a row by reference
    pub fn row(&self, target: RowRef) -> Option<&dyn TranslatableRow> {
        match target {
            RowRef::Title => self.title_row.as_ref().map(|row| row as &dyn TranslatableRow),
            RowRef::Body(index) => self.rows.get(index).map(|row| row as &dyn TranslatableRow),
        }
    }

    /// The caption set rows are bound to
    pub fn caption_set(&self) -> &S {
        &self.caption_set
    }

    /// Whether `materialize` has run
    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    /// Generation of the most recently issued batch
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of rows, title included, still without translation
    pub fn pending_count(&self) -> usize {
        self.all_rows().filter(|row| row.is_empty()).count()
    }

    /// Share of translated rows, as a percentage
    pub fn translation_progress(&self) -> f32 {
        let total = self.all_rows().count();
        if total == 0 {
            return 100.0;
        }
        let translated = total - self.pending_count();
        (translated as f32 / total as f32) * 100.0
    }

    /// Snapshot every row for saving
    pub fn export(&self) -> TranslationExport {
        TranslationExport {
            title: self.title_row.as_ref().map(|row| TitleTranslation {
                original: row.title().to_string(),
                translation: row.translation(),
            }),
            lines: self
                .rows
                .iter()
                .map(|row| TranslatedLine {
                    subtitle_id: row.record().subtitle_id.clone(),
                    sub_order: row.record().sub_order,
                    original: row.record().text.clone(),
                    translation: row.translation(),
                })
                .collect(),
        }
    }

    /// Consume the list and hand back the caption set
    pub fn into_caption_set(self) -> S {
        self.caption_set
    }

    fn all_rows(&self) -> impl Iterator<Item = &dyn TranslatableRow> {
        self.title_row
            .iter()
            .map(|row| row as &dyn TranslatableRow)
            .chain(self.rows.iter().map(|row| row as &dyn TranslatableRow))
    }

    fn row_mut(&mut self, target: RowRef) -> Option<&mut dyn TranslatableRow> {
        match target {
            RowRef::Title => self.title_row.as_mut().map(|row| row as &mut dyn TranslatableRow),
            RowRef::Body(index) => self.rows.get_mut(index).map(|row| row as &mut dyn TranslatableRow),
        }
    }

    fn fail(&self, batch: &TranslationBatch, error: TranslationError) -> TranslationError {
        error!("Translation of batch {} failed: {}", batch.generation(), error);
        self.emit(&TranslationEvent::Failed {
            generation: batch.generation(),
            error: error.clone(),
        });
        error
    }

    fn emit(&self, event: &TranslationEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl<S: CaptionSet> std::fmt::Debug for TranslationList<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationList")
            .field("records", &self.records.len())
            .field("video_title", &self.video_title)
            .field("rows", &self.rows.len())
            .field("materialized", &self.materialized)
            .field("generation", &self.generation)
            .field("stale_policy", &self.stale_policy)
            .finish()
    }
}
