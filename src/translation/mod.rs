/*!
 * Translation of subtitle rows.
 *
 * This module contains the translation list and everything it talks to:
 *
 * - `list`: the ordered row collection, row binding and batch write-back
 * - `rows`: the title and subtitle rows
 * - `batch`: batches of empty rows and their outcomes
 * - `events`: notifications emitted while batches are processed
 * - `service`: the translation service seam and its provider-backed implementation
 */

// Re-export main types for easier usage
pub use self::batch::{BatchItem, BatchOutcome, StalePolicy, TranslationBatch};
pub use self::events::{EventListener, TranslationEvent};
pub use self::list::{TitleTranslation, TranslatedLine, TranslationExport, TranslationList};
pub use self::rows::{RowRef, TitleRow, TranslatableRow, TranslationRow};
pub use self::service::{ProviderTranslator, TranslationService, TranslatorOptions};

// Submodules
pub mod batch;
pub mod events;
pub mod list;
pub mod rows;
pub mod service;
