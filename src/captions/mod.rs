/*!
 * Caption model shared between the original and translated views.
 *
 * - `record`: immutable subtitle records received from upstream
 * - `entry`: editable caption entries and the shared handle type
 * - `set`: the caption set contract and its in-memory implementation
 */

pub use self::entry::{CaptionEntry, CaptionHandle};
pub use self::record::{SubtitleRecord, sort_records};
pub use self::set::{CaptionSet, EditableCaptionSet};

pub mod entry;
pub mod record;
pub mod set;
