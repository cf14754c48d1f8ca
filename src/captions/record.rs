use serde::{Deserialize, Serialize};

/// One line of base-language subtitles as delivered by the server.
///
/// `sub_order` is the canonical display key. It is not guaranteed to be
/// unique or contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleRecord {
    /// Stable identifier shared with the caption set
    pub subtitle_id: String,

    /// Numeric sort key
    pub sub_order: f64,

    /// Base-language text
    #[serde(default)]
    pub text: String,
}

impl SubtitleRecord {
    /// Create a new record
    pub fn new(subtitle_id: impl Into<String>, sub_order: f64, text: impl Into<String>) -> Self {
        Self {
            subtitle_id: subtitle_id.into(),
            sub_order,
            text: text.into(),
        }
    }
}

/// Sort records in place, ascending by `sub_order`.
///
/// Plain numeric comparison; records sharing a key end up in whatever order
/// the sort leaves them.
pub fn sort_records(records: &mut [SubtitleRecord]) {
    records.sort_unstable_by(|a, b| a.sub_order.total_cmp(&b.sub_order));
}
