/*!
 * Tests for subtitle records and the editable caption set
 */

use captionlist::captions::{CaptionEntry, CaptionSet, EditableCaptionSet, SubtitleRecord, sort_records};

#[test]
fn test_sortRecords_withDuplicateOrders_shouldKeepNonDecreasingOrder() {
    let mut records = vec![
        SubtitleRecord::new("d", 3.0, ""),
        SubtitleRecord::new("a", 1.0, ""),
        SubtitleRecord::new("c", 3.0, ""),
        SubtitleRecord::new("b", 2.0, ""),
    ];

    sort_records(&mut records);

    let orders: Vec<f64> = records.iter().map(|r| r.sub_order).collect();
    assert_eq!(orders, vec![1.0, 2.0, 3.0, 3.0]);
    let tail: Vec<&str> = records[2..].iter().map(|r| r.subtitle_id.as_str()).collect();
    assert!(tail.contains(&"c") && tail.contains(&"d"));
}

#[test]
fn test_lookup_shouldReturnFreshMapEachCall() {
    let mut set = EditableCaptionSet::from_entries(vec![CaptionEntry::new("a", 1.0, "A")]);
    let before = set.lookup();

    set.create_dependent_translation(2.0, "b");

    assert_eq!(before.len(), 1);
    assert_eq!(set.lookup().len(), 2);
}

#[test]
fn test_fromEntries_withDuplicates_shouldKeepFirst() {
    let set = EditableCaptionSet::from_entries(vec![
        CaptionEntry::new("a", 1.0, "first"),
        CaptionEntry::new("a", 2.0, "second"),
    ]);

    assert_eq!(set.len(), 1);
    assert_eq!(set.entries()[0].text(), "first");
}

#[test]
fn test_createDependentTranslation_shouldInsertAtOrderedPosition() {
    let mut set = EditableCaptionSet::from_entries(vec![
        CaptionEntry::new("a", 1.0, "A"),
        CaptionEntry::new("c", 3.0, "C"),
    ]);

    set.create_dependent_translation(2.0, "b");

    let ids: Vec<String> = set.entries().into_iter().map(|e| e.subtitle_id).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_captionEntry_setText_shouldBumpRevision() {
    let mut entry = CaptionEntry::empty("a", 1.0);
    assert!(entry.is_blank());
    assert_eq!(entry.revision(), 0);

    entry.set_text("hello");

    assert_eq!(entry.text(), "hello");
    assert_eq!(entry.revision(), 1);
}
