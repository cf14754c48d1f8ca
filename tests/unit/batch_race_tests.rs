/*!
 * Tests for overlapping batches and edits made while a batch is pending
 */

use captionlist::captions::EditableCaptionSet;
use captionlist::errors::TranslationError;
use captionlist::render::NullRenderer;
use captionlist::translation::{
    BatchOutcome, RowRef, StalePolicy, TranslatableRow, TranslationEvent, TranslationList,
};

use crate::common::{capture_events, sample_records};

fn list_with(policy: StalePolicy) -> TranslationList<EditableCaptionSet> {
    let mut list = TranslationList::new(EditableCaptionSet::new(), sample_records(), Some("T"))
        .with_stale_policy(policy);
    list.materialize(&mut NullRenderer).unwrap();
    list
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_prepareBatch_shouldListEmptyRowsTitleFirst() {
    let mut list = list_with(StalePolicy::Discard);
    list.edit_row(RowRef::Body(0), "X").unwrap();

    let batch = list.prepare_batch("en", "fr").unwrap().expect("batch");

    assert_eq!(batch.generation(), 1);
    assert_eq!(batch.targets(), vec![RowRef::Title, RowRef::Body(1)]);
    assert_eq!(batch.texts(), strings(&["T", "y"]));
    assert_eq!(batch.source_language(), "en");
    assert_eq!(batch.target_language(), "fr");
}

#[test]
fn test_overlappingBatches_withDiscardPolicy_shouldIgnoreOlderCompletion() {
    let mut list = list_with(StalePolicy::Discard);
    let events = capture_events(&mut list);

    let first = list.prepare_batch("en", "fr").unwrap().expect("first batch");
    let second = list.prepare_batch("en", "fr").unwrap().expect("second batch");
    assert_eq!(first.len(), second.len());

    let newer = list
        .complete_batch(second, Ok(strings(&["new T", "new x", "new y"])))
        .unwrap();
    let older = list
        .complete_batch(first, Ok(strings(&["old T", "old x", "old y"])))
        .unwrap();

    assert_eq!(newer, BatchOutcome::Applied { written: 3, skipped: 0 });
    assert_eq!(older, BatchOutcome::Superseded { generation: 1, current: 2 });
    assert_eq!(list.title_row().unwrap().translation(), "new T");
    assert_eq!(list.rows()[0].translation(), "new x");
    assert_eq!(list.rows()[1].translation(), "new y");

    let events = events.lock().unwrap();
    assert!(matches!(events.last(), Some(TranslationEvent::Superseded { generation: 1, current: 2 })));
}

#[test]
fn test_overlappingBatches_olderCompletingFirst_shouldStillBeDiscarded() {
    let mut list = list_with(StalePolicy::Discard);

    let first = list.prepare_batch("en", "fr").unwrap().expect("first batch");
    let second = list.prepare_batch("en", "fr").unwrap().expect("second batch");

    let older = list.complete_batch(first, Ok(strings(&["old T", "old x", "old y"]))).unwrap();
    assert_eq!(older, BatchOutcome::Superseded { generation: 1, current: 2 });
    assert_eq!(list.pending_count(), 3);

    list.complete_batch(second, Ok(strings(&["new T", "new x", "new y"]))).unwrap();
    assert_eq!(list.rows()[1].translation(), "new y");
}

#[test]
fn test_overlappingBatches_withApplyPolicy_shouldLetLastWriteWin() {
    let mut list = list_with(StalePolicy::Apply);

    let first = list.prepare_batch("en", "fr").unwrap().expect("first batch");
    let second = list.prepare_batch("en", "fr").unwrap().expect("second batch");

    list.complete_batch(second, Ok(strings(&["new T", "new x", "new y"]))).unwrap();
    let older = list.complete_batch(first, Ok(strings(&["old T", "old x", "old y"]))).unwrap();

    assert_eq!(older, BatchOutcome::Applied { written: 3, skipped: 0 });
    assert_eq!(list.rows()[0].translation(), "old x");
}

#[test]
fn test_userEditWhilePending_withDiscardPolicy_shouldKeepEdit() {
    let mut list = list_with(StalePolicy::Discard);

    let batch = list.prepare_batch("en", "fr").unwrap().expect("batch");
    list.edit_row(RowRef::Body(1), "typed by user").unwrap();

    let outcome = list
        .complete_batch(batch, Ok(strings(&["Le T", "X", "Y"])))
        .unwrap();

    assert_eq!(outcome, BatchOutcome::Applied { written: 2, skipped: 1 });
    assert_eq!(list.rows()[0].translation(), "X");
    assert_eq!(list.rows()[1].translation(), "typed by user");
}

#[test]
fn test_userEditWhilePending_withApplyPolicy_shouldOverwriteEdit() {
    let mut list = list_with(StalePolicy::Apply);

    let batch = list.prepare_batch("en", "fr").unwrap().expect("batch");
    list.set_title_translation("typed title");

    list.complete_batch(batch, Ok(strings(&["Le T", "X", "Y"]))).unwrap();

    assert_eq!(list.title_row().unwrap().translation(), "Le T");
}

#[test]
fn test_completeBatch_withErrorOnStaleBatch_shouldStillReportFailure() {
    let mut list = list_with(StalePolicy::Discard);
    let events = capture_events(&mut list);

    let first = list.prepare_batch("en", "fr").unwrap().expect("first batch");
    let _second = list.prepare_batch("en", "fr").unwrap().expect("second batch");

    let result = list.complete_batch(
        first,
        Err(TranslationError::MalformedResponse("timeout".to_string())),
    );

    assert!(result.is_err());
    let events = events.lock().unwrap();
    assert!(matches!(events.last(), Some(TranslationEvent::Failed { generation: 1, .. })));
}

#[test]
fn test_prepareBatch_withNothingEmpty_shouldNotBumpGeneration() {
    let mut list = list_with(StalePolicy::Discard);
    let batch = list.prepare_batch("en", "fr").unwrap().expect("batch");
    list.complete_batch(batch, Ok(strings(&["a", "b", "c"]))).unwrap();

    assert!(list.prepare_batch("en", "fr").unwrap().is_none());
    assert_eq!(list.generation(), 1);
}
