/*!
 * Tests for the provider-backed translation service
 */

use captionlist::captions::EditableCaptionSet;
use captionlist::errors::{ProviderError, TranslationError};
use captionlist::providers::mock::MockProvider;
use captionlist::render::NullRenderer;
use captionlist::translation::{
    BatchOutcome, ProviderTranslator, TranslatableRow, TranslationList, TranslationService,
    TranslatorOptions,
};

use crate::common::sample_records;

fn texts(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_translateBatch_withWorkingProvider_shouldReturnOneTranslationPerText() {
    let translator = ProviderTranslator::new(MockProvider::working());

    let result = translator
        .translate_batch(&texts(&["Hello", "Good\nbye"]), "en", "fr")
        .await
        .unwrap();

    assert_eq!(result, texts(&["[TRANSLATED] Hello", "[TRANSLATED] Good\n[TRANSLATED] bye"]));
    assert_eq!(translator.provider().request_count(), 1);
}

#[tokio::test]
async fn test_translateBatch_withNoTexts_shouldNotCallProvider() {
    let translator = ProviderTranslator::new(MockProvider::working());

    let result = translator.translate_batch(&[], "en", "fr").await.unwrap();

    assert!(result.is_empty());
    assert_eq!(translator.provider().request_count(), 0);
}

#[tokio::test]
async fn test_translateBatch_withFailingProvider_shouldWrapProviderError() {
    let translator = ProviderTranslator::new(MockProvider::failing());

    let result = translator.translate_batch(&texts(&["Hello"]), "en", "fr").await;

    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::ApiError { status_code: 500, .. }))
    ));
}

#[tokio::test]
async fn test_translateBatch_withTruncatedOrEmptyReply_shouldReportMalformedResponse() {
    for provider in [MockProvider::truncated(), MockProvider::empty()] {
        let translator = ProviderTranslator::new(provider);
        let result = translator.translate_batch(&texts(&["Hello"]), "en", "fr").await;
        assert!(matches!(result, Err(TranslationError::MalformedResponse(_))));
    }
}

#[test]
fn test_systemPrompt_shouldUseLanguageNames() {
    let translator = ProviderTranslator::with_options(
        MockProvider::working(),
        TranslatorOptions {
            system_prompt: "From {source_language} to {target_language}.".to_string(),
            temperature: 0.1,
        },
    );

    let prompt = translator.system_prompt("en", "de");

    assert!(prompt.starts_with("From English to German."));
    assert!(prompt.contains("<<END>>"));
}

#[tokio::test]
async fn test_translationList_withMockTranslator_shouldFillEveryRow() {
    let mut list = TranslationList::new(EditableCaptionSet::new(), sample_records(), Some("T"));
    list.materialize(&mut NullRenderer).unwrap();
    let translator = ProviderTranslator::new(MockProvider::slow(5));

    let outcome = list.translate_all(&translator, "en", "fr").await.unwrap();

    assert_eq!(outcome, BatchOutcome::Applied { written: 3, skipped: 0 });
    assert_eq!(list.title_row().unwrap().translation(), "[TRANSLATED] T");
    assert_eq!(list.rows()[0].translation(), "[TRANSLATED] x");
    assert_eq!(list.rows()[1].translation(), "[TRANSLATED] y");
}
