/*!
 * Tests for error types and conversions
 */

use captionlist::errors::{AppError, CaptionError, ListError, ProviderError, TranslationError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_translationError_fromProviderError_shouldWrapCorrectly() {
    let error: TranslationError = ProviderError::ConnectionError("Host unreachable".to_string()).into();
    let display = format!("{}", error);
    assert!(display.contains("Provider error"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_translationError_lengthMismatch_shouldDisplayCounts() {
    let error = TranslationError::LengthMismatch { expected: 3, actual: 1 };
    assert_eq!(error.to_string(), "Translation count mismatch: expected 3, got 1");
}

#[test]
fn test_listError_shouldDisplayCorrectly() {
    assert!(ListError::AlreadyMaterialized.to_string().contains("already been materialized"));
    assert!(ListError::NoSuchRow("title".to_string()).to_string().contains("title"));
}

#[test]
fn test_appError_conversions_shouldWrapSources() {
    let app: AppError = CaptionError::DuplicateSubtitle("a".to_string()).into();
    assert!(matches!(app, AppError::Caption(_)));

    let app: AppError = ListError::AlreadyMaterialized.into();
    assert!(matches!(app, AppError::List(_)));

    let app: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("odd").into();
    assert!(matches!(app, AppError::Unknown(message) if message == "odd"));
}
