/*!
 * Error types for the captionlist crate.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors raised by the caption model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionError {
    /// A caption with this subtitle id is already present
    #[error("Caption already exists for subtitle '{0}'")]
    DuplicateSubtitle(String),
}

/// Errors that can occur while translating a batch of rows
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The language code was not recognised
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// The service answered with a different number of lines than requested
    #[error("Translation count mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Number of rows submitted
        expected: usize,
        /// Number of translations returned
        actual: usize,
    },

    /// The service reply could not be split back into lines
    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),
}

/// Errors raised by the translation list itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListError {
    /// `materialize` was called a second time
    #[error("Translation list has already been materialized")]
    AlreadyMaterialized,

    /// A row reference does not point at an existing row
    #[error("No such row: {0}")]
    NoSuchRow(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the caption model
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from the translation list
    #[error("List error: {0}")]
    List(#[from] ListError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
