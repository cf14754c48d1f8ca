use crate::errors::TranslationError;

/// Notification emitted by the translation list while batches are processed
#[derive(Debug, Clone)]
pub enum TranslationEvent {
    /// A batch was handed to the translation service
    Submitted { generation: u64, rows: usize },
    /// A batch completed and was written back
    Completed { generation: u64, written: usize, skipped: usize },
    /// A batch completed after a newer one was issued and was ignored
    Superseded { generation: u64, current: u64 },
    /// The translation service reported an error; no row was touched
    Failed { generation: u64, error: TranslationError },
}

/// Callback receiving translation events
pub type EventListener = Box<dyn Fn(&TranslationEvent) + Send + Sync>;
