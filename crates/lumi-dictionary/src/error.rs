/// Internal provider failures. These never cross the `DictionaryProvider`
/// boundary: lookups log them and fail soft with `None`.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A blocking task panicked while holding the connection lock.
    #[error("storage lock poisoned")]
    Poisoned,
}
