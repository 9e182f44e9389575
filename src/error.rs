//! Error types for `taskchat`.

/// Errors that can occur while managing tasks, preferences and configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The task database was unreachable or rejected a write.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// No task exists with the given id.
    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    /// The task database lock was poisoned by a panicking writer.
    #[error("Storage error: database lock poisoned")]
    StoragePoisoned,

    /// The completion client could not be set up.
    #[error("Completion client error: {0}")]
    Completion(#[from] crate::completion::CompletionError),

    /// The log subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Configuration is missing or invalid.
    ///
    /// Carries every validation message so callers can list them all.
    #[error("Invalid configuration: {}", .0.join("; "))]
    Config(Vec<String>),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(vec![err.to_string()])
    }
}

impl Error {
    /// Whether this error means the referenced task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_))
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
