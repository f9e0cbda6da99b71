/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Required embedding-service settings are absent. Raised before any
    /// network call is attempted; callers should treat this as "service
    /// unavailable" rather than a generic internal failure.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The embedding service failed for a single on-demand embed where there
    /// is no batch to absorb the failure into.
    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
