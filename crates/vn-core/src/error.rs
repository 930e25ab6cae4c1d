/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when parsing story data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A scene reference string could not be parsed.
    #[error("invalid scene reference: \"{0}\"")]
    InvalidSceneRef(String),

    /// A story document was not valid JSON for the expected shape.
    #[error("invalid story data: {0}")]
    Json(#[from] serde_json::Error),
}
