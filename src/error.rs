#[derive(Debug, thiserror::Error)]
pub enum AutoproxyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Ambiguous query: {0}")]
    Ambiguous(String),
}

pub type Result<T> = std::result::Result<T, AutoproxyError>;
