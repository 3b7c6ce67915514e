use thiserror::Error as ThisError;

/// Store errors
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Store is not configured")]
    NotConfigured,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Could not sign token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}
