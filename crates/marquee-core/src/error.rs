pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid dataset: {message}")]
    InvalidDataset { message: String },

    #[cfg(feature = "fetch")]
    #[error("Dataset fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}
