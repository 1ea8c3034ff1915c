use thiserror::Error;

/// Errors raised while reading a spreadsheet from a backend.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{backend} backend error: {message}")]
    Backend { backend: String, message: String },

    #[error("sheet `{0}` not found")]
    MissingSheet(String),

    #[error("invalid cell value at row {row}, column {col}: {message}")]
    InvalidValue { row: u32, col: u32, message: String },
}

impl IoError {
    pub fn from_backend<E: std::error::Error>(backend: &str, err: E) -> Self {
        IoError::Backend {
            backend: backend.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "calamine")]
impl From<calamine::Error> for IoError {
    fn from(err: calamine::Error) -> Self {
        IoError::from_backend("calamine", err)
    }
}
