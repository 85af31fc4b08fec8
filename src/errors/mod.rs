use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenderError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    // Parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Source-level failures surfaced to the aggregator
    #[error("Source failed: {0}")]
    Source(String),
}

impl From<url::ParseError> for TenderError {
    fn from(err: url::ParseError) -> Self {
        TenderError::InvalidUrl(err.to_string())
    }
}

pub type TenderResult<T> = Result<T, TenderError>;
