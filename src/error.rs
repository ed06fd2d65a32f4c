use std::fmt;

/// Unified error type for catalog loading and image retrieval
#[derive(Debug)]
pub enum SheetError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse catalog JSON
    Parse(serde_json::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// File I/O error
    Io(std::io::Error),
    /// Image decoding error
    Image(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::Network(e) => write!(f, "Network error: {}", e),
            SheetError::Parse(e) => write!(f, "Parse error: {}", e),
            SheetError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            SheetError::Io(e) => write!(f, "I/O error: {}", e),
            SheetError::Image(msg) => write!(f, "Image error: {}", msg),
        }
    }
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetError::Network(e) => Some(e),
            SheetError::Parse(e) => Some(e),
            SheetError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SheetError {
    fn from(err: reqwest::Error) -> Self {
        SheetError::Network(err)
    }
}

impl From<serde_json::Error> for SheetError {
    fn from(err: serde_json::Error) -> Self {
        SheetError::Parse(err)
    }
}

impl From<std::io::Error> for SheetError {
    fn from(err: std::io::Error) -> Self {
        SheetError::Io(err)
    }
}

/// Result type alias for catalog and image operations
pub type SheetResult<T> = Result<T, SheetError>;
