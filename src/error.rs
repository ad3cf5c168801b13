use thiserror::Error;

/// Failures while turning a raw XML document into records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Not parseable as XML
    #[error("Malformed XML document: {0}")]
    MalformedDocument(String),

    /// The remote service answered with an error payload instead of a collection
    #[error("BGG API returned: {0}")]
    ApiError(String),

    /// Document parsed but held zero game entries
    #[error("No games found in collection")]
    EmptyCollection,
}

/// Main error type for the collection engine
#[derive(Error, Debug)]
pub enum CollectionError {
    /// Network/HTTP failure fetching a document
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Primary or lookup document could not be normalized
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A single enrichment batch failed (non-fatal)
    #[error("Enrichment batch {batch} failed: {message}")]
    EnrichmentBatch { batch: usize, message: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for CollectionError {
    fn from(s: String) -> Self {
        CollectionError::Other(s)
    }
}

impl From<&str> for CollectionError {
    fn from(s: &str) -> Self {
        CollectionError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CollectionError>;
