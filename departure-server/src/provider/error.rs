//! Provider error types.

/// Errors from fetching or decoding upstream answers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not well-formed XML
    #[error("XML parse error: {0}")]
    Xml(String),

    /// Upstream reported an error inside an otherwise valid document
    #[error("upstream error: {0}")]
    Upstream(String),
}
