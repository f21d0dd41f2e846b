//! Directory errors.

use thiserror::Error;

/// Failure to fetch or parse the directory document.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The directory source returned a non-2xx response.
    #[error("unexpected response from directory source: {0}")]
    UnexpectedResponse(String),

    /// The directory document could not be read from disk.
    #[error("failed to read directory document")]
    Io(#[source] std::io::Error),

    /// The directory document is not valid JSON of the expected shape.
    #[error("failed to parse directory document")]
    Parse(#[source] serde_json::Error),
}
