//! Error types for star-fetch
//!
//! Each pipeline stage has its own error enum so the orchestrator can tell
//! which stage failed:
//! - [`ResolutionError`] - the name lookup was unreachable, rejected, or empty
//! - [`LocateError`] - no artifact location could be derived
//! - [`DownloadError`] - the product could not be written to local storage
//! - [`TransportError`] - raw failures reported by a [`Transport`](crate::transport::Transport)
//!
//! All of them convert into the crate-level [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for star-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for star-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "lookup.base_url")
        key: Option<String>,
    },

    /// Name lookup failed
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Artifact location could not be derived
    #[error("locate error: {0}")]
    Locate(#[from] LocateError),

    /// Product download failed
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// Transport-level failure outside a fetch (catalog queries)
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The diagnostics log could not be opened or written
    #[error("diagnostics log {path} unavailable: {source}")]
    Diagnostics {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The identifier list contained no identifiers
    #[error("no star IDs found in {0}")]
    EmptyIdentifierList(PathBuf),

    /// Unexpected catalog response shape
    #[error("invalid catalog response: {0}")]
    InvalidCatalogResponse(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a configuration error tied to a config key
    pub(crate) fn config(message: impl Into<String>, key: &str) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

/// Errors raised while resolving an identifier through the name lookup service
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The request could not be sent or the body could not be read
    #[error("{0}")]
    Transport(String),

    /// The lookup service answered with a non-success status
    #[error("lookup service returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
    },

    /// The call succeeded but returned no body
    #[error("lookup service returned an empty response")]
    EmptyResponse,
}

impl From<TransportError> for ResolutionError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, url } => ResolutionError::Status { status, url },
            other => ResolutionError::Transport(other.to_string()),
        }
    }
}

/// Errors raised while deriving an artifact location
#[derive(Debug, Error)]
pub enum LocateError {
    /// No resolution payload was supplied
    #[error("no resolution payload available")]
    MissingResolution,

    /// The naming strategy could not derive a product name from the identifier
    #[error("cannot derive product name from identifier '{0}'")]
    UnrecognizedIdentifier(String),

    /// The output directory could not be created
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while downloading an artifact to local storage
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The destination file could not be opened for writing
    #[error("failed to open file {path}: {source}")]
    OpenDestination {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The download service answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
    },

    /// The download service answered with success but sent no bytes
    #[error("empty response body from {url}")]
    EmptyBody {
        /// Request URL
        url: String,
    },

    /// The request failed or the body stream broke off
    #[error("{0}")]
    Transport(String),

    /// Writing the body to the destination failed
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub(crate) fn from_transport(err: TransportError, path: PathBuf) -> Self {
        match err {
            TransportError::Status { status, url } => DownloadError::Status { status, url },
            TransportError::Io(source) => DownloadError::Write { path, source },
            TransportError::Request(e) => DownloadError::Transport(e.to_string()),
            TransportError::Client(msg) => DownloadError::Transport(msg),
        }
    }
}

/// Errors reported by a transport implementation
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be sent, timed out, or the body could not be read
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success status code
    #[error("HTTP {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
    },

    /// Writing a streamed body to its sink failed
    #[error("stream write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client itself could not be built or used
    #[error("{0}")]
    Client(String),
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_status_keeps_its_code_when_resolving() {
        let err: ResolutionError = TransportError::Status {
            status: 500,
            url: "https://mast.example/invoke".into(),
        }
        .into();

        assert!(matches!(err, ResolutionError::Status { status: 500, .. }));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn transport_client_error_collapses_to_resolution_transport() {
        let err: ResolutionError = TransportError::Client("no client".into()).into();
        assert!(matches!(err, ResolutionError::Transport(ref m) if m == "no client"));
    }

    #[test]
    fn download_error_maps_sink_failures_to_write() {
        let err = DownloadError::from_transport(
            TransportError::Io(std::io::Error::other("disk full")),
            PathBuf::from("data/raw/x.fits"),
        );
        match err {
            DownloadError::Write { path, .. } => assert_eq!(path, PathBuf::from("data/raw/x.fits")),
            other => panic!("expected Write, got {other:?}"),
        }
    }

    #[test]
    fn stage_errors_lift_into_crate_error() {
        let err: Error = LocateError::MissingResolution.into();
        assert!(matches!(err, Error::Locate(LocateError::MissingResolution)));
        assert_eq!(
            err.to_string(),
            "locate error: no resolution payload available"
        );
    }
}
