use std::sync::Arc;

use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum SvError {
    /// An error occurred during an HTTP request (timeout, connect failure, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A JSON payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The server rejected the stored credentials (HTTP 401).
    #[error("Unauthorized at {url}")]
    Unauthorized {
        /// The URL that returned the error.
        url: String,
    },

    /// The server is throttling this client (HTTP 429).
    #[error("Rate limited at {url}")]
    RateLimited {
        /// The URL that returned the error.
        url: String,
    },

    /// The backend answered, but reported a logical failure (bad password, validation, ...).
    #[error("API error ({status}): {message}")]
    Api {
        /// The HTTP status code of the response.
        status: u16,
        /// The message the backend attached to the failure.
        message: String,
    },

    /// No fallback recipe exists for the endpoint.
    #[error("no fallback available for {endpoint}")]
    NoFallback {
        /// The method and path that could not be synthesized.
        endpoint: String,
    },

    /// The request queue has been shut down.
    #[error("request queue is closed")]
    QueueClosed,

    /// The local store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// An I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A failure observed by every caller that joined the same in-flight fetch.
    #[error(transparent)]
    Shared(Arc<SvError>),
}

impl SvError {
    /// Unwraps an error that was shared between joiners of one fetch.
    ///
    /// The inner error is returned by value when this caller holds the last reference.
    pub fn from_shared(err: Arc<Self>) -> Self {
        Arc::try_unwrap(err).unwrap_or_else(SvError::Shared)
    }

    /// The underlying error, looking through any `Shared` wrappers.
    pub fn root(&self) -> &SvError {
        match self {
            SvError::Shared(inner) => inner.root(),
            other => other,
        }
    }

    /// The HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            SvError::Status { status, .. } | SvError::Api { status, .. } => Some(*status),
            SvError::Unauthorized { .. } => Some(401),
            SvError::RateLimited { .. } => Some(429),
            SvError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure happened below HTTP: timeout, refused connection, DNS.
    pub fn is_transport(&self) -> bool {
        match self.root() {
            SvError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }

    /// Whether the backend answered with a logical failure that must reach the caller.
    pub fn is_application(&self) -> bool {
        matches!(self.root(), SvError::Api { .. })
    }
}
