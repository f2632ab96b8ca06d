//! Error types for the analysis client

use thiserror::Error;

/// Errors raised while talking to the analysis backend or building the client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    /// 2xx response whose body has no `results` field
    #[error("Response has no `results` field")]
    MissingResults,

    /// `results` present but one of its entries does not fit the expected shape
    #[error("Malformed results: {0}")]
    MalformedResults(String),

    /// Body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The user-facing category this error falls into.
    ///
    /// `Config` is only raised while building a client, before any request.
    /// It is reported as `Transport`: with a bad base URL the backend cannot
    /// be reached.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::Status { .. } | Self::Config(_) => ErrorKind::Transport,
            Self::MissingResults | Self::MalformedResults(_) | Self::Json(_) => {
                ErrorKind::Protocol
            },
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// What the user gets told when something goes wrong.
///
/// The underlying [`ClientError`] is only logged; the view state stores the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Submit with an empty symbol registry
    Validation,
    /// Backend answered but the body lacked usable `results`
    Protocol,
    /// Backend unreachable or answered with an error status
    Transport,
}

impl ErrorKind {
    /// Message shown to the user
    pub fn message(self) -> &'static str {
        match self {
            Self::Validation => "Please add at least one company symbol.",
            Self::Protocol => "Unexpected response from server.",
            Self::Transport => "Could not contact backend. Is Django running on port 8000?",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
