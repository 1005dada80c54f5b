use std::fmt;
use thiserror::Error;

/// The error type for adlg2 operations.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client-side input validation failed before any network call.
    Validation,

    /// Configuration error (missing fields, conflicting credential modes).
    ConfigInvalid,

    /// Credentials exist but are invalid, malformed or could not be obtained.
    CredentialInvalid,

    /// Request cannot be built or signed (missing authority, bad header, etc.).
    RequestInvalid,

    /// The service reported it could not complete the operation within its
    /// internal time budget. Retryable.
    OperationTimedOut,

    /// The service rejected a bearer token. Retryable after the cached
    /// token is dropped.
    AuthTokenInvalid,

    /// Any other non-success service response; carries the raw body.
    UnexpectedService,

    /// The retry attempt cap was reached; wraps the last classified error.
    ExhaustedRetries,

    /// Unexpected errors (transport, I/O, serialization, etc.).
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the retry policy may re-attempt after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::OperationTimedOut | ErrorKind::AuthTokenInvalid
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a config invalid error.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a credential invalid error.
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a request invalid error.
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an operation timed out error.
    pub fn operation_timed_out(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OperationTimedOut, message)
    }

    /// Create an auth token invalid error.
    pub fn auth_token_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthTokenInvalid, message)
    }

    /// Create an unexpected service error carrying the raw response body.
    pub fn unexpected_service(status: http::StatusCode, body: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::UnexpectedService,
            format!("service returned {status}: {body}"),
        )
    }

    /// Create an exhausted retries error wrapping the last attempt's error.
    pub fn exhausted_retries(attempts: u32, last: Error) -> Self {
        Self::new(
            ErrorKind::ExhaustedRetries,
            format!("gave up after {attempts} attempts: {last}"),
        )
        .with_source(last)
    }

    /// Create an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "invalid input"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::OperationTimedOut => write!(f, "operation timed out"),
            ErrorKind::AuthTokenInvalid => write!(f, "auth token invalid"),
            ErrorKind::UnexpectedService => write!(f, "unexpected service error"),
            ErrorKind::ExhaustedRetries => write!(f, "retries exhausted"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
