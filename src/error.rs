//! Error types for the request/response core.
//!
//! One error enum covers the whole crate: transport failures raised from
//! `fetch()`, construction mistakes (bad URLs, blank header names), and
//! the text-integrity check performed by [`Response::text`].
//!
//! [`Response::text`]: crate::Response::text

/// The error type for request construction and fetching.
///
/// Construction errors (invalid URL, blank header name) are surfaced at
/// the call that triggered them. Transport errors are the single checked
/// failure mode of `fetch()`. Nothing is retried or defaulted here; a
/// caller who wants retries wraps the transport in a
/// [`RetryWire`](crate::RetryWire).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level failure while sending the request or reading the
    /// response.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An invalid URL was provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration: a blank header name, a malformed method
    /// token, a URI that cannot carry the requested change.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The response body is not valid UTF-8 text.
    ///
    /// Raised by [`Response::text`](crate::Response::text) when the
    /// decoded text contains the Unicode replacement character, which
    /// signals truncated or binary content misread as text. Carries the
    /// one-indexed line where the corruption starts and the total body
    /// length in bytes.
    #[error("broken Unicode text at line #{line} ({bytes} bytes)")]
    BrokenText {
        /// Line of the first replacement character, one-indexed.
        line: usize,
        /// Total length of the raw body in bytes.
        bytes: usize,
    },

    /// Failed to deserialize the response body.
    ///
    /// Preserves the raw response text so the failure can be debugged
    /// in production.
    #[error("failed to deserialize response: {source}")]
    Deserialization {
        /// The raw response body that failed to deserialize.
        raw_response: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// All retry attempts of a [`RetryWire`](crate::RetryWire) were
    /// exhausted.
    #[error("max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// The number of attempts made.
        attempts: usize,
        /// The last error encountered before giving up.
        last_error: Box<Error>,
    },
}

impl Error {
    /// Wraps any error source as a transport failure.
    ///
    /// Custom [`Wire`](crate::Wire) implementations use this to signal
    /// network-level problems:
    ///
    /// ```
    /// use wireline::Error;
    ///
    /// let err = Error::transport("connection reset by peer");
    /// assert!(err.is_transport());
    /// ```
    pub fn transport(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Transport(source.into())
    }

    /// Returns `true` for network-level failures, the only category a
    /// retrying wire will re-send on.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns the raw response body if this error preserved one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Deserialization { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
