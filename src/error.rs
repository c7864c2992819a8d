//! Error types for API calls.
//!
//! Every failure path in this crate terminates in exactly one [`Error`]
//! variant. HTTP-level failures carry the decoded server payload when one
//! was sent, so diagnostics never lose the raw response.

use http::StatusCode;
use serde_json::Value;

/// The error type for all client operations.
///
/// Callers are expected to branch on the variant: [`Error::Authentication`]
/// is a credentials problem, [`Error::RateLimit`] a signal to slow down,
/// [`Error::Validation`] a caller bug, and so on.
///
/// # Examples
///
/// ```no_run
/// use ipc_artsnoa::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// # let client = Client::from_env()?;
/// match client.get_ip(None).await {
///     Ok(info) => println!("Your IP: {}", info.ip),
///     Err(Error::Authentication { message, .. }) => {
///         eprintln!("Check your API key: {message}");
///     }
///     Err(Error::RateLimit { message, .. }) => {
///         eprintln!("Slow down: {message}");
///     }
///     Err(e) => eprintln!("Lookup failed: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server rejected the API key (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication {
        /// The server's error message.
        message: String,
        /// The decoded JSON error body, if the server sent one.
        payload: Option<Value>,
    },

    /// The rate limit was exceeded (HTTP 429).
    ///
    /// The executor retries this automatically up to the configured
    /// attempt budget before surfacing it.
    #[error("rate limit exceeded: {message}")]
    RateLimit {
        /// The server's error message.
        message: String,
        /// The decoded JSON error body, if the server sent one.
        payload: Option<Value>,
    },

    /// The server rejected the request as malformed (HTTP 400).
    #[error("request validation failed: {message}")]
    Validation {
        /// The server's error message.
        message: String,
        /// The decoded JSON error body, if the server sent one.
        payload: Option<Value>,
    },

    /// The API returned an error response not covered by a more specific
    /// variant, or violated the protocol (e.g. a 2xx response with a
    /// non-JSON body).
    ///
    /// 5xx statuses are retried; everything else surfaces immediately.
    #[error("API request failed ({status}): {message}")]
    Api {
        /// The HTTP status code of the response.
        status: StatusCode,
        /// The server's error message or a protocol-violation description.
        message: String,
        /// The decoded JSON error body, if the server sent one.
        payload: Option<Value>,
    },

    /// A network-level failure: connection refused, host unreachable, DNS
    /// resolution failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Invalid configuration.
    ///
    /// Raised synchronously at construction time, before any network
    /// activity.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this error is transient and worth retrying.
    ///
    /// Rate limits, timeouts, and 5xx server errors qualify; everything
    /// else does not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimit { .. } => true,
            Error::Timeout(_) => true,
            Error::Api { status, .. } => status.is_server_error(),
            Error::Authentication { .. }
            | Error::Validation { .. }
            | Error::Network(_)
            | Error::Config(_) => false,
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Authentication { .. } => Some(StatusCode::UNAUTHORIZED),
            Error::RateLimit { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Error::Validation { .. } => Some(StatusCode::BAD_REQUEST),
            Error::Api { status, .. } => Some(*status),
            Error::Network(_) | Error::Timeout(_) | Error::Config(_) => None,
        }
    }

    /// Returns the decoded server error payload, if one was preserved.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::Authentication { payload, .. }
            | Error::RateLimit { payload, .. }
            | Error::Validation { payload, .. }
            | Error::Api { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
