//! Request descriptions passed to the executor.

use crate::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;

/// A single API request: method, endpoint path, query parameters, extra
/// headers, and an optional JSON body.
///
/// The built-in accessors on [`Client`](crate::Client) construct these
/// internally; [`Client::request`](crate::Client::request) accepts one
/// directly for endpoints without a dedicated accessor.
///
/// # Examples
///
/// ```
/// use ipc_artsnoa::ApiRequest;
///
/// let request = ApiRequest::get("v1/ip").query_param("ip", "8.8.8.8");
/// assert_eq!(request.path, "v1/ip");
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// The HTTP method.
    pub method: Method,

    /// The endpoint path, relative to the configured base URL.
    pub path: String,

    /// Query parameters, appended percent-encoded in insertion order.
    pub query: Vec<(String, String)>,

    /// Extra headers for this request. These override the configuration's
    /// default headers on name collision.
    pub headers: HeaderMap,

    /// The JSON body, omitted entirely when `None`.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request for the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request for the given path.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Appends a query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a per-request header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Config(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Config(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the JSON body.
    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}
