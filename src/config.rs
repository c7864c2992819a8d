//! Client configuration.
//!
//! [`Config`] is validated when built and immutable afterwards: an empty
//! API key, a zero timeout, an unparseable URL, or an invalid header all
//! fail at build time with [`Error::Config`], so no partially-valid
//! configuration is ever observable.

use crate::{retry::RetryPolicy, Error, Result};
use http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use std::time::Duration;
use url::Url;

/// Default base URL of the hosted service.
pub const DEFAULT_BASE_URL: &str = "https://ipc.artsnoa.com/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Validated, immutable client configuration.
///
/// # Examples
///
/// ```
/// use ipc_artsnoa::Config;
/// use std::time::Duration;
///
/// let config = Config::builder()
///     .api_key("your-api-key")
///     .timeout(Duration::from_secs(60))
///     .max_retries(5)
///     .build()?;
/// assert_eq!(config.max_retries(), 5);
/// # Ok::<(), ipc_artsnoa::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    api_key: String,
    base_url: String,
    backup_url: Option<String>,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    verify_tls: bool,
    auth_value: HeaderValue,
    user_agent: Option<HeaderValue>,
    extra_headers: HeaderMap,
}

impl Config {
    /// Creates a new [`ConfigBuilder`] with default settings.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads `IPC_API_KEY` (required), `IPC_BASE_URL`, `IPC_TIMEOUT`
    /// (seconds), `IPC_MAX_RETRIES`, and `IPC_VERIFY_SSL` (`true`/`false`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `IPC_API_KEY` is unset or any variable
    /// fails to parse.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("IPC_API_KEY")
            .map_err(|_| Error::Config("IPC_API_KEY environment variable is not set".to_string()))?;
        let mut builder = Self::builder().api_key(key);

        if let Ok(url) = std::env::var("IPC_BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Ok(raw) = std::env::var("IPC_TIMEOUT") {
            let secs: u64 = raw.parse().map_err(|_| {
                Error::Config(format!("IPC_TIMEOUT must be a number of seconds, got {raw:?}"))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Ok(raw) = std::env::var("IPC_MAX_RETRIES") {
            let retries: u32 = raw.parse().map_err(|_| {
                Error::Config(format!("IPC_MAX_RETRIES must be an integer, got {raw:?}"))
            })?;
            builder = builder.max_retries(retries);
        }
        if let Ok(raw) = std::env::var("IPC_VERIFY_SSL") {
            builder = builder.verify_tls(raw.eq_ignore_ascii_case("true"));
        }

        builder.build()
    }

    /// The configured API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The primary base URL, with any trailing slash stripped.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The backup base URL, if one is configured.
    pub fn backup_url(&self) -> Option<&str> {
        self.backup_url.as_deref()
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The total attempt budget per host.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// The backoff unit: the sleep after the first failed attempt.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Whether TLS certificates are verified.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// The configured user agent, if any.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_ref().and_then(|v| v.to_str().ok())
    }

    /// The `Authorization` header value derived from the API key.
    pub fn auth_header(&self) -> HeaderValue {
        self.auth_value.clone()
    }

    /// All headers sent with every request: JSON content-type and accept,
    /// the bearer token, the optional user agent, overlaid with any extra
    /// headers (extras win on name collision).
    pub fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_value.clone());
        if let Some(user_agent) = &self.user_agent {
            headers.insert(USER_AGENT, user_agent.clone());
        }
        for (name, value) in &self.extra_headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_delay)
    }
}

/// Builder for [`Config`].
///
/// Header names and values are validated as they are set; everything else
/// is validated by [`ConfigBuilder::build`].
pub struct ConfigBuilder {
    api_key: Option<String>,
    base_url: String,
    backup_url: Option<String>,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    verify_tls: bool,
    user_agent: Option<String>,
    extra_headers: HeaderMap,
}

impl ConfigBuilder {
    /// Creates a builder with the default base URL, a 30s timeout, three
    /// attempts, a 1s backoff unit, and TLS verification on.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            backup_url: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            verify_tls: true,
            user_agent: None,
            extra_headers: HeaderMap::new(),
        }
    }

    /// Sets the API key (required).
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the primary base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets a backup host. When the primary host's whole attempt sequence
    /// fails, the request is repeated once against this URL.
    pub fn backup_url(mut self, url: impl Into<String>) -> Self {
        self.backup_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the total attempt budget per host.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff unit. The sleep after attempt `n` (0-indexed) is
    /// `retry_delay * 2^n`.
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Disables or re-enables TLS certificate verification.
    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Sets a custom `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Adds an extra header sent with every request. Extra headers override
    /// the built-in defaults on name collision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Config(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Config(format!("invalid header value: {e}")))?;
        self.extra_headers.insert(name, value);
        Ok(self)
    }

    /// Validates and builds the [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the API key is missing or empty, the
    /// timeout is zero, or a URL does not parse as http/https.
    pub fn build(self) -> Result<Config> {
        let api_key = match self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(Error::Config("API key is required".to_string())),
        };

        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be positive".to_string()));
        }

        let base_url = normalize_url(&self.base_url)?;
        let backup_url = self.backup_url.as_deref().map(normalize_url).transpose()?;

        let auth_value = HeaderValue::try_from(format!("Bearer {api_key}"))
            .map_err(|e| Error::Config(format!("API key is not a valid header value: {e}")))?;

        let user_agent = self
            .user_agent
            .map(|ua| {
                HeaderValue::try_from(ua.as_str())
                    .map_err(|e| Error::Config(format!("invalid user agent: {e}")))
            })
            .transpose()?;

        Ok(Config {
            api_key,
            base_url,
            backup_url,
            timeout: self.timeout,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
            verify_tls: self.verify_tls,
            auth_value,
            user_agent,
            extra_headers: self.extra_headers,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips any trailing slash and checks the URL parses with an http(s)
/// scheme.
fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim_end_matches('/');
    let parsed =
        Url::parse(trimmed).map_err(|e| Error::Config(format!("invalid base URL {raw:?}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::Config(format!(
            "base URL must use http or https, got {raw:?}"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_with_defaults() {
        let config = Config::builder().api_key("test-key").build().unwrap();

        assert_eq!(config.api_key(), "test-key");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.backup_url(), None);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries(), 3);
        assert!(config.verify_tls());
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = Config::builder().api_key("").build();
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Config::builder().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = Config::builder()
            .api_key("k")
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Config::builder().api_key("k").base_url("not a url").build();
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Config::builder()
            .api_key("k")
            .base_url("ftp://example.com")
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config::builder()
            .api_key("k")
            .base_url("https://custom.example.com/")
            .backup_url("https://backup.example.com/api/")
            .build()
            .unwrap();

        assert_eq!(config.base_url(), "https://custom.example.com");
        assert_eq!(config.backup_url(), Some("https://backup.example.com/api"));
    }

    #[test]
    fn default_headers_carry_bearer_token() {
        let config = Config::builder().api_key("secret").build().unwrap();
        let headers = config.default_headers();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert!(headers.get(USER_AGENT).is_none());
    }

    #[test]
    fn extra_headers_override_defaults() {
        let config = Config::builder()
            .api_key("secret")
            .user_agent("my-app/1.0")
            .header("Accept", "application/vnd.api+json")
            .unwrap()
            .header("X-Request-Source", "tests")
            .unwrap()
            .build()
            .unwrap();
        let headers = config.default_headers();

        assert_eq!(headers.get(ACCEPT).unwrap(), "application/vnd.api+json");
        assert_eq!(headers.get(USER_AGENT).unwrap(), "my-app/1.0");
        assert_eq!(headers.get("x-request-source").unwrap(), "tests");
        // Untouched defaults survive the overlay.
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
    }

    #[test]
    fn invalid_extra_header_is_rejected() {
        let result = Config::builder().api_key("k").header("bad name", "v");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    // Env vars are process-global, so the from_env scenarios run in one
    // sequential test.
    #[test]
    fn from_env_reads_and_validates() {
        std::env::remove_var("IPC_API_KEY");
        assert!(matches!(Config::from_env(), Err(Error::Config(_))));

        std::env::set_var("IPC_API_KEY", "env-key");
        std::env::set_var("IPC_BASE_URL", "https://env.example.com/");
        std::env::set_var("IPC_TIMEOUT", "60");
        std::env::set_var("IPC_MAX_RETRIES", "5");
        std::env::set_var("IPC_VERIFY_SSL", "false");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key(), "env-key");
        assert_eq!(config.base_url(), "https://env.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_retries(), 5);
        assert!(!config.verify_tls());

        std::env::set_var("IPC_TIMEOUT", "soon");
        assert!(matches!(Config::from_env(), Err(Error::Config(_))));

        for var in [
            "IPC_API_KEY",
            "IPC_BASE_URL",
            "IPC_TIMEOUT",
            "IPC_MAX_RETRIES",
            "IPC_VERIFY_SSL",
        ] {
            std::env::remove_var(var);
        }
    }
}
