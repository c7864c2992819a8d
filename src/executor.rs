//! Request execution: URL assembly, transport, error classification, the
//! retry loop, and backup-host failover.

use crate::{request::ApiRequest, Config, Error, Result};
use http::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use std::sync::Arc;
use url::Url;

/// Drives every request end to end.
///
/// A failure is classified into exactly one [`Error`] before retry
/// eligibility is decided. Transient failures (rate limits, 5xx responses,
/// timeouts) are re-attempted with exponential backoff up to the configured
/// budget; everything else surfaces immediately. When a backup host is
/// configured, the whole attempt sequence is repeated once against it after
/// the primary's budget is exhausted.
pub(crate) struct Executor {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl Executor {
    pub(crate) fn new(config: Arc<Config>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls())
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Executes a request and returns the decoded JSON body.
    pub(crate) async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        match self.run_attempts(self.config.base_url(), request).await {
            Ok(value) => Ok(value),
            Err(primary_err) => {
                let Some(backup) = self.config.backup_url() else {
                    return Err(primary_err);
                };
                tracing::warn!(
                    error = %primary_err,
                    backup,
                    method = %request.method,
                    path = %request.path,
                    "primary host exhausted, failing over to backup"
                );
                self.run_attempts(backup, request).await
            }
        }
    }

    /// Runs the bounded attempt loop against one host.
    async fn run_attempts(&self, base_url: &str, request: &ApiRequest) -> Result<Value> {
        let policy = self.config.retry_policy();

        for attempt in 0..policy.max_attempts() {
            match self.send_once(base_url, request, attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        attempt,
                        method = %request.method,
                        path = %request.path,
                        "request attempt failed"
                    );

                    if !policy.should_retry(&err, attempt) {
                        return Err(err);
                    }

                    let delay = policy.delay_for_attempt(attempt);
                    tracing::info!(
                        delay_ms = delay.as_millis() as u64,
                        attempt,
                        "retrying after backoff"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        // Only reachable with a zero attempt budget.
        Err(Error::Network(
            "retry budget exhausted before a request could be made".to_string(),
        ))
    }

    /// Sends one request and classifies the outcome.
    async fn send_once(&self, base_url: &str, request: &ApiRequest, attempt: u32) -> Result<Value> {
        let url = self.endpoint_url(base_url, request)?;

        tracing::debug!(
            method = %request.method,
            url = %url,
            attempt,
            "executing HTTP request"
        );

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .timeout(self.config.timeout());

        let default_headers = self.config.default_headers();
        for (name, value) in &default_headers {
            builder = builder.header(name, value);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        self.decode_response(response).await
    }

    /// Builds the full endpoint URL: slash-normalized join of the base and
    /// the path, with query parameters appended percent-encoded.
    fn endpoint_url(&self, base_url: &str, request: &ApiRequest) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| Error::Network(format!("invalid request URL {joined:?}: {e}")))?;

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Maps a transport-level failure onto the taxonomy: timeouts are
    /// retryable, everything else is a hard network error.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(format!("no response within {:?}", self.config.timeout()))
        } else {
            Error::Network(err.to_string())
        }
    }

    /// Classifies the HTTP response and decodes the body.
    async fn decode_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let json_content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));

        if status.is_success() {
            tracing::info!(status = status.as_u16(), "received HTTP response");

            let body = response.text().await.map_err(|e| self.transport_error(e))?;
            if body.is_empty() {
                return Ok(Value::Object(Map::new()));
            }
            if !json_content_type {
                return Err(Error::Api {
                    status,
                    message: "expected a JSON response body".to_string(),
                    payload: None,
                });
            }
            serde_json::from_str(&body).map_err(|e| Error::Api {
                status,
                message: format!("invalid JSON in response body: {e}"),
                payload: None,
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            let payload: Option<Value> = serde_json::from_str(&body).ok();

            // Prefer the server's own error message; fall back to the
            // status line.
            let message = payload
                .as_ref()
                .and_then(|p| p.get("error"))
                .and_then(|e| e.as_str())
                .map(str::to_owned)
                .unwrap_or_else(|| {
                    format!(
                        "{} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("error")
                    )
                });

            Err(match status.as_u16() {
                401 => Error::Authentication { message, payload },
                429 => Error::RateLimit { message, payload },
                400 => Error::Validation { message, payload },
                _ => Error::Api {
                    status,
                    message,
                    payload,
                },
            })
        }
    }
}
