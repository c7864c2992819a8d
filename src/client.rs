//! The main client facade.
//!
//! [`Client`] maps each domain operation onto a fixed endpoint and hands
//! the request to the executor, which owns retries, error classification,
//! and failover.

use crate::{
    executor::Executor,
    models::{BatchResults, IpInfo},
    request::ApiRequest,
    Config, Result,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Client for the ipc.artsnoa.com IP-geolocation API.
///
/// The client is cheap to clone and designed to be reused: it shares one
/// validated [`Config`] and one pooled HTTP transport across clones.
/// Concurrent calls are independent; the library imposes no ordering
/// between them.
///
/// # Examples
///
/// ```no_run
/// use ipc_artsnoa::{Client, Config};
///
/// # async fn example() -> Result<(), ipc_artsnoa::Error> {
/// let config = Config::builder().api_key("your-api-key").build()?;
/// let client = Client::new(config)?;
///
/// let info = client.get_ip(None).await?;
/// println!("Your IP: {}, country: {:?}", info.ip, info.country);
///
/// let google = client.get_ip(Some("8.8.8.8")).await?;
/// println!("Google DNS is in {:?}", google.country);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    config: Arc<Config>,
    executor: Arc<Executor>,
}

impl Client {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the underlying
    /// HTTP transport cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let executor = Arc::new(Executor::new(Arc::clone(&config))?);
        Ok(Self { config, executor })
    }

    /// Creates a client from environment variables.
    ///
    /// See [`Config::from_env`] for the variable set.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// The client's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Looks up IP information (`GET v1/ip`).
    ///
    /// Queries the caller's own address when `ip` is `None`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: ipc_artsnoa::Client) -> Result<(), ipc_artsnoa::Error> {
    /// let info = client.get_ip(Some("8.8.8.8")).await?;
    /// println!("{}: {:?}", info.ip, info.country);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_ip(&self, ip: Option<&str>) -> Result<IpInfo> {
        let request = with_ip_param(ApiRequest::get("v1/ip"), ip);
        let value = self.executor.execute(&request).await?;
        Ok(IpInfo::from_value(value))
    }

    /// Looks up extended IP information (`GET v1/ip/details`).
    ///
    /// The typed fields of [`IpInfo`] cover the common subset; details-only
    /// fields (user agent, ASN, currency, languages, ...) are reachable via
    /// [`IpInfo::extra`].
    pub async fn get_ip_details(&self, ip: Option<&str>) -> Result<IpInfo> {
        let request = with_ip_param(ApiRequest::get("v1/ip/details"), ip);
        let value = self.executor.execute(&request).await?;
        Ok(IpInfo::from_value(value))
    }

    /// Looks up geographic location data (`GET v1/location`).
    ///
    /// Returns the decoded body verbatim.
    pub async fn get_location(&self, ip: Option<&str>) -> Result<Value> {
        let request = with_ip_param(ApiRequest::get("v1/location"), ip);
        self.executor.execute(&request).await
    }

    /// Looks up ISP information (`GET v1/isp`).
    ///
    /// Returns the decoded body verbatim.
    pub async fn get_isp(&self, ip: Option<&str>) -> Result<Value> {
        let request = with_ip_param(ApiRequest::get("v1/isp"), ip);
        self.executor.execute(&request).await
    }

    /// Looks up multiple IPs in one request (`POST v1/batch`).
    ///
    /// Results come back in the order the IPs were passed, regardless of
    /// the order the server answered in.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: ipc_artsnoa::Client) -> Result<(), ipc_artsnoa::Error> {
    /// let results = client.batch_lookup(&["8.8.8.8", "1.1.1.1"]).await?;
    /// for (ip, info) in results.iter() {
    ///     match info {
    ///         Some(info) => println!("{ip}: {:?}", info.country),
    ///         None => println!("{ip}: no result"),
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn batch_lookup<S: AsRef<str>>(&self, ips: &[S]) -> Result<BatchResults> {
        let ips: Vec<String> = ips.iter().map(|ip| ip.as_ref().to_owned()).collect();
        let request = ApiRequest::post("v1/batch").json_body(json!({ "ips": ips }));
        let value = self.executor.execute(&request).await?;
        Ok(BatchResults::from_response(&ips, &value))
    }

    /// Fetches the published SDK versions (`GET v1/sdk/version`).
    ///
    /// Returns the decoded body verbatim.
    pub async fn get_sdk_versions(&self) -> Result<Value> {
        self.executor.execute(&ApiRequest::get("v1/sdk/version")).await
    }

    /// Executes an arbitrary [`ApiRequest`] through the same retry and
    /// error-classification pipeline as the built-in accessors.
    ///
    /// This is the escape hatch for endpoints without a dedicated method.
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        self.executor.execute(&request).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url())
            .finish_non_exhaustive()
    }
}

fn with_ip_param(request: ApiRequest, ip: Option<&str>) -> ApiRequest {
    match ip {
        Some(ip) => request.query_param("ip", ip),
        None => request,
    }
}
