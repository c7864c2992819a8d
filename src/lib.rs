//! # ipc-artsnoa - Rust client for the ipc.artsnoa.com IP-geolocation API
//!
//! This crate wraps the hosted geolocation service in a typed, retry-aware
//! client built on `reqwest`. It authenticates requests with a bearer
//! token, maps transport and HTTP failures onto a closed error taxonomy,
//! retries transient failures with exponential backoff, and can fail over
//! to a backup host.
//!
//! ## Quick start
//!
//! ```no_run
//! use ipc_artsnoa::{Client, Config};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ipc_artsnoa::Error> {
//!     let config = Config::builder()
//!         .api_key("your-api-key")
//!         .timeout(Duration::from_secs(30))
//!         .max_retries(3)
//!         .build()?;
//!     let client = Client::new(config)?;
//!
//!     // Your own address:
//!     let info = client.get_ip(None).await?;
//!     println!("IP: {}, country: {:?}", info.ip, info.country);
//!
//!     // A specific address:
//!     let google = client.get_ip(Some("8.8.8.8")).await?;
//!     println!("Google DNS: {:?}, {:?}", google.city, google.country);
//!
//!     // Several at once, results in request order:
//!     let batch = client.batch_lookup(&["8.8.8.8", "1.1.1.1"]).await?;
//!     for (ip, info) in batch.iter() {
//!         println!("{ip}: {:?}", info.map(|i| i.country.clone()));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! Every failure is exactly one [`Error`] variant, and HTTP-derived
//! variants keep the decoded server payload for diagnostics:
//!
//! ```no_run
//! use ipc_artsnoa::{Client, Error};
//!
//! # async fn example(client: Client) {
//! match client.get_ip(None).await {
//!     Ok(info) => println!("{}", info.ip),
//!     Err(Error::Authentication { message, .. }) => {
//!         // Fatal: fix the API key.
//!         eprintln!("auth failed: {message}");
//!     }
//!     Err(Error::RateLimit { message, .. }) => {
//!         // Already retried with backoff; slow the caller down.
//!         eprintln!("rate limited: {message}");
//!     }
//!     Err(Error::Validation { message, .. }) => {
//!         // Caller bug, e.g. a malformed IP parameter.
//!         eprintln!("bad request: {message}");
//!     }
//!     Err(e) => eprintln!("lookup failed: {e}"),
//! }
//! # }
//! ```
//!
//! ## Retries and failover
//!
//! Rate limits (429), server errors (5xx), and timeouts are retried up to
//! the configured attempt budget, sleeping `retry_delay * 2^attempt`
//! between attempts. Authentication and validation failures surface
//! immediately. With [`ConfigBuilder::backup_url`] set, the whole attempt
//! sequence is repeated once against the backup host after the primary is
//! exhausted.
//!
//! Requests log through [`tracing`]; the library installs no subscriber.

mod client;
mod config;
mod error;
mod executor;
mod models;
pub mod request;
pub mod retry;

pub use client::Client;
pub use config::{Config, ConfigBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use models::{BatchResults, IpInfo};
pub use request::ApiRequest;
pub use retry::RetryPolicy;
