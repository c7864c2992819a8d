//! Example demonstrating error handling across the taxonomy.
//!
//! This example shows how to:
//! - Catch configuration errors before any network activity
//! - Branch on the error variant after a failed call
//! - Access the status code and preserved server payload
//!
//! Run with: `cargo run --example error_handling`

use ipc_artsnoa::{Client, Config, Error};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("ipc_artsnoa=warn")
        .init();

    println!("=== Example 1: Configuration errors ===");
    // An empty API key is rejected synchronously, before any request.
    match Config::builder().api_key("").build() {
        Err(Error::Config(message)) => println!("config rejected: {message}"),
        other => println!("unexpected: {other:?}"),
    }
    println!();

    println!("=== Example 2: Branching on the error variant ===");
    let config = Config::builder()
        .api_key("an-invalid-key")
        .timeout(Duration::from_secs(10))
        .max_retries(2)
        .build()?;
    let client = Client::new(config)?;

    match client.get_ip(None).await {
        Ok(info) => println!("unexpectedly succeeded: {}", info.ip),
        Err(Error::Authentication { message, .. }) => {
            // Fatal: fix the API key, retrying will not help.
            println!("authentication failed: {message}");
        }
        Err(Error::RateLimit { message, .. }) => {
            // The client already retried with backoff before surfacing this.
            println!("rate limited: {message}");
        }
        Err(Error::Validation { message, .. }) => {
            println!("the server rejected the request: {message}");
        }
        Err(err @ Error::Api { .. }) => {
            println!(
                "API failure (status {:?}): {err}",
                err.status().map(|s| s.as_u16())
            );
            if let Some(payload) = err.payload() {
                println!("server payload: {payload}");
            }
        }
        Err(Error::Timeout(message)) => println!("timed out: {message}"),
        Err(Error::Network(message)) => println!("network problem: {message}"),
        Err(Error::Config(message)) => println!("configuration problem: {message}"),
    }

    Ok(())
}
