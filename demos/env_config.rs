//! Environment-driven configuration.
//!
//! The client reads `IPC_API_KEY`, `IPC_BASE_URL`, `IPC_TIMEOUT`,
//! `IPC_MAX_RETRIES`, and `IPC_VERIFY_SSL`.
//!
//! Run with: `IPC_API_KEY=your-key cargo run --example env_config`

use ipc_artsnoa::{Client, Config, Error};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("ipc_artsnoa=info")
        .init();

    // Everything from the environment:
    let client = Client::from_env()?;
    let info = client.get_ip(None).await?;
    println!("IP from env-configured client: {}", info.ip);

    // Mixed: key from the environment, the rest explicit.
    let api_key = std::env::var("IPC_API_KEY").unwrap_or_else(|_| "YOUR_API_KEY".to_string());
    let config = Config::builder()
        .api_key(api_key)
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .user_agent("MyApp/1.0")
        .build()?;
    let client = Client::new(config)?;
    println!("Explicitly configured client targets {}", client.config().base_url());

    Ok(())
}
