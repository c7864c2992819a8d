//! Basic example demonstrating simple IP lookups.
//!
//! This example shows how to:
//! - Create a client with an API key
//! - Look up your own IP and a specific IP
//! - Access typed fields and the preserved raw payload
//!
//! Run with: `IPC_API_KEY=your-key cargo run --example basic_usage`

use ipc_artsnoa::{Client, Config, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("ipc_artsnoa=debug,basic_usage=info")
        .init();

    let api_key = std::env::var("IPC_API_KEY").unwrap_or_else(|_| "YOUR_API_KEY".to_string());
    let config = Config::builder().api_key(api_key).build()?;
    let client = Client::new(config)?;

    println!("=== Your own IP ===");
    let info = client.get_ip(None).await?;
    println!("IP: {}", info.ip);
    println!("Country: {}", info.country.as_deref().unwrap_or("N/A"));
    println!("City: {}", info.city.as_deref().unwrap_or("N/A"));
    println!();

    println!("=== A specific IP ===");
    let google = client.get_ip(Some("8.8.8.8")).await?;
    println!("IP: {}", google.ip);
    println!("ISP: {}", google.isp.as_deref().unwrap_or("N/A"));
    println!();

    println!("=== Detailed lookup with raw payload access ===");
    let details = client.get_ip_details(None).await?;
    println!("Timezone: {}", details.timezone.as_deref().unwrap_or("N/A"));
    // Fields without a typed accessor stay reachable:
    if let Some(asn) = details.extra("asn") {
        println!("ASN: {asn}");
    }

    Ok(())
}
