//! Batch lookup of several IPs in one request.
//!
//! Run with: `IPC_API_KEY=your-key cargo run --example batch_lookup`

use ipc_artsnoa::{Client, Config, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("ipc_artsnoa=info")
        .init();

    let api_key = std::env::var("IPC_API_KEY").unwrap_or_else(|_| "YOUR_API_KEY".to_string());
    let client = Client::new(Config::builder().api_key(api_key).build()?)?;

    let ips = [
        "8.8.8.8",        // Google DNS
        "1.1.1.1",        // Cloudflare DNS
        "208.67.222.222", // OpenDNS
    ];

    println!("Looking up {} IPs...\n", ips.len());
    let results = client.batch_lookup(&ips).await?;

    // Results come back in request order.
    for (ip, info) in results.iter() {
        match info {
            Some(info) => println!(
                "{ip}: {} ({})",
                info.country.as_deref().unwrap_or("unknown"),
                info.isp.as_deref().unwrap_or("unknown ISP"),
            ),
            None => println!("{ip}: no result"),
        }
    }

    let us_ips: Vec<&str> = results
        .iter()
        .filter(|(_, info)| info.is_some_and(|i| i.country.as_deref() == Some("US")))
        .map(|(ip, _)| ip)
        .collect();
    println!("\nIPs in the US: {us_ips:?}");

    Ok(())
}
