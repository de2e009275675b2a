//! Health check example
//!
//! Prints the system document of a device, then the configuration of one
//! category (and optional sub-path).
//!
//! # Usage
//!
//! ```bash
//! cargo run --example health -- https://leaf01:8765 cumulus secret interface lo
//! ```

use std::env;

use nvue_client::{Category, ClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("Usage: health <url> <user> <password> [category] [path]");
        std::process::exit(1);
    }

    let mut client = ClientBuilder::new(&args[0])
        .username(&args[1])
        .password(&args[2])
        .danger_accept_invalid_certs()
        .build()?;

    let system = client.health().await?;
    println!("{}", serde_json::to_string_pretty(&system)?);

    if let Some(name) = args.get(3) {
        let category: Category = name.parse()?;
        let path = args.get(4).map(String::as_str).unwrap_or("");
        let config = client.resource(category).get(path).await?;
        println!("\n{} {}:", category, path);
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}
