//! Revision workflow example
//!
//! Stages a loopback address on a new revision, prints the diff against the
//! running configuration, then applies the revision and waits for it to
//! converge. With `--dry-run` the revision is left pending.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example revision_workflow -- --url https://leaf01:8765 --user cumulus --password secret --address 10.10.10.4/32
//! ```

use std::env;
use std::time::Duration;

use nvue_client::{Category, ClientBuilder};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("=== nvue-client Revision Workflow Example ===\n");
    println!("Connecting to {}...", args.url);

    let mut builder = ClientBuilder::new(&args.url)
        .username(&args.user)
        .timeout(Duration::from_secs(args.timeout));

    if let Some(password) = &args.password {
        builder = builder.password(password);
    }
    if args.insecure {
        builder = builder.danger_accept_invalid_certs();
    }

    let mut client = builder.build()?;

    let system = client.health().await?;
    println!(
        "Connected to {} ({})\n",
        system["hostname"].as_str().unwrap_or("?"),
        system["build"].as_str().unwrap_or("?")
    );

    // Stage the change
    client.revision.create().await?;
    let rev = client.revision.rev().unwrap_or_default().to_string();
    println!("Created revision {}", rev);

    let mut addresses = serde_json::Map::new();
    addresses.insert(args.address.clone(), json!({}));
    client.catalog[Category::Interface]
        .patch(&rev, json!({ "address": addresses }), "lo/ip")
        .await?;
    println!("Staged {} on lo\n", args.address);

    // Review
    let diff = client.diff(&rev, "applied").await?;
    println!("Diff against applied:\n{}\n", serde_json::to_string_pretty(&diff)?);

    if args.dry_run {
        println!("Dry run: revision {} left pending", rev);
        return Ok(());
    }

    // Apply and wait
    client.revision.apply().await?;
    if client
        .revision
        .is_applied_with(args.retries, Duration::from_secs(1))
        .await?
    {
        println!("Revision {} applied", rev);
    } else {
        println!(
            "Revision {} not applied yet (state: {})",
            rev,
            client.revision.state().unwrap_or("unknown")
        );
    }

    Ok(())
}

struct Args {
    url: String,
    user: String,
    password: Option<String>,
    timeout: u64,
    address: String,
    retries: u32,
    insecure: bool,
    dry_run: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut url = "https://localhost:8765".to_string();
        let mut user = env::var("USER").unwrap_or_else(|_| "cumulus".to_string());
        let mut password = None;
        let mut timeout = 30u64;
        let mut address = "10.10.10.4/32".to_string();
        let mut retries = 5u32;
        let mut insecure = false;
        let mut dry_run = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--url" => {
                    i += 1;
                    if i < args.len() {
                        url = args[i].clone();
                    }
                }
                "--user" | "-u" => {
                    i += 1;
                    if i < args.len() {
                        user = args[i].clone();
                    }
                }
                "--password" | "-P" => {
                    i += 1;
                    if i < args.len() {
                        password = Some(args[i].clone());
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(30);
                    }
                }
                "--address" => {
                    i += 1;
                    if i < args.len() {
                        address = args[i].clone();
                    }
                }
                "--retries" => {
                    i += 1;
                    if i < args.len() {
                        retries = args[i].parse().unwrap_or(5);
                    }
                }
                "--insecure" | "-k" => insecure = true,
                "--dry-run" => dry_run = true,
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        Self {
            url,
            user,
            password,
            timeout,
            address,
            retries,
            insecure,
            dry_run,
        }
    }

    fn print_help() {
        println!("Usage: revision_workflow [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --url <URL>            Device root URL (default: https://localhost:8765)");
        println!("  -u, --user <USER>      Username (default: $USER)");
        println!("  -P, --password <PASS>  Password");
        println!("  -t, --timeout <SECS>   Request timeout (default: 30)");
        println!("  --address <CIDR>       Loopback address to add (default: 10.10.10.4/32)");
        println!("  --retries <N>          Apply polls (default: 5)");
        println!("  -k, --insecure         Accept invalid TLS certificates");
        println!("  --dry-run              Stop after the diff");
        println!("  --help                 Show this help");
    }
}
