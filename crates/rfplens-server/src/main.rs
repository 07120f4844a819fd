//! RFPLens Server CLI
//!
//! Starts the HTTP server for RFP document analysis and form generation.

use rfplens_server::config::{Credentials, ServerConfig};
use rfplens_server::{start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults");
        eprintln!("Usage: rfplens-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    // API keys come from the environment only, never from the config file
    let credentials = Credentials::from_env();

    start_server(config, credentials).await?;

    Ok(())
}

fn print_help() {
    println!("RFPLens Server - RFP Analysis and Form Generation");
    println!();
    println!("USAGE:");
    println!("    rfplens-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    rfplens-server --config config/server.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 3001)");
    println!("    - [limits] max_file_bytes / max_files: upload boundaries");
    println!("    - [openai] / [gemini]: provider base_url and model");
    println!();
    println!("ENVIRONMENT:");
    println!("    RFPLENS_OPENAI_API_KEY or OPENAI_API_KEY    analysis provider key");
    println!("    RFPLENS_GEMINI_API_KEY or GEMINI_API_KEY    form-fill provider key");
    println!();
}
