use clap::Parser;
use tracing_subscriber::EnvFilter;

use mandi::cli::{doctor, fetch_cmd, output, Cli, CliError, Command};

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Fetch {
            crop,
            state,
            api_key,
            chromium,
        } => fetch_cmd::run(crop, state, api_key, chromium).await,
        Command::Doctor { json } => doctor::run(json).map_err(CliError::from),
    };

    if let Err(err) = result {
        output::print_json(&serde_json::json!({ "error": err.to_string() }));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays a single JSON envelope.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}
