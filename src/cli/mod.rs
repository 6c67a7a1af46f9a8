//! CLI definitions and subcommand implementations for the mandi binary.

pub mod doctor;
pub mod fetch_cmd;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mandi",
    version,
    about = "Live mandi prices for Indian crops, straight from Agmarknet"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch current prices for a crop in a state.
    Fetch {
        /// Crop name as Agmarknet lists it (e.g. "Wheat").
        crop: Option<String>,
        /// State name (e.g. "Punjab").
        state: Option<String>,
        /// data.gov.in API key; when set, query the resource API instead
        /// of scraping the portal.
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
        /// Explicit Chromium/Chrome executable for the scraper.
        #[arg(long, value_name = "PATH")]
        chromium: Option<PathBuf>,
    },
    /// Check that the environment can drive a headless browser.
    Doctor {
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Failures surfaced to the user as a JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Arguments missing; raised before any network activity.
    #[error("Usage: {0}")]
    Usage(&'static str),
    /// Anything raised while launching the browser, loading the page, or
    /// parsing/extracting data.
    #[error("{0:#}")]
    Runtime(#[from] anyhow::Error),
}
