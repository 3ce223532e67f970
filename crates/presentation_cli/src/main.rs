//! Fabulist CLI
//!
//! Command-line client for a running Fabulist server.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod client;

use std::{process::ExitCode, time::Duration};

use clap::{Parser, Subcommand};
use presentation_http::handlers::fable::GenerateFableBody;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::FabulistClient;

/// Fabulist CLI
#[derive(Debug, Parser)]
#[command(name = "fabulist-cli")]
#[command(author, version, about = "Fabulist fable generator CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Server URL
    #[arg(
        short,
        long,
        global = true,
        env = "FABULIST_URL",
        default_value = "http://localhost:3000"
    )]
    url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a fable
    ///
    /// Example: fabulist-cli generate Lion Mouse --setting Jungle --moral "Be kind"
    Generate {
        /// First character
        character1: String,

        /// Second character
        character2: String,

        /// Where the fable takes place
        #[arg(short, long)]
        setting: String,

        /// Moral the fable ends with
        #[arg(short, long)]
        moral: String,

        /// Writing style; mention misspellings for the modelled style
        #[arg(long, default_value = "no")]
        style_mode: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Show cache statistics
    CacheStats,

    /// Delete cached fables older than the given age
    CacheClean {
        /// Maximum age in days (server default when omitted)
        #[arg(long)]
        max_age: Option<u32>,
    },

    /// Check server liveness and readiness (usable as a container healthcheck)
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(
            cli.verbose,
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = FabulistClient::new(&cli.url, Duration::from_secs(cli.timeout_secs))?;

    match cli.command {
        Commands::Generate {
            character1,
            character2,
            setting,
            moral,
            style_mode,
            json,
        } => {
            let body = GenerateFableBody {
                character1: Some(character1),
                character2: Some(character2),
                setting: Some(setting),
                moral: Some(moral),
                style_mode: Some(style_mode),
            };
            let resp = client.generate(&body).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resp)?);
            } else {
                println!("{}", resp.fable);
                println!();
                println!("cached: {}", resp.cached);
                if let Some(warning) = resp.warning {
                    eprintln!("warning: {warning}");
                }
            }
        },

        Commands::CacheStats => {
            let stats = client.cache_stats().await?;
            println!("Total entries: {}", stats.total_entries);
            match stats.oldest_entry {
                Some(ts) => println!("Oldest entry:  {}", ts.to_rfc3339()),
                None => println!("Oldest entry:  -"),
            }
        },

        Commands::CacheClean { max_age } => {
            let resp = client.clean_cache(max_age).await?;
            println!("{} ({} deleted)", resp.message, resp.deleted);
        },

        Commands::Health => {
            let health = client.health().await?;
            let ready = client.ready().await?;

            println!("status:  {} (v{})", health.status, health.version);
            println!(
                "cache:   {}",
                if ready.cache.healthy { "available" } else { "unavailable" }
            );
            match ready.remote.model {
                Some(model) if ready.remote.configured => println!("remote:  {model}"),
                _ => println!("remote:  not configured"),
            }

            if !ready.ready {
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
