//! # jsonapi-inspect
//!
//! Command-line inspector for JSON:API documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        apps/jsonapi-inspect (THE BINARY)     │
//! │                                              │
//! │  ┌─────────────┐        ┌────────────────┐   │
//! │  │    CLI      │        │  TOML config   │   │
//! │  │   (clap)    │        │   (limits)     │   │
//! │  └──────┬──────┘        └───────┬────────┘   │
//! │         └───────────┬───────────┘            │
//! │                     ▼                        │
//! │            ┌────────────────┐                │
//! │            │ jsonapi-reader │                │
//! │            │  (THE LOGIC)   │                │
//! │            └────────────────┘                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! jsonapi-inspect summary -f response.json
//! jsonapi-inspect included -f response.json -t articles -i 1 -n comments --many
//! jsonapi-inspect links -f response.json -s relationship -t articles -i 1 -n author
//! JSONAPI_LOG_FORMAT=json jsonapi-inspect --json-mode errors -f failure.json
//! ```

use clap::Parser;
use jsonapi_inspect::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default log directives when `JSONAPI_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "jsonapi_inspect=info,jsonapi_reader=warn";
const VERBOSE_LOG_FILTER: &str = "jsonapi_inspect=debug,jsonapi_reader=debug";

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // JSONAPI_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("JSONAPI_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("JSONAPI_LOG")
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr; stdout carries command output only.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        eprintln!("jsonapi-inspect v{}", env!("CARGO_PKG_VERSION"));
    }

    match cli::execute(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
