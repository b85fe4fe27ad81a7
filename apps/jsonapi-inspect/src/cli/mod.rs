//! # Inspect CLI Module
//!
//! This module implements the CLI interface for jsonapi-inspect.
//!
//! ## Available Commands
//!
//! - `summary` - Document state, primary identifiers and counts
//! - `data` - Primary resources with attributes and linkage
//! - `relationships` - Relationships of one resource
//! - `included` - Resolve a relationship to its included resource(s)
//! - `links` - Links at root, data, relationship or included scope
//! - `errors` - Error objects of a failure document

mod commands;

use crate::config::Config;
use crate::error::InspectError;
use clap::{Parser, Subcommand, ValueEnum};
use jsonapi_reader::LinkScope;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// jsonapi-inspect - JSON:API document inspector
///
/// Reads a JSON:API document and shows its resource graph.
#[derive(Parser, Debug)]
#[command(name = "jsonapi-inspect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show document state and counts
    Summary {
        /// Path to the JSON:API document
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show primary data
    Data {
        /// Path to the JSON:API document
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the relationships of a resource
    Relationships {
        /// Path to the JSON:API document
        #[arg(short, long)]
        file: PathBuf,

        /// Resource type
        #[arg(short = 't', long = "type")]
        resource_type: String,

        /// Resource id
        #[arg(short, long)]
        id: String,
    },

    /// Resolve a relationship to its included resource(s)
    Included {
        /// Path to the JSON:API document
        #[arg(short, long)]
        file: PathBuf,

        /// Resource type
        #[arg(short = 't', long = "type")]
        resource_type: String,

        /// Resource id
        #[arg(short, long)]
        id: String,

        /// Relationship name
        #[arg(short, long)]
        name: String,

        /// Resolve a to-many relationship
        #[arg(short, long)]
        many: bool,
    },

    /// Show links at one scope
    Links {
        /// Path to the JSON:API document
        #[arg(short, long)]
        file: PathBuf,

        /// Scope to read links from
        #[arg(short, long, value_enum, default_value = "root")]
        scope: ScopeArg,

        /// Resource type (data, relationship and included scopes)
        #[arg(short = 't', long = "type")]
        resource_type: Option<String>,

        /// Resource id (data, relationship and included scopes)
        #[arg(short, long)]
        id: Option<String>,

        /// Relationship name (relationship scope)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the error objects of a failure document
    Errors {
        /// Path to the JSON:API document
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Links scope as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    Root,
    Data,
    Relationship,
    Included,
}

impl From<ScopeArg> for LinkScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Root => LinkScope::Root,
            ScopeArg::Data => LinkScope::Data,
            ScopeArg::Relationship => LinkScope::Relationship,
            ScopeArg::Included => LinkScope::Included,
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and return the rendered output.
pub fn execute(cli: Cli) -> Result<String, InspectError> {
    let config = Config::load(cli.config.as_deref())?;
    let ctx = Context {
        options: config.limits,
        json_mode: cli.json_mode || config.output.json,
    };

    match cli.command {
        Commands::Summary { file } => cmd_summary(&ctx, &file),
        Commands::Data { file } => cmd_data(&ctx, &file),
        Commands::Relationships {
            file,
            resource_type,
            id,
        } => cmd_relationships(&ctx, &file, &resource_type, &id),
        Commands::Included {
            file,
            resource_type,
            id,
            name,
            many,
        } => cmd_included(&ctx, &file, &resource_type, &id, &name, many),
        Commands::Links {
            file,
            scope,
            resource_type,
            id,
            name,
        } => cmd_links(
            &ctx,
            &file,
            scope.into(),
            resource_type.as_deref(),
            id.as_deref(),
            name.as_deref(),
        ),
        Commands::Errors { file } => cmd_errors(&ctx, &file),
    }
}
