//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod console;
pub mod map;
pub mod places;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Catalogue places and get directions to them
#[derive(Parser)]
#[command(name = "my-places")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a place
    Add(places::AddArgs),

    /// List places
    List(places::ListArgs),

    /// Show a place
    Show {
        /// Place ID (or unique prefix)
        id: String,
    },

    /// Edit a place
    Edit(places::EditArgs),

    /// Delete a place
    Delete {
        /// Place ID (or unique prefix)
        id: String,
    },

    /// Geocode a place's address and show its marker
    Locate {
        /// Place ID (or unique prefix)
        id: String,
    },

    /// Look up the street address at a coordinate
    Address(map::AddressArgs),

    /// Driving directions to a place
    Route(map::RouteArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Add(args) => places::add(args),
        Commands::List(args) => places::list(args),
        Commands::Show { id } => places::show(&id),
        Commands::Edit(args) => places::edit(args),
        Commands::Delete { id } => places::delete(&id),
        Commands::Locate { id } => map::locate(&id).await,
        Commands::Address(args) => map::address(args).await,
        Commands::Route(args) => map::route(args).await,
        Commands::Config(args) => config::run(args),
    }
}
