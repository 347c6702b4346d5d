mod cache;
mod catalog;
mod cli;
mod controller;
mod fetch;
mod options;
mod prefs;
mod rank;
mod tui;
mod version;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::rank::SortDirection;

#[derive(Parser)]
#[command(name = "uaswitch")]
#[command(about = "Browse user-agent strings by browser and OS, ranked by version")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List agents for a browser/OS pair, ranked by version
    List {
        /// Browser name (defaults to the stored preference)
        #[arg(long)]
        browser: Option<String>,
        /// Operating system name (defaults to the stored preference)
        #[arg(long)]
        os: Option<String>,
        /// Sort direction: ascending or descending
        #[arg(long)]
        sort: Option<SortDirection>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the selectable browsers and operating systems
    Options {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or set the active agent string
    Active {
        /// New active agent string
        #[arg(long)]
        set: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List {
            browser,
            os,
            sort,
            json,
        }) => cli::list::agents(browser, os, sort, json).await?,
        Some(Commands::Options { json }) => cli::options::show(json)?,
        Some(Commands::Active { set }) => cli::active::active(set)?,
        None => tui::run().await?,
    }

    Ok(())
}
