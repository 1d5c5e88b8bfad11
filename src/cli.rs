use crate::agents::Markup;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "verscheck",
    about = "Versions check - report installed packages with newer releases available",
    version,
    author
)]
pub struct Cli {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub path: String,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report installed packages that have a newer release in the catalog
    Check {
        /// Installed package manifest (defaults to installed.json)
        #[arg(long, value_name = "FILE")]
        installed: Option<PathBuf>,

        /// Catalog manifest; repeat to combine several (defaults to catalog.json)
        #[arg(long = "catalog", value_name = "FILE")]
        catalogs: Vec<PathBuf>,

        /// List the installed packages requiring each outdated package
        #[arg(long)]
        show_links: bool,

        /// Only consider stable releases, whatever the root package says
        #[arg(long)]
        prefer_stable: bool,

        /// Lowest versions were installed on purpose; skip the check
        #[arg(long)]
        prefer_lowest: bool,

        /// Output decoration
        #[arg(long, value_enum, default_value_t = Markup::Ansi)]
        markup: Markup,
    },

    /// List all packages in the installed set
    List {
        /// Installed package manifest (defaults to installed.json)
        #[arg(long, value_name = "FILE")]
        installed: Option<PathBuf>,
    },
}
