mod agents;
mod cli;
mod config;
mod error;
mod package;
mod repository;
mod utils;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;
use workflow::CheckRequest;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Check {
            installed,
            catalogs,
            show_links,
            prefer_stable,
            prefer_lowest,
            markup,
        } => workflow::execute_check(
            &cli.path,
            &CheckRequest {
                installed,
                catalogs,
                show_links,
                prefer_stable,
                prefer_lowest,
                markup,
            },
        ),
        Commands::List { installed } => workflow::execute_list(&cli.path, installed.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
