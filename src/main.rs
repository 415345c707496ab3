//! appstamp - project scaffolding CLI
//!
//! Materializes a starter web/server application from a maintained template:
//! copies the template tree, wires per-project configuration (import alias,
//! directory layout, package manifest) and installs dependencies with a
//! detected or requested package manager.

use clap::Parser;
use console::style;

mod cli;
mod commands;
mod error;
mod installer;
mod online;
mod package_manager;
mod path_utils;
mod preferences;
mod progress;
mod template;
mod validate;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // An interrupt terminates the whole CLI immediately; a partially written
    // destination tree is left as-is.
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(0);
        }
    });

    if let Err(e) = commands::create::run(cli).await {
        println!();
        println!("Aborting installation.");
        if let Some(command) = e.failed_command() {
            println!("  {} has failed.", style(command).cyan());
        } else {
            println!(
                "{}",
                style("Unexpected error. Please report it as a bug:").red()
            );
            println!("{}", e);
        }
        println!();
        std::process::exit(1);
    }
}
