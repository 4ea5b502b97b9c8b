// SPDX-FileCopyrightText: 2026 EduInk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! EduInk - HTTP backend for an educational content portal.
//!
//! This is the binary entry point for the EduInk server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// EduInk - HTTP backend for an educational content portal.
#[derive(Parser, Debug)]
#[command(name = "eduink", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the EduInk HTTP server (the default).
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match eduink_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            eduink_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(error) => {
                eprintln!("error: failed to render config: {error}");
                std::process::exit(1);
            }
        },
        Some(Commands::Serve) | None => {
            if let Err(error) = serve::run_serve(config).await {
                eprintln!("error: {error}");
                std::process::exit(1);
            }
        }
    }
}
