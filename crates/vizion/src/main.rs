// SPDX-FileCopyrightText: 2026 Vizion Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vizion - describe a website in chat, get HTML, CSS and JS back.
//!
//! This is the binary entry point.

mod doctor;
mod providers;
mod shell;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// Vizion - a chat-to-website builder.
#[derive(Parser, Debug)]
#[command(name = "vizion", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive builder (default).
    Shell,
    /// Check configuration and provider credentials.
    Doctor {
        /// Also check that provider endpoints are reachable.
        #[arg(long)]
        deep: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration with API keys redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match vizion_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            vizion_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run_shell(config).await,
        Commands::Doctor { deep, plain } => doctor::run_doctor(&config, deep, plain).await,
        Commands::Config => print_config(&config),
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn print_config(config: &vizion_config::VizionConfig) -> Result<(), vizion_core::VizionError> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| vizion_core::VizionError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vizion={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
