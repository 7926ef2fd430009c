// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rowboat - access-controlled report dispatch bot for Telegram.
//!
//! This is the binary entry point.

mod serve;

use clap::{Parser, Subcommand};

/// Rowboat - access-controlled report dispatch bot for Telegram.
#[derive(Parser, Debug)]
#[command(name = "rowboat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the report dispatch bot.
    Serve,
    /// Manage Rowboat configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Load, merge, and validate the configuration, then exit.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match rowboat_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            rowboat_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("rowboat serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config {
            command: ConfigCommands::Check,
        }) => {
            println!(
                "rowboat: config OK ({} operator(s), {} service(s), {} binding(s))",
                config.access.operators.len(),
                config.catalog.services.len(),
                config.bindings.len()
            );
        }
        None => {
            println!("rowboat: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = rowboat_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.bot.name, "rowboat");
        // The stock catalog ships marketing and analytics services.
        assert_eq!(config.catalog.services.len(), 2);
    }
}
