//! OptiWave CLI - Main entry point

use clap::Parser;
use optiwave_cli::{Cli, Commands};
use optiwave_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Ensure a command is provided
    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    // Initialize logging based on verbose flag and environment
    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
        .output(LogOutput::Console)
        .log_file_prefix("optiwave-cli".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    // Initialize logging (ignore errors as the CLI should work without it)
    let _ = init_logging(&log_config);

    // Execute command
    let result = execute_command(cli).await;

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> optiwave_cli::Result<()> {
    // Command is guaranteed to exist at this point (checked in main)
    let Some(command) = cli.command else {
        unreachable!("Command should have been validated in main");
    };

    let server_url = cli.server_url;

    match command {
        Commands::Home => optiwave_cli::commands::home::run(server_url).await,

        Commands::Search {
            term,
            category,
            page,
            limit,
        } => optiwave_cli::commands::search::run(term, category, page, limit, server_url).await,

        Commands::Trending => optiwave_cli::commands::trending::run(server_url).await,

        Commands::Watch { id } => optiwave_cli::commands::watch::run(id, server_url).await,

        Commands::Upload {
            file,
            title,
            description,
            category,
            tags,
        } => {
            optiwave_cli::commands::upload::run(
                file,
                title,
                description,
                category,
                tags,
                server_url,
            )
            .await
        },

        Commands::Register {
            email,
            password,
            name,
        } => optiwave_cli::commands::register::run(email, password, name, server_url).await,

        Commands::Login { email, password } => {
            optiwave_cli::commands::login::run(email, password, server_url).await
        },

        Commands::Logout => optiwave_cli::commands::logout::run().await,
    }
}
