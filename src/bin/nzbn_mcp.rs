//! NZBN MCP Server Binary
//!
//! Runs the NZBN MCP server on stdio, or performs a one-off lookup.
//!
//! ## Usage
//!
//! ```bash
//! NZBN_API_KEY=... ./target/debug/nzbn-mcp            # serve on stdio
//! NZBN_API_KEY=... ./target/debug/nzbn-mcp get 9429041864373
//! ./target/debug/nzbn-mcp tools
//! ```
//!
//! ## Environment Variables
//!
//! - `NZBN_API_KEY`: registry gateway subscription key (empty by default)
//! - `NZBN_API_BASE_URL`: gateway root override
//! - `NZBN_MCP_CONFIG`: TOML configuration file
//! - `RUST_LOG`: log filter, overrides `--log-level`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use nzbn_mcp::client::NzbnClient;
use nzbn_mcp::config::{Configuration, ConfigurationLoader, EnvironmentLoader};
use nzbn_mcp::observability::init_tracing;
use nzbn_mcp::server::{nzbn_registry, McpServer};
use nzbn_mcp::tool::lookup_entity;

#[derive(Debug, Parser)]
#[command(name = "nzbn-mcp", version, about = "MCP server for the New Zealand Business Number register")]
struct Cli {
    /// TOML configuration file (defaults to $NZBN_MCP_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// .env file read for settings not set in the environment
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the MCP server on stdin/stdout (default)
    Serve,
    /// Look up one NZBN and print the result
    Get {
        /// 13-digit New Zealand Business Number
        nzbn: String,
    },
    /// Print the tool definitions as JSON
    Tools,
}

fn load_configuration(cli: &Cli) -> Result<Configuration> {
    let env = EnvironmentLoader::new(cli.env_file.as_deref());
    let config_path = cli.config.clone().or_else(|| env.config_path());

    let mut config = ConfigurationLoader::new(config_path.as_deref())?
        .into_config()
        .apply_environment(&env);

    if let Some(level) = &cli.log_level {
        config.logging.log_level = level.clone();
    }
    if cli.log_json {
        config.logging.json = true;
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_configuration(&cli)?;
    init_tracing(&config.logging.log_level, config.logging.json)?;
    tracing::debug!(target: "nzbn_mcp", "Configuration: {:?}", config.api);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let server = McpServer::from_config(&config)?;
            server.run_stdio().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Get { nzbn } => {
            let client = NzbnClient::new(&config.api).context("Failed to build NZBN API client")?;
            match lookup_entity(&client, &nzbn).await {
                Ok(lookup) => {
                    println!("{}", lookup.text());
                    Ok(if lookup.is_error() {
                        ExitCode::FAILURE
                    } else {
                        ExitCode::SUCCESS
                    })
                }
                Err(invalid) => {
                    eprintln!("Invalid NZBN: {}", invalid);
                    Ok(ExitCode::from(2))
                }
            }
        }
        Command::Tools => {
            let definitions = nzbn_registry(&config.api)?.definitions();
            println!("{}", serde_json::to_string_pretty(&definitions)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
