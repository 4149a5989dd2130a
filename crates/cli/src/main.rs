//! PriceLens CLI
//!
//! Main entry point for the pricelens command-line tool.
//! Extracts price-comparison records and analyzes them with an optional
//! text-completion provider.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    ChartsCommand, ChatCommand, ExtractCommand, IngestCommand, InsightsCommand, PromptsCommand,
};
use pricelens_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// PriceLens - retail price-comparison analysis
#[derive(Parser, Debug)]
#[command(name = "pricelens")]
#[command(about = "Retail price-comparison extraction and analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "PRICELENS_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "PRICELENS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// LLM provider (openai, ollama)
    #[arg(short, long, global = true, env = "PRICELENS_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "PRICELENS_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract price records from a text document
    Extract(ExtractCommand),

    /// Validate and echo a JSON array of records
    Ingest(IngestCommand),

    /// Generate insights for a dataset
    Insights(InsightsCommand),

    /// Ask a question about a dataset
    Chat(ChatCommand),

    /// Build chart series for a dataset
    Charts(ChartsCommand),

    /// List available prompt definitions
    Prompts(PromptsCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Extract(_) => "extract",
            Commands::Ingest(_) => "ingest",
            Commands::Insights(_) => "insights",
            Commands::Chat(_) => "chat",
            Commands::Charts(_) => "charts",
            Commands::Prompts(_) => "prompts",
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration; the workspace and config path decide which file is merged
    let config = AppConfig::load_with(cli.workspace, cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
        cli.log_json,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color, config.log_json)?;

    tracing::info!("PriceLens CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    let result = match cli.command {
        Commands::Extract(cmd) => cmd.execute().await,
        Commands::Ingest(cmd) => cmd.execute().await,
        Commands::Insights(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Charts(cmd) => cmd.execute().await,
        Commands::Prompts(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
