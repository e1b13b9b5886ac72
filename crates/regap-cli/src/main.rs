//! # regap CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// regap — regulatory gap analysis toolchain.
///
/// Analyzes internal policy documents against regulatory clause
/// spreadsheets, pre-computes clause embeddings, and inspects document
/// chunking.
#[derive(Parser, Debug)]
#[command(name = "regap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run a gap analysis and write the report spreadsheet.
    Analyze(regap_cli::analyze::AnalyzeArgs),
    /// Pre-compute clause embeddings for a regulation spreadsheet.
    Embed(regap_cli::embed::EmbedArgs),
    /// Chunk a document and print its detected structure.
    Chunk(regap_cli::chunk::ChunkArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => regap_cli::analyze::run(args).await,
        Commands::Embed(args) => regap_cli::embed::run(args).await,
        Commands::Chunk(args) => regap_cli::chunk::run(args),
    }
}
