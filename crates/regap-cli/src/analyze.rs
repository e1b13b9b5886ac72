//! # Analyze Subcommand
//!
//! Runs the full pipeline: document ingestion, embedding, retrieval,
//! per-clause coverage verdicts, and styled report export.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use regap_analysis::{AnalysisConfig, GapAnalyzer, PromptFlow, Regulation, TracingProgress};
use regap_chunker::read_docx_file;
use regap_model::{ModelClients, ModelConfig};
use regap_report::export_xlsx;
use tracing::info;

/// Arguments for the analyze subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Policy document to analyze (.docx).
    #[arg(long)]
    pub document: PathBuf,

    /// Regulation clause spreadsheet with pre-computed embeddings (.xlsx).
    #[arg(long)]
    pub regulation: PathBuf,

    /// Where to write the report spreadsheet.
    #[arg(long)]
    pub output: PathBuf,

    /// Chunks retrieved per clause.
    #[arg(long, default_value_t = 4)]
    pub k: usize,

    /// Completion attempts per call, counting the first.
    #[arg(long, default_value_t = 3)]
    pub attempts: u32,

    /// Sleep between completion attempts, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub backoff_ms: u64,

    /// Use the two-call flow (free-text verdict, then table reformat).
    #[arg(long)]
    pub two_call: bool,
}

pub async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = ModelConfig::from_env().context("loading model configuration")?;
    let clients = ModelClients::new(config).context("building model clients")?;

    let paragraphs = read_docx_file(&args.document)
        .with_context(|| format!("reading document {}", args.document.display()))?;
    let regulation = Regulation::from_xlsx(&args.regulation)
        .with_context(|| format!("loading regulation {}", args.regulation.display()))?;
    info!(
        regulation = %regulation.name,
        clauses = regulation.clauses.len(),
        paragraphs = paragraphs.len(),
        "inputs loaded"
    );

    let analysis_config = AnalysisConfig {
        k: args.k,
        max_attempts: args.attempts,
        retry_backoff: Duration::from_millis(args.backoff_ms),
        flow: if args.two_call {
            PromptFlow::TwoCall
        } else {
            PromptFlow::DirectTable
        },
        ..AnalysisConfig::default()
    };

    let analyzer = GapAnalyzer::new(clients.embeddings(), clients.completion(), analysis_config);
    let run = analyzer
        .run(&paragraphs, &regulation, &mut TracingProgress)
        .await
        .context("analysis run failed")?;

    let bytes = export_xlsx(&run.report).context("rendering report spreadsheet")?;
    std::fs::write(&args.output, bytes)
        .with_context(|| format!("writing report to {}", args.output.display()))?;

    println!("Report written to {}", args.output.display());
    println!(
        "Clauses: {} total, {} analyzed, {} abrogated, {} without embedding, {} failed",
        run.summary.total_clauses,
        run.summary.analyzed,
        run.summary.skipped_abrogated,
        run.summary.skipped_missing_embedding,
        run.summary.failed,
    );
    println!("Findings: {} rows", run.report.rows.len());
    Ok(())
}
