//! # Embed Subcommand
//!
//! Pre-computes clause embeddings for a regulation spreadsheet so analysis
//! runs never embed clauses on the fly. Existing embeddings are kept;
//! abrogated clauses are left without one.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use regap_analysis::Regulation;
use regap_core::{encode_vector, Clause};
use regap_model::{Embedder, ModelClients, ModelConfig};
use rust_xlsxwriter::Workbook;
use tracing::info;

/// Arguments for the embed subcommand.
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Regulation clause spreadsheet to embed (.xlsx).
    #[arg(long)]
    pub regulation: PathBuf,

    /// Where to write the embedded spreadsheet.
    #[arg(long)]
    pub output: PathBuf,
}

const COLUMNS: [&str; 6] = ["Title", "SubTitle", "Sub_Subtitle", "Margin", "Text", "Embedding"];

pub async fn run(args: EmbedArgs) -> anyhow::Result<()> {
    let config = ModelConfig::from_env().context("loading model configuration")?;
    let clients = ModelClients::new(config).context("building model clients")?;

    let mut regulation = Regulation::from_xlsx(&args.regulation)
        .with_context(|| format!("loading regulation {}", args.regulation.display()))?;

    let pending: Vec<usize> = regulation
        .clauses
        .iter()
        .enumerate()
        .filter(|(_, c)| c.embedding.is_none() && !c.is_abrogated())
        .map(|(i, _)| i)
        .collect();
    info!(
        regulation = %regulation.name,
        clauses = regulation.clauses.len(),
        pending = pending.len(),
        "embedding clauses"
    );

    if !pending.is_empty() {
        let texts: Vec<String> = pending
            .iter()
            .map(|&i| regulation.clauses[i].full_text())
            .collect();
        let vectors = clients
            .embeddings()
            .embed_documents(&texts)
            .await
            .context("embedding clauses")?;
        for (&i, vector) in pending.iter().zip(vectors) {
            regulation.clauses[i].embedding = Some(vector);
        }
    }

    let bytes = write_clause_sheet(&regulation.clauses).context("rendering spreadsheet")?;
    std::fs::write(&args.output, bytes)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Embedded {} clauses, wrote {}",
        pending.len(),
        args.output.display()
    );
    Ok(())
}

fn write_clause_sheet(clauses: &[Clause]) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, clause) in clauses.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &clause.title)?;
        sheet.write_string(row, 1, &clause.subtitle)?;
        sheet.write_string(row, 2, &clause.sub_subtitle)?;
        sheet.write_string(row, 3, &clause.margin)?;
        sheet.write_string(row, 4, &clause.text)?;
        if let Some(embedding) = &clause.embedding {
            sheet.write_string(row, 5, encode_vector(embedding))?;
        }
    }
    workbook.save_to_buffer()
}
