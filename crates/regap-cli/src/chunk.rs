//! # Chunk Subcommand
//!
//! Chunks a document without touching any model service and prints the
//! detected layout and the resulting sections, for tuning the heuristics
//! against a new document.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use regap_chunker::{chunk_document, read_docx_file};

/// Arguments for the chunk subcommand.
#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// Policy document to chunk (.docx).
    #[arg(long)]
    pub document: PathBuf,

    /// Print full body text instead of a one-line summary per chunk.
    #[arg(long)]
    pub full: bool,
}

pub fn run(args: ChunkArgs) -> anyhow::Result<()> {
    let paragraphs = read_docx_file(&args.document)
        .with_context(|| format!("reading document {}", args.document.display()))?;
    let (layout, chunks) = chunk_document(&paragraphs);

    println!("Layout: {layout}");
    println!("Paragraphs: {}", paragraphs.len());
    println!("Chunks: {}", chunks.len());
    for chunk in &chunks {
        if chunk.subtitle.is_empty() {
            println!("- {} ({} paragraphs)", chunk.title, chunk.body.len());
        } else {
            println!(
                "- {} / {} ({} paragraphs)",
                chunk.title,
                chunk.subtitle,
                chunk.body.len()
            );
        }
        if args.full {
            for line in &chunk.body {
                println!("    {line}");
            }
        }
    }
    Ok(())
}
