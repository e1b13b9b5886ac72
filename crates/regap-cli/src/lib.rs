//! # regap-cli — Gap-Analysis Command-Line Interface
//!
//! ## Subcommands
//!
//! - `analyze` — Run a full gap analysis of a document against a regulation
//!   and write the styled report spreadsheet.
//! - `embed` — Pre-compute clause embeddings for a regulation spreadsheet.
//! - `chunk` — Chunk a document and print the detected layout and sections.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no business logic here.

pub mod analyze;
pub mod chunk;
pub mod embed;
