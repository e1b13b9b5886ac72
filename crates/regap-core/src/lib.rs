//! # regap-core — Foundational Types for the Gap-Analysis Pipeline
//!
//! Defines the domain types every other `regap-*` crate builds on: document
//! [`Chunk`]s produced by the structural chunker, regulatory [`Clause`]s
//! loaded from a clause spreadsheet, the [`Coverage`] verdict vocabulary,
//! [`GapRow`]/[`Report`] for the final artifact, and the JSON codec used to
//! persist embedding vectors alongside clause spreadsheets.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `regap-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All persisted types derive `Serialize`/`Deserialize`.

pub mod chunk;
pub mod clause;
pub mod embedding;
pub mod report;

pub use chunk::Chunk;
pub use clause::{Clause, ABROGATED_SENTINEL};
pub use embedding::{encode_vector, parse_vector, VectorParseError};
pub use report::{Coverage, GapRow, Report, ARTICLE_EXCERPT_CHARS};
