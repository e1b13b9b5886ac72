//! # regap-analysis — Gap-Analysis Orchestration
//!
//! Drives the per-clause analysis loop: load the regulation, chunk and
//! embed the uploaded document into a fresh similarity index, then for each
//! clause retrieve the closest chunks, prompt the model for a coverage
//! verdict, parse the returned table, and accumulate report rows.
//!
//! ## Failure policy
//!
//! Only input-stage problems (unreadable regulation, empty document,
//! corpus embedding failure) abort a run. Everything clause-scoped —
//! missing embeddings, exhausted retries, malformed model output —
//! degrades to a skip, a failure mark, or a synthetic fallback row, and
//! the run continues. A report is always produced.

pub mod orchestrator;
pub mod progress;
pub mod prompt;
pub mod regulation;
pub mod table;

pub use orchestrator::{AnalysisConfig, AnalysisRun, ClauseState, GapAnalyzer, RunSummary};
pub use progress::{NullProgress, ProgressSink, TracingProgress};
pub use prompt::{build_freeform_prompt, build_gap_prompt, build_table_prompt, PromptFlow};
pub use regulation::{Regulation, RegulationError};
pub use table::{parse_table, NO_TABLE_COMMENT};

use regap_index::IndexError;
use regap_model::ModelError;
use thiserror::Error;

/// Run-aborting errors. Clause-scoped failures never surface here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The regulation source could not be loaded.
    #[error("regulation source error: {0}")]
    Regulation(#[from] RegulationError),

    /// The uploaded document yielded no chunks to index.
    #[error("document produced no chunks")]
    EmptyDocument,

    /// The document corpus could not be embedded.
    #[error("failed to embed document chunks: {0}")]
    CorpusEmbedding(#[source] ModelError),

    /// The similarity index could not be built.
    #[error("index error: {0}")]
    Index(#[from] IndexError),
}
