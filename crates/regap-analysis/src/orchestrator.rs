//! The per-clause analysis loop.
//!
//! [`GapAnalyzer::run`] takes an already-parsed paragraph stream and a
//! loaded [`Regulation`], builds a fresh similarity index over the
//! document, and walks the clauses in source order. Clause-scoped failures
//! never abort the run: abrogated and embedding-less clauses are skipped,
//! completion calls are retried on transient errors up to a bound, and a
//! clause whose retries are exhausted is marked failed and the loop moves
//! on. The run always ends with a report and a [`RunSummary`] accounting
//! for every clause.

use std::time::Duration;

use regap_chunker::{chunk_document, Paragraph};
use regap_core::Report;
use regap_index::SimilarityIndex;
use regap_model::{CompletionModel, Embedder, ModelError};
use tracing::{debug, info, warn};

use crate::progress::ProgressSink;
use crate::prompt::{build_freeform_prompt, build_gap_prompt, build_table_prompt, PromptFlow};
use crate::regulation::Regulation;
use crate::table::parse_table;
use crate::AnalysisError;

/// Tuning knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Chunks retrieved per clause.
    pub k: usize,
    /// Completion attempts per call, counting the first.
    pub max_attempts: u32,
    /// Sleep between completion attempts.
    pub retry_backoff: Duration,
    /// Temperature for the gap-analysis (verdict) call.
    pub gap_temperature: f32,
    /// Temperature for the table-reformat call of the two-call flow.
    pub table_temperature: f32,
    /// Token budget per completion call.
    pub max_tokens: u32,
    /// Which prompt flow to run.
    pub flow: PromptFlow,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            k: 4,
            max_attempts: 3,
            retry_backoff: Duration::from_secs(2),
            gap_temperature: 0.2,
            table_temperature: 0.1,
            max_tokens: 3000,
            flow: PromptFlow::default(),
        }
    }
}

/// Lifecycle of one clause through the analysis loop.
///
/// Linear happy path `Pending → EmbeddingLookup → Retrieving → Prompting →
/// Parsing → Accumulated`; any pre-terminal state can divert to `Skipped`
/// (policy exclusion) or `Failed` (exhausted retries).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseState {
    /// Not yet visited.
    Pending,
    /// Checking for a usable persisted embedding.
    EmbeddingLookup,
    /// Querying the similarity index.
    Retrieving,
    /// Waiting on the completion service.
    Prompting,
    /// Parsing the returned table.
    Parsing,
    /// Rows for this clause were added to the report.
    Accumulated,
    /// Excluded by policy (abrogated, or no embedding).
    Skipped,
    /// Completion retries were exhausted.
    Failed,
}

impl ClauseState {
    /// Whether the loop is done with this clause.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accumulated | Self::Skipped | Self::Failed)
    }
}

impl std::fmt::Display for ClauseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::EmbeddingLookup => "EMBEDDING_LOOKUP",
            Self::Retrieving => "RETRIEVING",
            Self::Prompting => "PROMPTING",
            Self::Parsing => "PARSING",
            Self::Accumulated => "ACCUMULATED",
            Self::Skipped => "SKIPPED",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Per-run clause accounting. Always sums to the clause count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Clauses in the regulation.
    pub total_clauses: usize,
    /// Clauses that produced report rows.
    pub analyzed: usize,
    /// Clauses excluded as repealed.
    pub skipped_abrogated: usize,
    /// Clauses excluded for lack of a persisted embedding.
    pub skipped_missing_embedding: usize,
    /// Clauses abandoned after exhausting completion retries.
    pub failed: usize,
}

/// The outcome of a completed run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// Accumulated report rows, in clause order.
    pub report: Report,
    /// Clause accounting.
    pub summary: RunSummary,
}

/// Drives the analysis loop against injected model services.
pub struct GapAnalyzer<'a, E, C> {
    embedder: &'a E,
    completion: &'a C,
    config: AnalysisConfig,
}

impl<'a, E, C> GapAnalyzer<'a, E, C>
where
    E: Embedder,
    C: CompletionModel,
{
    /// Create an analyzer over the given services.
    pub fn new(embedder: &'a E, completion: &'a C, config: AnalysisConfig) -> Self {
        Self {
            embedder,
            completion,
            config,
        }
    }

    /// Run a full analysis of one document against one regulation.
    pub async fn run(
        &self,
        paragraphs: &[Paragraph],
        regulation: &Regulation,
        progress: &mut dyn ProgressSink,
    ) -> Result<AnalysisRun, AnalysisError> {
        progress.update(5, "chunking document");
        let (layout, chunks) = chunk_document(paragraphs);
        if chunks.is_empty() {
            return Err(AnalysisError::EmptyDocument);
        }
        info!(%layout, chunks = chunks.len(), "document chunked");

        progress.update(10, "embedding document");
        let texts: Vec<String> = chunks.iter().map(|c| c.embedding_text()).collect();
        let vectors = self
            .embedder
            .embed_documents(&texts)
            .await
            .map_err(AnalysisError::CorpusEmbedding)?;

        progress.update(30, "building index");
        let index = SimilarityIndex::build(chunks, vectors)?;

        progress.update(40, "analyzing clauses");
        let mut report = Report::default();
        let mut summary = RunSummary {
            total_clauses: regulation.clauses.len(),
            ..RunSummary::default()
        };
        let mut last_percent = 40u8;

        for (i, clause) in regulation.clauses.iter().enumerate() {
            let state = self
                .analyze_clause(clause, &index, &mut report, &mut summary)
                .await;
            debug!(margin = %clause.margin, state = %state, "clause finished");
            debug_assert!(state.is_terminal());

            let percent = clause_percent(i, regulation.clauses.len()).max(last_percent);
            if percent > last_percent {
                last_percent = percent;
                progress.update(percent, "analyzing clauses");
            }
        }

        progress.update(100, "done");
        info!(
            regulation = %regulation.name,
            analyzed = summary.analyzed,
            skipped_abrogated = summary.skipped_abrogated,
            skipped_missing_embedding = summary.skipped_missing_embedding,
            failed = summary.failed,
            rows = report.rows.len(),
            "analysis complete"
        );
        Ok(AnalysisRun { report, summary })
    }

    async fn analyze_clause(
        &self,
        clause: &regap_core::Clause,
        index: &SimilarityIndex,
        report: &mut Report,
        summary: &mut RunSummary,
    ) -> ClauseState {
        let mut state = ClauseState::Pending;
        if clause.is_abrogated() {
            summary.skipped_abrogated += 1;
            return ClauseState::Skipped;
        }

        state = advance(state, ClauseState::EmbeddingLookup, &clause.margin);
        let Some(embedding) = clause.embedding.as_deref() else {
            warn!(margin = %clause.margin, "clause has no embedding, skipping");
            summary.skipped_missing_embedding += 1;
            return ClauseState::Skipped;
        };

        state = advance(state, ClauseState::Retrieving, &clause.margin);
        let retrieved = index.query(embedding, self.config.k);
        let article_text = clause.full_text();

        state = advance(state, ClauseState::Prompting, &clause.margin);
        let raw = match self.config.flow {
            PromptFlow::DirectTable => {
                let prompt = build_gap_prompt(&retrieved, &article_text);
                self.complete_with_retry(&prompt, self.config.gap_temperature)
                    .await
            }
            PromptFlow::TwoCall => {
                let verdict_prompt = build_freeform_prompt(&retrieved, &article_text);
                match self
                    .complete_with_retry(&verdict_prompt, self.config.gap_temperature)
                    .await
                {
                    Ok(verdict) => {
                        let table_prompt = build_table_prompt(&verdict);
                        self.complete_with_retry(&table_prompt, self.config.table_temperature)
                            .await
                    }
                    Err(err) => Err(err),
                }
            }
        };

        match raw {
            Ok(raw) => {
                state = advance(state, ClauseState::Parsing, &clause.margin);
                report
                    .rows
                    .extend(parse_table(&raw, &clause.margin, &article_text));
                summary.analyzed += 1;
                advance(state, ClauseState::Accumulated, &clause.margin)
            }
            Err(err) => {
                warn!(margin = %clause.margin, error = %err, "clause failed, continuing");
                summary.failed += 1;
                ClauseState::Failed
            }
        }
    }

    /// One completion call with bounded retry on transient errors.
    async fn complete_with_retry(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, ModelError> {
        let mut attempt = 1u32;
        loop {
            match self
                .completion
                .complete(prompt, temperature, self.config.max_tokens)
                .await
            {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.config.max_attempts => {
                    warn!(attempt, error = %err, "transient completion failure, retrying");
                    tokio::time::sleep(self.config.retry_backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn advance(from: ClauseState, to: ClauseState, margin: &str) -> ClauseState {
    debug!(margin = %margin, from = %from, to = %to, "clause state");
    to
}

/// Clause-loop progress: 40% at loop start, 90% after the last clause,
/// linear in between.
fn clause_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 90;
    }
    let step = ((index + 1) * 50 / total) as u8;
    (40 + step).min(90)
}
