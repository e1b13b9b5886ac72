//! # regap-index — Similarity Index
//!
//! An in-memory nearest-neighbor store over chunk embeddings. Each analysis
//! run builds one fresh index scoped to one uploaded document; the index is
//! never mutated after construction, so queries need no locking and results
//! are deterministic for a fixed build (ties break by insertion order).
//!
//! Cosine similarity matches the metric the embedding space is served in.

use regap_core::Chunk;
use thiserror::Error;

/// Errors constructing a similarity index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Chunk and vector counts differ.
    #[error("chunk count {chunks} does not match vector count {vectors}")]
    CountMismatch {
        /// Number of chunks supplied.
        chunks: usize,
        /// Number of vectors supplied.
        vectors: usize,
    },

    /// A vector's dimension differs from the first vector's.
    #[error("vector {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending vector.
        index: usize,
        /// Its dimension.
        found: usize,
        /// The index dimension, fixed by the first vector.
        expected: usize,
    },
}

struct Entry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// Write-once cosine similarity index.
pub struct SimilarityIndex {
    entries: Vec<Entry>,
}

impl SimilarityIndex {
    /// Build an index from chunks and their embeddings, in matching order.
    pub fn build(chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> Result<Self, IndexError> {
        if chunks.len() != vectors.len() {
            return Err(IndexError::CountMismatch {
                chunks: chunks.len(),
                vectors: vectors.len(),
            });
        }
        if let Some(expected) = vectors.first().map(Vec::len) {
            for (index, v) in vectors.iter().enumerate() {
                if v.len() != expected {
                    return Err(IndexError::DimensionMismatch {
                        index,
                        found: v.len(),
                        expected,
                    });
                }
            }
        }
        let entries = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| Entry { chunk, vector })
            .collect();
        Ok(Self { entries })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` chunks most similar to the query vector, closest first.
    ///
    /// Chunks whose similarity is undefined (zero-norm or mismatched
    /// dimension) are excluded. Ties keep insertion order.
    pub fn query(&self, vector: &[f32], k: usize) -> Vec<(&Chunk, f32)> {
        let mut scored: Vec<(&Chunk, f32)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                cosine_similarity(vector, &entry.vector).map(|score| (&entry.chunk, score))
            })
            .collect();
        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        scored
    }
}

/// Cosine similarity of two vectors; `None` when undefined.
fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}
