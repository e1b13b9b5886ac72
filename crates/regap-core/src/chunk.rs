//! Document chunks — the unit of retrieval.
//!
//! A chunk is one titled slice of an uploaded policy document: a top-level
//! title, an optional subtitle, and the body lines that sit under them.
//! Chunks are created once by the structural chunker and never mutated
//! afterward; the embedding text convention below must stay byte-for-byte
//! stable because retrieval quality depends on query and corpus using the
//! same concatenation.

use serde::{Deserialize, Serialize};

/// One titled section of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Top-level section title, e.g. `"3. Governance"`.
    pub title: String,
    /// Subsection title; empty when body lines attach directly under the title.
    pub subtitle: String,
    /// Body paragraphs in document order.
    pub body: Vec<String>,
}

impl Chunk {
    /// Create a chunk. Body order is preserved as given.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            body,
        }
    }

    /// Whether this chunk carries any body text.
    ///
    /// The chunker never emits an empty-body chunk; this exists for callers
    /// that construct chunks by hand.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// The text submitted to the embedding service for this chunk.
    ///
    /// `Title:` / `SubTitle:` labels, subtitle line omitted when empty,
    /// body lines joined with newlines.
    pub fn embedding_text(&self) -> String {
        self.labeled_text("Title: ", "SubTitle: ")
    }

    /// The text placed into a gap-analysis prompt for this chunk.
    ///
    /// Same layout as [`embedding_text`](Self::embedding_text) but with
    /// `Section:` / `SubSection:` labels for readability in instructions.
    pub fn section_text(&self) -> String {
        self.labeled_text("Section: ", "SubSection: ")
    }

    fn labeled_text(&self, title_label: &str, subtitle_label: &str) -> String {
        let mut out = String::new();
        out.push_str(title_label);
        out.push_str(&self.title);
        if !self.subtitle.is_empty() {
            out.push('\n');
            out.push_str(subtitle_label);
            out.push_str(&self.subtitle);
        }
        for line in &self.body {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}
