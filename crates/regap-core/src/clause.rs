//! Regulatory clauses — the unit of analysis.
//!
//! A clause is one article of a regulatory text, loaded from a pre-built
//! clause spreadsheet. Its `margin` is the regulatory citation number and
//! keys the rows it produces in the final report.

use serde::{Deserialize, Serialize};

/// Sentinel text marking a clause that has been repealed.
///
/// Matched case-insensitively; an abrogated clause is never analyzed and
/// never appears in the report.
pub const ABROGATED_SENTINEL: &str = "abrogated";

/// One article of a regulatory text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Article title (chapter-level heading). May be empty.
    pub title: String,
    /// Article subtitle. May be empty.
    pub subtitle: String,
    /// Second-level subtitle. May be empty.
    pub sub_subtitle: String,
    /// Regulatory citation number (margin number) — the report's row key.
    pub margin: String,
    /// The clause text itself.
    pub text: String,
    /// Persisted query embedding, when one has been computed for this clause.
    pub embedding: Option<Vec<f32>>,
}

impl Clause {
    /// Whether this clause is marked as repealed.
    pub fn is_abrogated(&self) -> bool {
        self.text.trim().eq_ignore_ascii_case(ABROGATED_SENTINEL)
    }

    /// The exact text submitted to the embedding service for this clause,
    /// and the article text placed into gap-analysis prompts.
    ///
    /// Non-empty `title`, `subtitle`, `sub_subtitle`, and `text`, each on
    /// its own line, in that fixed order. Omitted fields contribute no
    /// line. This concatenation must match the one used when the persisted
    /// embeddings were generated.
    pub fn full_text(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(4);
        for field in [
            self.title.as_str(),
            self.subtitle.as_str(),
            self.sub_subtitle.as_str(),
            self.text.as_str(),
        ] {
            if !field.is_empty() {
                lines.push(field);
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(title: &str, subtitle: &str, sub_subtitle: &str, text: &str) -> Clause {
        Clause {
            title: title.into(),
            subtitle: subtitle.into(),
            sub_subtitle: sub_subtitle.into(),
            margin: "12".into(),
            text: text.into(),
            embedding: None,
        }
    }

    #[test]
    fn full_text_joins_non_empty_fields_in_order() {
        let c = clause("IV. Risk management", "Risk tolerance", "", "The board defines it.");
        assert_eq!(
            c.full_text(),
            "IV. Risk management\nRisk tolerance\nThe board defines it."
        );
    }

    #[test]
    fn full_text_with_only_text() {
        let c = clause("", "", "", "Standalone requirement.");
        assert_eq!(c.full_text(), "Standalone requirement.");
    }

    #[test]
    fn abrogated_is_case_insensitive_and_trimmed() {
        assert!(clause("", "", "", "Abrogated").is_abrogated());
        assert!(clause("", "", "", "  ABROGATED ").is_abrogated());
        assert!(!clause("", "", "", "Abrogated in part").is_abrogated());
    }
}
