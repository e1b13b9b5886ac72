//! Gap-report rows and the coverage vocabulary.
//!
//! A [`GapRow`] is the atomic unit of the final report: one requirement the
//! model extracted from a clause, with its coverage verdict. Rows stay in
//! clause iteration order; adjacent rows sharing an article are rendered as
//! one visual block on export.

use serde::{Deserialize, Serialize};

/// Maximum article text carried in a row, bounding report size.
pub const ARTICLE_EXCERPT_CHARS: usize = 300;

/// Coverage verdict for a single requirement.
///
/// `Other` carries a model token that matched none of the known synonyms.
/// It is a data-quality signal, not a parse failure — the row is kept and
/// the raw token passes through to the report unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coverage {
    /// Requirement fully addressed with explicit controls or evidence.
    Yes,
    /// Requirement mentioned but insufficiently detailed.
    Partial,
    /// Requirement absent from the document.
    No,
    /// Unrecognized coverage token, passed through verbatim.
    Other(String),
}

impl Coverage {
    /// Normalize a raw model token into the coverage vocabulary.
    ///
    /// Case-insensitive fixed synonym table; anything else passes through
    /// as [`Coverage::Other`] with the original (trimmed) token.
    pub fn normalize(token: &str) -> Self {
        let trimmed = token.trim();
        match trimmed.to_lowercase().as_str() {
            "yes" | "y" | "full" | "fully covered" => Self::Yes,
            "partial" | "partially" | "p" | "partly" => Self::Partial,
            "no" | "n" | "missing" | "not covered" => Self::No,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl std::fmt::Display for Coverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => f.write_str("Yes"),
            Self::Partial => f.write_str("Partial"),
            Self::No => f.write_str("No"),
            Self::Other(token) => f.write_str(token),
        }
    }
}

/// One requirement-level finding in the gap report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapRow {
    /// Regulatory citation (margin number) of the source clause.
    pub article: String,
    /// Clause text excerpt, truncated to [`ARTICLE_EXCERPT_CHARS`].
    pub article_content: String,
    /// What the clause requires.
    pub requirement: String,
    /// Coverage verdict.
    pub covered: Coverage,
    /// Section of the company document addressing the requirement, if any.
    pub reference: String,
    /// The model's assessment of how (or whether) the requirement is met.
    pub comment: String,
}

/// The accumulated gap-analysis report.
///
/// Written once at the end of a run and never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Findings in clause iteration order.
    pub rows: Vec<GapRow>,
}

impl Report {
    /// Column headers, in the fixed export order.
    pub const HEADERS: [&'static str; 6] = [
        "Article",
        "Article Content",
        "Requirement",
        "Covered",
        "Reference in Document",
        "Comment",
    ];

    /// Ranges of adjacent rows sharing an article, as `(start, end)` row
    /// indexes (inclusive). These become the merged visual blocks on
    /// export; computing them here keeps the boundary logic testable
    /// without rendering a spreadsheet.
    pub fn merge_blocks(&self) -> Vec<(usize, usize)> {
        let mut blocks = Vec::new();
        let mut start = 0;
        for i in 1..=self.rows.len() {
            let boundary = i == self.rows.len() || self.rows[i].article != self.rows[start].article;
            if boundary && i > 0 && !self.rows.is_empty() {
                blocks.push((start, i - 1));
                start = i;
            }
        }
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_affirmative_synonyms() {
        for token in ["yes", "Y", "fully covered", "FULL"] {
            assert_eq!(Coverage::normalize(token), Coverage::Yes, "{token}");
        }
    }

    #[test]
    fn normalize_partial_synonyms() {
        for token in ["partial", "Partly", "p", "PARTIALLY"] {
            assert_eq!(Coverage::normalize(token), Coverage::Partial, "{token}");
        }
    }

    #[test]
    fn normalize_negative_synonyms() {
        for token in ["no", "N", "missing", "Not Covered"] {
            assert_eq!(Coverage::normalize(token), Coverage::No, "{token}");
        }
    }

    #[test]
    fn unrecognized_token_passes_through() {
        assert_eq!(
            Coverage::normalize(" Unclear "),
            Coverage::Other("Unclear".into())
        );
        assert_eq!(Coverage::Other("Unclear".into()).to_string(), "Unclear");
    }

    fn row(article: &str) -> GapRow {
        GapRow {
            article: article.into(),
            article_content: String::new(),
            requirement: "Some requirement text".into(),
            covered: Coverage::Yes,
            reference: String::new(),
            comment: String::new(),
        }
    }

    #[test]
    fn merge_blocks_groups_adjacent_articles() {
        let report = Report {
            rows: vec![row("10"), row("10"), row("11"), row("12"), row("12")],
        };
        assert_eq!(report.merge_blocks(), vec![(0, 1), (2, 2), (3, 4)]);
    }

    #[test]
    fn merge_blocks_empty_report() {
        assert!(Report::default().merge_blocks().is_empty());
    }

    #[test]
    fn merge_blocks_does_not_join_non_adjacent_duplicates() {
        let report = Report {
            rows: vec![row("10"), row("11"), row("10")],
        };
        assert_eq!(report.merge_blocks(), vec![(0, 0), (1, 1), (2, 2)]);
    }
}
