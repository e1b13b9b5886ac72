//! Pipe-table parsing of model responses.
//!
//! The model is asked for `Requirement | Covered | Reference | Comment`
//! data rows. Responses are messy in practice: header rows slip in,
//! markdown separator rules appear, comments contain literal pipes, rows
//! arrive wrapped in leading or trailing delimiters. The parser is
//! tolerant of all of that and never fails — a response with no usable
//! rows degrades to a single synthetic fallback row so the clause is still
//! visible in the report.

use regap_core::{Coverage, GapRow, ARTICLE_EXCERPT_CHARS};
use tracing::warn;

/// Comment placed on the synthetic row emitted when a response yields no
/// parseable table rows.
pub const NO_TABLE_COMMENT: &str =
    "The model response did not contain a valid requirements table.";

/// Minimum characters for a requirement cell to count as a real row.
/// Shorter cells are artifacts (stray separators, empty echoes).
const MIN_REQUIREMENT_CHARS: usize = 5;

/// Parse a raw model response into report rows for one clause.
///
/// `article` is the clause's margin number, `article_text` its full text;
/// both are stamped onto every produced row (the text truncated to
/// [`ARTICLE_EXCERPT_CHARS`]).
pub fn parse_table(raw: &str, article: &str, article_text: &str) -> Vec<GapRow> {
    let article_content: String = article_text.chars().take(ARTICLE_EXCERPT_CHARS).collect();

    let mut rows = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if !line.contains('|') {
            continue;
        }
        if is_header_line(line) || is_separator_line(line) {
            continue;
        }

        let parts: Vec<&str> = line.trim_matches('|').split('|').collect();
        if parts.len() < 4 {
            continue;
        }

        let requirement = parts[0].trim();
        if requirement.chars().count() < MIN_REQUIREMENT_CHARS {
            continue;
        }

        let covered = Coverage::normalize(parts[1]);
        let reference = match parts[2].trim() {
            "-" => "",
            other => other,
        };
        // Comments may contain literal pipes; everything past the third
        // delimiter belongs to the comment.
        let comment = parts[3..].join("|");

        rows.push(GapRow {
            article: article.to_string(),
            article_content: article_content.clone(),
            requirement: requirement.to_string(),
            covered,
            reference: reference.to_string(),
            comment: comment.trim().to_string(),
        });
    }

    if rows.is_empty() {
        warn!(article = %article, "response contained no parseable table rows");
        rows.push(GapRow {
            article: article.to_string(),
            article_content,
            requirement: "-".to_string(),
            covered: Coverage::Other(String::new()),
            reference: String::new(),
            comment: NO_TABLE_COMMENT.to_string(),
        });
    }

    rows
}

fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("requirement") && lower.contains("covered")
}

fn is_separator_line(line: &str) -> bool {
    line.contains("---") || line.contains("===") || line.contains("___")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_data_rows() {
        let raw = "Board approval of risk appetite | Yes | 3. Governance | The document states the board approves it annually.\n\
                   Annual review cadence | No | - | No review cadence is described anywhere in the document.";
        let rows = parse_table(raw, "12", "Article text.");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].article, "12");
        assert_eq!(rows[0].requirement, "Board approval of risk appetite");
        assert_eq!(rows[0].covered, Coverage::Yes);
        assert_eq!(rows[0].reference, "3. Governance");
        assert_eq!(rows[1].covered, Coverage::No);
        assert_eq!(rows[1].reference, "");
    }

    #[test]
    fn skips_headers_separators_and_prose() {
        let raw = "Here is the analysis you asked for.\n\
                   Requirement | Covered | Reference | Comment\n\
                   ---|---|---|---\n\
                   A real requirement sentence | Partial | 2. Scope | Partly described in the scope section.";
        let rows = parse_table(raw, "7", "Text");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].covered, Coverage::Partial);
    }

    #[test]
    fn strips_wrapping_pipes() {
        let raw = "| Wrapped requirement row | Yes | 1. Intro | Explained in the introduction. |";
        let rows = parse_table(raw, "7", "Text");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].requirement, "Wrapped requirement row");
        assert_eq!(rows[0].comment, "Explained in the introduction.");
    }

    #[test]
    fn pipes_inside_comment_are_preserved() {
        let raw = "Some requirement here | No | - | Missing from sections 1 | 2 | 3.";
        let rows = parse_table(raw, "7", "Text");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].comment, "Missing from sections 1 | 2 | 3.");
    }

    #[test]
    fn short_requirement_cells_are_dropped() {
        let raw = "abc | Yes | ref | comment text\n\
                   A requirement long enough | Yes | ref | comment text";
        let rows = parse_table(raw, "7", "Text");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].requirement, "A requirement long enough");
    }

    #[test]
    fn rows_with_fewer_than_four_fields_are_dropped() {
        let rows = parse_table("only | three | fields", "7", "Text");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].comment, NO_TABLE_COMMENT);
    }

    #[test]
    fn empty_response_yields_fallback_row() {
        let rows = parse_table("I could not produce a table.", "12", "Article text.");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].article, "12");
        assert_eq!(rows[0].requirement, "-");
        assert_eq!(rows[0].covered, Coverage::Other(String::new()));
        assert_eq!(rows[0].reference, "");
        assert_eq!(rows[0].comment, NO_TABLE_COMMENT);
    }

    #[test]
    fn article_content_is_truncated() {
        let long_text = "x".repeat(ARTICLE_EXCERPT_CHARS + 50);
        let rows = parse_table("nothing", "1", &long_text);
        assert_eq!(rows[0].article_content.chars().count(), ARTICLE_EXCERPT_CHARS);
    }
}
