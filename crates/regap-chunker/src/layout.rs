//! Document layout classification.
//!
//! The chunker supports two known layouts plus a fallback. Classification
//! is a pure function over the first paragraphs of the stream, separate
//! from the chunking logic itself.

use std::sync::OnceLock;

use regex::Regex;

use crate::paragraph::Paragraph;

/// How many leading paragraphs the classifier inspects.
const FINGERPRINT_WINDOW: usize = 30;

/// The control-code line pattern, e.g. `C-12 | Access reviews`.
pub(crate) fn control_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The pattern is a fixed literal; compilation cannot fail.
    RE.get_or_init(|| Regex::new(r"^C-\d+\s*\|").unwrap_or_else(|_| unreachable!()))
}

/// Recognized document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentLayout {
    /// Numbered list-paragraph titles with bold subtitles.
    ConceptRisk,
    /// Heading-2 sections with `C-<n> |` control lines.
    ItRiskControls,
    /// No fingerprint matched; chunked with the list+bold strategy.
    Generic,
}

impl std::fmt::Display for DocumentLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ConceptRisk => "concept-risk",
            Self::ItRiskControls => "it-risk-controls",
            Self::Generic => "generic",
        };
        f.write_str(s)
    }
}

impl DocumentLayout {
    /// Classify a paragraph stream by its leading fingerprints.
    ///
    /// A control-code pattern together with Heading 2 styles marks the
    /// controls layout; list-style paragraphs mark the concept layout;
    /// anything else is `Generic` (which chunks like the concept layout).
    pub fn classify(paragraphs: &[Paragraph]) -> Self {
        let mut has_list_paragraph = false;
        let mut has_heading2 = false;
        let mut has_control_pattern = false;

        for p in paragraphs.iter().take(FINGERPRINT_WINDOW) {
            if p.style_is("List Paragraph") {
                has_list_paragraph = true;
            }
            if p.style_is("Heading 2") {
                has_heading2 = true;
            }
            if control_pattern().is_match(p.text.trim()) {
                has_control_pattern = true;
            }
        }

        if has_control_pattern && has_heading2 {
            Self::ItRiskControls
        } else if has_list_paragraph {
            Self::ConceptRisk
        } else {
            Self::Generic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_paragraphs_mark_concept_layout() {
        let paras = vec![
            Paragraph::new("Introduction", "List Paragraph", false),
            Paragraph::plain("Some text."),
        ];
        assert_eq!(DocumentLayout::classify(&paras), DocumentLayout::ConceptRisk);
    }

    #[test]
    fn controls_layout_needs_both_fingerprints() {
        let with_both = vec![
            Paragraph::new("Access Management", "Heading 2", false),
            Paragraph::plain("C-01 | Access is reviewed quarterly"),
        ];
        assert_eq!(
            DocumentLayout::classify(&with_both),
            DocumentLayout::ItRiskControls
        );

        // Control lines without heading-2 sections are not enough.
        let only_controls = vec![Paragraph::plain("C-01 | Access is reviewed quarterly")];
        assert_eq!(
            DocumentLayout::classify(&only_controls),
            DocumentLayout::Generic
        );
    }

    #[test]
    fn ambiguous_stream_is_generic() {
        let paras = vec![Paragraph::plain("Plain prose only.")];
        assert_eq!(DocumentLayout::classify(&paras), DocumentLayout::Generic);
    }

    #[test]
    fn fingerprints_outside_window_are_ignored() {
        let mut paras = vec![Paragraph::plain("filler"); FINGERPRINT_WINDOW];
        paras.push(Paragraph::new("Late title", "List Paragraph", false));
        assert_eq!(DocumentLayout::classify(&paras), DocumentLayout::Generic);
    }
}
