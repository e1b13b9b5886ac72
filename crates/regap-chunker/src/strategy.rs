//! Chunking strategies.
//!
//! Both strategies make a single left-to-right pass with one mutable
//! accumulator and share the invariant that a chunk with an empty body is
//! never emitted — a flush is a no-op unless body lines have accumulated.

use regap_core::Chunk;
use tracing::debug;

use crate::layout::{control_pattern, DocumentLayout};
use crate::paragraph::Paragraph;

/// Section title used when a control line precedes any heading.
const FALLBACK_SECTION: &str = "General";

/// Classify the stream and chunk it with the matching strategy.
pub fn chunk_document(paragraphs: &[Paragraph]) -> (DocumentLayout, Vec<Chunk>) {
    let layout = DocumentLayout::classify(paragraphs);
    let chunks = chunk_with_layout(layout, paragraphs);
    debug!(%layout, chunks = chunks.len(), "chunked document");
    (layout, chunks)
}

/// Chunk a paragraph stream with the strategy for a known layout.
pub fn chunk_with_layout(layout: DocumentLayout, paragraphs: &[Paragraph]) -> Vec<Chunk> {
    match layout {
        DocumentLayout::ItRiskControls => chunk_controls(paragraphs),
        DocumentLayout::ConceptRisk | DocumentLayout::Generic => chunk_concept(paragraphs),
    }
}

/// List+bold strategy: numbered list paragraphs are top-level titles, bold
/// runs (or heading-style variants) are subtitles, everything else is body.
fn chunk_concept(paragraphs: &[Paragraph]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut title: Option<String> = None;
    let mut ordinal = 0usize;
    let mut subtitle = String::new();
    let mut body: Vec<String> = Vec::new();

    let flush = |chunks: &mut Vec<Chunk>,
                 title: &Option<String>,
                 subtitle: &str,
                 body: &mut Vec<String>| {
        if let Some(title) = title {
            if !body.is_empty() {
                chunks.push(Chunk::new(
                    title.clone(),
                    subtitle.to_string(),
                    std::mem::take(body),
                ));
            }
        }
    };

    for p in paragraphs {
        let text = p.text.trim();
        if text.is_empty() {
            continue;
        }

        if p.style_is("List Paragraph") {
            flush(&mut chunks, &title, &subtitle, &mut body);
            ordinal += 1;
            title = Some(format!("{ordinal}. {text}"));
            subtitle.clear();
        } else if p.bold || p.style_is("Heading 3") || p.style_is("List Bullet") {
            flush(&mut chunks, &title, &subtitle, &mut body);
            subtitle = text.to_string();
        } else if title.is_some() {
            body.push(text.to_string());
        }
    }

    flush(&mut chunks, &title, &subtitle, &mut body);
    chunks
}

/// Heading+control strategy: Heading 2 paragraphs are sections, control
/// lines (`C-<n> |` or bulleted `C-` items) are subtitles, the rest is
/// detail text attached under the current control.
fn chunk_controls(paragraphs: &[Paragraph]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut section: Option<String> = None;
    let mut control: Option<String> = None;
    let mut body: Vec<String> = Vec::new();

    let flush = |chunks: &mut Vec<Chunk>,
                 section: &Option<String>,
                 control: &Option<String>,
                 body: &mut Vec<String>| {
        if let Some(control) = control {
            if !body.is_empty() {
                chunks.push(Chunk::new(
                    section.clone().unwrap_or_else(|| FALLBACK_SECTION.to_string()),
                    control.clone(),
                    std::mem::take(body),
                ));
            }
        }
    };

    for p in paragraphs {
        let text = p.text.trim();
        if text.is_empty() {
            continue;
        }

        if p.style_is("Heading 2") {
            flush(&mut chunks, &section, &control, &mut body);
            section = Some(text.to_string());
            control = None;
        } else if control_pattern().is_match(text)
            || (p.style_is("List Bullet") && text.contains("C-"))
        {
            flush(&mut chunks, &section, &control, &mut body);
            control = Some(text.replace("**", "").trim().to_string());
        } else if control.is_some() {
            body.push(text.to_string());
        }
    }

    flush(&mut chunks, &section, &control, &mut body);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(text: &str) -> Paragraph {
        Paragraph::new(text, "List Paragraph", false)
    }

    fn bold(text: &str) -> Paragraph {
        Paragraph::new(text, "Normal", true)
    }

    fn plain(text: &str) -> Paragraph {
        Paragraph::plain(text)
    }

    #[test]
    fn concept_layout_titles_subtitles_and_body() {
        let paras = vec![
            list("Governance"),
            bold("Risk Appetite"),
            plain("The Board reviews and approves risk appetite every year."),
            plain("Breaches are escalated."),
            bold("Reporting"),
            plain("Quarterly reports go to the Board."),
            list("Internal Audit"),
            plain("Audit reviews the framework."),
        ];
        let (layout, chunks) = chunk_document(&paras);
        assert_eq!(layout, DocumentLayout::ConceptRisk);
        assert_eq!(chunks.len(), 3);

        assert_eq!(chunks[0].title, "1. Governance");
        assert_eq!(chunks[0].subtitle, "Risk Appetite");
        assert_eq!(chunks[0].body.len(), 2);

        assert_eq!(chunks[1].subtitle, "Reporting");

        assert_eq!(chunks[2].title, "2. Internal Audit");
        assert_eq!(chunks[2].subtitle, "");
    }

    #[test]
    fn empty_body_chunks_are_never_emitted() {
        let paras = vec![
            list("Empty Section"),
            bold("Subtitle with no content"),
            list("Real Section"),
            plain("Actual content."),
        ];
        let (_, chunks) = chunk_document(&paras);
        assert!(chunks.iter().all(|c| !c.body.is_empty()));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "2. Real Section");
    }

    #[test]
    fn ordinals_count_every_top_level_item_from_one() {
        let paras = vec![
            list("First"),
            plain("a"),
            list("Second"),
            plain("b"),
            list("Third"),
            plain("c"),
        ];
        let (_, chunks) = chunk_document(&paras);
        let titles: Vec<&str> = chunks.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["1. First", "2. Second", "3. Third"]);
    }

    #[test]
    fn body_before_first_subtitle_is_kept_under_the_title() {
        let paras = vec![
            list("Scope"),
            plain("Applies to all staff."),
            bold("Exceptions"),
            plain("None."),
        ];
        let (_, chunks) = chunk_document(&paras);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].subtitle, "");
        assert_eq!(chunks[0].body, vec!["Applies to all staff.".to_string()]);
        assert_eq!(chunks[1].subtitle, "Exceptions");
    }

    #[test]
    fn empty_paragraphs_are_skipped_entirely() {
        let paras = vec![
            list("Scope"),
            plain("   "),
            plain("Applies to all staff."),
            plain(""),
        ];
        let (_, chunks) = chunk_document(&paras);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].body, vec!["Applies to all staff.".to_string()]);
    }

    #[test]
    fn text_before_any_title_is_dropped() {
        let paras = vec![plain("Preamble text."), list("Scope"), plain("Content.")];
        let chunks = chunk_with_layout(DocumentLayout::ConceptRisk, &paras);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].body, vec!["Content.".to_string()]);
    }

    #[test]
    fn controls_layout_sections_and_controls() {
        let paras = vec![
            Paragraph::new("Access Management", "Heading 2", false),
            plain("C-01 | Quarterly access review"),
            plain("All privileged accounts are reviewed each quarter."),
            plain("C-02 | Joiner-mover-leaver process"),
            plain("HR events trigger access changes within 24 hours."),
            Paragraph::new("Change Management", "Heading 2", false),
            Paragraph::new("C-03 standard changes", "List Bullet", false),
            plain("Standard changes are pre-approved."),
        ];
        let chunks = chunk_with_layout(DocumentLayout::ItRiskControls, &paras);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].title, "Access Management");
        assert_eq!(chunks[0].subtitle, "C-01 | Quarterly access review");
        assert_eq!(chunks[1].subtitle, "C-02 | Joiner-mover-leaver process");
        assert_eq!(chunks[2].title, "Change Management");
        assert_eq!(chunks[2].subtitle, "C-03 standard changes");
    }

    #[test]
    fn control_before_any_heading_gets_fallback_section() {
        let paras = vec![
            plain("C-09 | Backup verification"),
            plain("Backups are restored monthly as a test."),
        ];
        let chunks = chunk_with_layout(DocumentLayout::ItRiskControls, &paras);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "General");
    }
}
