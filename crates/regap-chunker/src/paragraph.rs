//! The paragraph stream consumed by the chunking strategies.

/// One paragraph of the uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Paragraph text with runs concatenated.
    pub text: String,
    /// Style label, e.g. `"List Paragraph"` or `"Heading 2"`. Docx files
    /// carry style identifiers (`"ListParagraph"`, `"Heading2"`); both
    /// spellings are matched.
    pub style: String,
    /// Whether at least one run in the paragraph is bold.
    pub bold: bool,
}

impl Paragraph {
    /// Construct a paragraph.
    pub fn new(text: impl Into<String>, style: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
            bold,
        }
    }

    /// Plain unstyled paragraph, for tests and simple callers.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, "Normal", false)
    }

    /// Style comparison ignoring case and spacing, so `"Heading 2"` and
    /// `"Heading2"` both match.
    pub fn style_is(&self, name: &str) -> bool {
        let normalize = |s: &str| {
            s.chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
        };
        normalize(&self.style) == normalize(name)
    }
}
