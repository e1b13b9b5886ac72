//! # regap-chunker — Structural Document Chunker
//!
//! Turns a semi-structured rich-text document into a sequence of titled
//! [`Chunk`](regap_core::Chunk)s using style and formatting cues. The
//! heuristics are tuned to two known document layouts (see
//! [`DocumentLayout`]); a pure classifier sniffs the layout from the first
//! paragraphs and a strategy table dispatches to the matching chunking
//! function, so detection stays testable independent of chunking.
//!
//! The `.docx` reader is deliberately thin: it extracts the paragraph
//! stream `(text, style, bold)` and nothing else, and enforces the upload
//! size ceiling before touching the container.

pub mod docx;
pub mod layout;
pub mod paragraph;
pub mod strategy;

pub use docx::{read_docx_bytes, read_docx_file, MAX_UPLOAD_BYTES};
pub use layout::DocumentLayout;
pub use paragraph::Paragraph;
pub use strategy::{chunk_document, chunk_with_layout};

use thiserror::Error;

/// Errors from document ingestion and chunking.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// The uploaded document exceeds the size ceiling.
    #[error("document is {bytes} bytes, exceeding the {limit} byte ceiling")]
    TooLarge {
        /// Actual size of the upload.
        bytes: u64,
        /// The enforced ceiling.
        limit: u64,
    },

    /// The container is not a docx archive (no `word/document.xml`).
    #[error("not a docx document: word/document.xml missing")]
    MissingDocumentXml,

    /// IO error reading the document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip container could not be opened.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The document XML could not be parsed.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A malformed XML attribute was encountered.
    #[error("xml attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
}
