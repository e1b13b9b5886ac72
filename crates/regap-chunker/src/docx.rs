//! Thin `.docx` paragraph reader.
//!
//! A docx file is a zip container; the paragraph stream lives in
//! `word/document.xml`. Only what the chunker needs is extracted: paragraph
//! text (`w:t` runs concatenated), the paragraph style (`w:pStyle`), and
//! whether any run is bold (`w:b` inside a run's `w:rPr`). Everything else
//! in the document is ignored.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::paragraph::Paragraph;
use crate::ChunkError;

/// Hard ceiling on uploaded document size, enforced before the container
/// is opened.
pub const MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Read the paragraph stream from a docx file on disk.
pub fn read_docx_file(path: &Path) -> Result<Vec<Paragraph>, ChunkError> {
    check_size(std::fs::metadata(path)?.len())?;
    let bytes = std::fs::read(path)?;
    read_docx_bytes(&bytes)
}

/// Read the paragraph stream from in-memory docx bytes.
pub fn read_docx_bytes(bytes: &[u8]) -> Result<Vec<Paragraph>, ChunkError> {
    check_size(bytes.len() as u64)?;

    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ChunkError::MissingDocumentXml)?
        .read_to_string(&mut xml)?;

    parse_document_xml(&xml)
}

pub(crate) fn check_size(bytes: u64) -> Result<(), ChunkError> {
    if bytes > MAX_UPLOAD_BYTES {
        return Err(ChunkError::TooLarge {
            bytes,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

fn parse_document_xml(xml: &str) -> Result<Vec<Paragraph>, ChunkError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();

    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_paragraph_props = false;
    let mut text = String::new();
    let mut style = String::new();
    let mut bold = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    text.clear();
                    style.clear();
                    bold = false;
                }
                b"w:pPr" => in_paragraph_props = true,
                b"w:r" => in_run = true,
                b"w:pStyle" => {
                    if in_paragraph_props {
                        style = attr_val(&e)?.unwrap_or_default();
                    }
                }
                b"w:b" => {
                    if in_run && bold_attr_is_set(&e)? {
                        bold = true;
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                // Self-closing elements carry the same attributes.
                b"w:pStyle" => {
                    if in_paragraph_props {
                        style = attr_val(&e)?.unwrap_or_default();
                    }
                }
                b"w:b" => {
                    if in_run && bold_attr_is_set(&e)? {
                        bold = true;
                    }
                }
                b"w:tab" | b"w:br" => {
                    if in_paragraph {
                        text.push(' ');
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if in_paragraph {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if in_paragraph {
                        paragraphs.push(Paragraph::new(
                            text.trim().to_string(),
                            normalize_style(&style),
                            bold,
                        ));
                    }
                    in_paragraph = false;
                }
                b"w:pPr" => in_paragraph_props = false,
                b"w:r" => in_run = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn attr_val(e: &BytesStart<'_>) -> Result<Option<String>, ChunkError> {
    match e.try_get_attribute("w:val")? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// `<w:b/>` means bold; `<w:b w:val="false"/>` (or `"0"`/`"none"`) turns
/// the inherited property off.
fn bold_attr_is_set(e: &BytesStart<'_>) -> Result<bool, ChunkError> {
    Ok(match attr_val(e)?.as_deref() {
        Some("false") | Some("0") | Some("none") => false,
        _ => true,
    })
}

/// Map docx style identifiers (`"ListParagraph"`) to the spaced display
/// names (`"List Paragraph"`) the strategies match against. Identifiers
/// are camel-cased versions of the names, so a space is inserted before
/// interior capitals and digit groups.
fn normalize_style(style_id: &str) -> String {
    let mut out = String::with_capacity(style_id.len() + 4);
    let mut prev: Option<char> = None;
    for c in style_id.chars() {
        if let Some(p) = prev {
            let breaks = (c.is_ascii_uppercase() && !p.is_ascii_uppercase())
                || (c.is_ascii_digit() && !p.is_ascii_digit());
            if breaks {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
