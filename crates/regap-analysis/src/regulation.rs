//! Regulation (clause source) loading.
//!
//! Clauses live in a pre-built spreadsheet with the fixed columns `Title`,
//! `SubTitle`, `Sub_Subtitle`, `Margin`, `Text`, `Embedding`. The
//! `Embedding` column holds a JSON float array (see
//! [`regap_core::embedding`]); a malformed cell leaves the clause without
//! an embedding and it is skipped downstream — never silently analyzed
//! with a null vector.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use regap_core::{parse_vector, Clause};
use thiserror::Error;
use tracing::warn;

/// Required columns, in no particular order (located by header name).
const REQUIRED_COLUMNS: [&str; 6] = [
    "Title",
    "SubTitle",
    "Sub_Subtitle",
    "Margin",
    "Text",
    "Embedding",
];

/// Errors loading a regulation spreadsheet. All are input errors that
/// abort the run before analysis starts.
#[derive(Error, Debug)]
pub enum RegulationError {
    /// The spreadsheet could not be opened or read.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// The workbook has no sheets.
    #[error("workbook contains no sheets")]
    NoSheets,

    /// The header row is missing a required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// The sheet has no header row.
    #[error("sheet is empty")]
    EmptySheet,
}

/// A loaded regulation: its display name and clauses in sheet order.
#[derive(Debug, Clone)]
pub struct Regulation {
    /// Human-readable regulation name (from the file stem).
    pub name: String,
    /// Clauses in source order.
    pub clauses: Vec<Clause>,
}

impl Regulation {
    /// Load a regulation from the first sheet of a spreadsheet.
    pub fn from_xlsx(path: &Path) -> Result<Self, RegulationError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(RegulationError::NoSheets)??;

        let mut rows = range.rows();
        let header = rows.next().ok_or(RegulationError::EmptySheet)?;

        let mut columns = [usize::MAX; 6];
        for (i, cell) in header.iter().enumerate() {
            let label = cell_text(cell);
            if let Some(pos) = REQUIRED_COLUMNS
                .iter()
                .position(|c| c.eq_ignore_ascii_case(label.trim()))
            {
                columns[pos] = i;
            }
        }
        for (pos, name) in REQUIRED_COLUMNS.iter().enumerate() {
            if columns[pos] == usize::MAX {
                return Err(RegulationError::MissingColumn((*name).to_string()));
            }
        }
        let [title_col, subtitle_col, sub_subtitle_col, margin_col, text_col, embedding_col] =
            columns;

        let mut clauses = Vec::new();
        for row in rows {
            let margin = cell_text(row.get(margin_col).unwrap_or(&Data::Empty));
            let text = cell_text(row.get(text_col).unwrap_or(&Data::Empty));
            if margin.is_empty() && text.is_empty() {
                continue;
            }

            let embedding_cell = cell_text(row.get(embedding_col).unwrap_or(&Data::Empty));
            let embedding = if embedding_cell.is_empty() {
                None
            } else {
                match parse_vector(&embedding_cell) {
                    Ok(vector) => Some(vector),
                    Err(err) => {
                        warn!(margin = %margin, error = %err, "discarding malformed embedding");
                        None
                    }
                }
            };

            clauses.push(Clause {
                title: cell_text(row.get(title_col).unwrap_or(&Data::Empty)),
                subtitle: cell_text(row.get(subtitle_col).unwrap_or(&Data::Empty)),
                sub_subtitle: cell_text(row.get(sub_subtitle_col).unwrap_or(&Data::Empty)),
                margin,
                text,
                embedding,
            });
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "regulation".to_string());

        Ok(Self { name, clauses })
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
