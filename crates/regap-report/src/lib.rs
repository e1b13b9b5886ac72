//! # regap-report — Spreadsheet Export
//!
//! Renders a [`Report`] as styled `.xlsx` bytes. The exporter works
//! entirely in memory and is deterministic: the workbook carries a fixed
//! creation timestamp, so exporting the same report twice yields
//! byte-identical output.
//!
//! Styling contract: dark-blue header row with bold white text, gray fill
//! on every second data row, the Covered column centered with Yes in green
//! and No in bold red, wrap alignment on the free-text columns, fixed
//! column widths, and adjacent rows for the same article merged in the
//! first two columns with a thin bottom border closing each block.

use regap_core::{Coverage, Report};
use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, XlsxError,
};
use thiserror::Error;
use tracing::debug;

/// Errors rendering a report spreadsheet.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The workbook could not be assembled or serialized.
    #[error("spreadsheet rendering error: {0}")]
    Xlsx(#[from] XlsxError),
}

const HEADER_FILL: Color = Color::RGB(0x434FC3);
const STRIPE_FILL: Color = Color::RGB(0xD3D3D3);
const COLUMN_WIDTHS: [f64; 6] = [10.0, 40.0, 30.0, 10.0, 30.0, 60.0];

/// Render a report as `.xlsx` bytes.
pub fn export_xlsx(report: &Report) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    // Fixed creation time keeps identical reports byte-identical.
    let properties =
        DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
    workbook.set_properties(&properties);

    let sheet = workbook.add_worksheet();
    sheet.set_name("Gap Analysis")?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    for (col, header) in Report::HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let blocks = report.merge_blocks();
    let block_ends: Vec<usize> = blocks.iter().map(|&(_, end)| end).collect();

    for (i, row) in report.rows.iter().enumerate() {
        let excel_row = i as u32 + 1;
        let striped = i % 2 == 1;
        let block_end = block_ends.contains(&i);

        sheet.write_string_with_format(
            excel_row,
            2,
            &row.requirement,
            &text_format(striped, block_end),
        )?;
        sheet.write_string_with_format(
            excel_row,
            3,
            &row.covered.to_string(),
            &covered_format(&row.covered, striped, block_end),
        )?;
        sheet.write_string_with_format(
            excel_row,
            4,
            &row.reference,
            &text_format(striped, block_end),
        )?;
        sheet.write_string_with_format(
            excel_row,
            5,
            &row.comment,
            &text_format(striped, block_end),
        )?;
    }

    // Article and article-content columns, one write (or merge) per block.
    for &(start, end) in &blocks {
        let first = start as u32 + 1;
        let last = end as u32 + 1;
        let row = &report.rows[start];
        let article_format = article_format();
        let content_format = article_format_wrapped();
        if start == end {
            sheet.write_string_with_format(first, 0, &row.article, &article_format)?;
            sheet.write_string_with_format(first, 1, &row.article_content, &content_format)?;
        } else {
            sheet.merge_range(first, 0, last, 0, &row.article, &article_format)?;
            sheet.merge_range(first, 1, last, 1, &row.article_content, &content_format)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(rows = report.rows.len(), bytes = bytes.len(), "report exported");
    Ok(bytes)
}

fn text_format(striped: bool, block_end: bool) -> Format {
    let mut format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top);
    if striped {
        format = format.set_background_color(STRIPE_FILL);
    }
    if block_end {
        format = format.set_border_bottom(FormatBorder::Thin);
    }
    format
}

fn covered_format(coverage: &Coverage, striped: bool, block_end: bool) -> Format {
    let mut format = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    match coverage {
        Coverage::Yes => format = format.set_font_color(Color::Green),
        Coverage::No => format = format.set_bold().set_font_color(Color::Red),
        Coverage::Partial | Coverage::Other(_) => {}
    }
    if striped {
        format = format.set_background_color(STRIPE_FILL);
    }
    if block_end {
        format = format.set_border_bottom(FormatBorder::Thin);
    }
    format
}

fn article_format() -> Format {
    Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border_bottom(FormatBorder::Thin)
}

fn article_format_wrapped() -> Format {
    Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_border_bottom(FormatBorder::Thin)
}
