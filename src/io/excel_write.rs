use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::{debug, info};

use crate::error::Result;
use crate::extract::format_amount_side;
use crate::flatten::flatten_tree;
use crate::model::{LedgerRow, TrialBalanceDocument};

/// Worksheet name used when the caller has no preference.
pub const DEFAULT_SHEET_LABEL: &str = "Trial Balance";

const COLUMN_COUNT: u16 = 5;
const COLUMN_WIDTHS: [f64; COLUMN_COUNT as usize] = [48.0, 20.0, 16.0, 16.0, 20.0];
const NUMBER_FORMAT: &str = "#,##0.00";

/// Writes `document` as a formatted workbook at `path`.
///
/// Returns `Ok(false)` without touching the filesystem when there is no
/// document to export.
pub fn write_workbook(
    path: &Path,
    document: Option<&TrialBalanceDocument>,
    sheet_label: &str,
) -> Result<bool> {
    let Some(document) = document else {
        debug!("no document supplied, export skipped");
        return Ok(false);
    };

    let mut workbook = build_export_workbook(document, sheet_label)?;
    workbook.save(path)?;
    info!(path = %path.display(), "trial balance exported");
    Ok(true)
}

/// Serializes `document` to `.xlsx` bytes, or `None` when there is no
/// document.
pub fn workbook_to_buffer(
    document: Option<&TrialBalanceDocument>,
    sheet_label: &str,
) -> Result<Option<Vec<u8>>> {
    let Some(document) = document else {
        return Ok(None);
    };
    let mut workbook = build_export_workbook(document, sheet_label)?;
    Ok(Some(workbook.save_to_buffer()?))
}

/// Lays the document out on a single worksheet: header lines, a blank row,
/// the two-row column header, then one row per ledger in preorder.
pub fn build_export_workbook(document: &TrialBalanceDocument, sheet_label: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_label)?;

    let mut row = write_header_lines(worksheet, &document.meta.header_lines, 0)?;
    row += 1;
    row = write_column_header(worksheet, row)?;
    worksheet.set_freeze_panes(row, 0)?;

    let ledger_rows = flatten_tree(&document.rows);
    for ledger in &ledger_rows {
        write_ledger_row(worksheet, row, ledger)?;
        row += 1;
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    debug!(
        sheet = sheet_label,
        header_lines = document.meta.header_lines.len(),
        ledger_rows = ledger_rows.len(),
        "export workbook laid out"
    );
    Ok(workbook)
}

fn write_header_lines(worksheet: &mut Worksheet, lines: &[String], mut row: u32) -> Result<u32> {
    let title = Format::new().set_bold().set_font_size(14);
    let subtitle = Format::new().set_bold();

    for (index, line) in lines.iter().enumerate() {
        let format = if index == 0 { &title } else { &subtitle };
        worksheet.merge_range(row, 0, row, COLUMN_COUNT - 1, line, format)?;
        row += 1;
    }

    Ok(row)
}

/// Writes the two-row header and returns the first data row.
fn write_column_header(worksheet: &mut Worksheet, row: u32) -> Result<u32> {
    let format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();

    worksheet.merge_range(row, 0, row + 1, 0, "Particulars", &format)?;
    worksheet.merge_range(row, 1, row + 1, 1, "Opening Balance", &format)?;
    worksheet.merge_range(row, 2, row, 3, "Transactions", &format)?;
    worksheet.write_string_with_format(row + 1, 2, "Debit", &format)?;
    worksheet.write_string_with_format(row + 1, 3, "Credit", &format)?;
    worksheet.merge_range(row, 4, row + 1, 4, "Closing Balance", &format)?;

    Ok(row + 2)
}

fn write_ledger_row(worksheet: &mut Worksheet, row: u32, ledger: &LedgerRow) -> Result<()> {
    let cell = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::VerticalCenter);
    let name = cell
        .clone()
        .set_align(FormatAlign::Left)
        .set_indent(u8::try_from(ledger.level).unwrap_or(u8::MAX));
    let balance = cell.clone().set_align(FormatAlign::Right);
    let amount = cell.clone().set_num_format(NUMBER_FORMAT);

    write_text(worksheet, row, 0, &ledger.ledger_name, &name)?;
    write_text(worksheet, row, 1, &format_amount_side(&ledger.opening), &balance)?;
    write_amount(worksheet, row, 2, ledger.transactions.debit, &amount)?;
    write_amount(worksheet, row, 3, ledger.transactions.credit, &amount)?;
    write_text(worksheet, row, 4, &format_amount_side(&ledger.closing), &balance)?;

    Ok(())
}

fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, text: &str, format: &Format) -> Result<()> {
    if text.is_empty() {
        worksheet.write_blank(row, col, format)?;
    } else {
        worksheet.write_string_with_format(row, col, text, format)?;
    }
    Ok(())
}

fn write_amount(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
    format: &Format,
) -> Result<()> {
    match value {
        Some(value) => worksheet.write_number_with_format(row, col, value, format)?,
        None => worksheet.write_blank(row, col, format)?,
    };
    Ok(())
}
