use std::path::Path;

use tracing::{debug, info, instrument};

use crate::config::ExtractOptions;
use crate::error::Result;
use crate::extract::extract_from_workbook;
use crate::io::{document_json, excel_read, excel_write};
use crate::model::Role;
use crate::sheet::WorkbookReader;

/// Lists the worksheet names of an Excel workbook.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn list_sheets(input: &Path) -> Result<Vec<String>> {
    let workbook = excel_read::load_workbook(input)?;
    let names: Vec<String> = workbook.sheet_names().into_iter().map(str::to_string).collect();
    debug!(sheet_count = names.len(), "listed worksheets");
    Ok(names)
}

/// Extracts a trial balance from an Excel workbook into a JSON document.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), %role)
)]
pub fn excel_to_document(
    input: &Path,
    output: &Path,
    sheet: Option<&str>,
    role: Role,
    options: &ExtractOptions,
) -> Result<()> {
    let workbook = excel_read::load_workbook(input)?;
    let document = extract_from_workbook(&workbook, sheet, role, options)?;
    info!(
        sheet = %document.sheet_name,
        ledger_rows = document.rows_flat.len(),
        "extracted trial balance"
    );
    document_json::write_document(output, &document)
}

/// Writes a JSON trial balance document back out as a formatted workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn document_to_excel(input: &Path, output: &Path, sheet_label: &str) -> Result<()> {
    let document = document_json::read_document(input)?;
    info!(
        sheet = %document.sheet_name,
        ledger_rows = document.rows_flat.len(),
        "loaded trial balance document"
    );
    excel_write::write_workbook(output, Some(&document), sheet_label)?;
    Ok(())
}

/// Extracts a trial balance and immediately re-exports it as a clean sheet.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display(), %role)
)]
pub fn normalize_excel(
    input: &Path,
    output: &Path,
    sheet: Option<&str>,
    role: Role,
    options: &ExtractOptions,
    sheet_label: &str,
) -> Result<()> {
    let workbook = excel_read::load_workbook(input)?;
    let document = extract_from_workbook(&workbook, sheet, role, options)?;
    info!(
        sheet = %document.sheet_name,
        ledger_rows = document.rows_flat.len(),
        "extracted trial balance"
    );
    excel_write::write_workbook(output, Some(&document), sheet_label)?;
    Ok(())
}
