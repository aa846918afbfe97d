//! Trial balance extraction from loosely structured sheets.
//!
//! The pipeline runs [`columns::locate_columns`] and
//! [`header::capture_header_lines`], then [`boundary::find_data_start`],
//! then [`rows::extract_rows`], and finally rebuilds the account hierarchy
//! with [`crate::flatten::build_tree`]. None of these steps fail: odd
//! layouts degrade to fallback positions, and callers judge the result by
//! the document's `meta`.

pub mod amount;
pub mod boundary;
pub mod columns;
pub mod header;
pub mod rows;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::ExtractOptions;
use crate::error::{Result, ToolError};
use crate::flatten::build_tree;
use crate::model::{DocumentKind, DocumentMeta, Role, TrialBalanceDocument};
use crate::sheet::{SheetReader, WorkbookReader};

pub use amount::{format_amount_side, parse_amount_side, parse_plain_amount};
pub use boundary::find_data_start;
pub use columns::{ColumnDetection, locate_columns};
pub use header::capture_header_lines;
pub use rows::extract_rows;

/// Extracts a normalized trial balance from one worksheet.
pub fn extract_trial_balance<S>(sheet: &S, options: &ExtractOptions) -> TrialBalanceDocument
where
    S: SheetReader + ?Sized,
{
    let detection = locate_columns(sheet, options);
    if !detection.detected {
        warn!(sheet = sheet.name(), "header row not recognised; fallback layout in use");
    }

    let header_lines = capture_header_lines(sheet, detection.header_row, options);
    let data_start = find_data_start(
        sheet,
        detection.header_row,
        detection.layout.particulars_col,
        options,
    );
    let rows_flat = extract_rows(sheet, &detection.layout, data_start);
    let rows = build_tree(&rows_flat);

    info!(
        sheet = sheet.name(),
        header_lines = header_lines.len(),
        ledger_rows = rows_flat.len(),
        root_rows = rows.len(),
        "extracted trial balance"
    );

    TrialBalanceDocument {
        kind: DocumentKind::TrialBalance,
        sheet_name: sheet.name().to_string(),
        extracted_at: Utc::now(),
        meta: DocumentMeta {
            header_lines,
            header_row: detection.header_row,
            data_start_idx: data_start,
            columns: detection.layout,
        },
        rows,
        rows_flat,
    }
}

/// Role-checked extraction of a worksheet chosen from `workbook`.
///
/// With no explicit `sheet_name`, the first worksheet whose name mentions
/// "trial" is used, otherwise the first worksheet.
pub fn extract_from_workbook<W>(
    workbook: &W,
    sheet_name: Option<&str>,
    role: Role,
    options: &ExtractOptions,
) -> Result<TrialBalanceDocument>
where
    W: WorkbookReader + ?Sized,
{
    if !role.can_extract() {
        return Err(ToolError::PermissionDenied(role));
    }

    let name = match sheet_name {
        Some(name) => name.to_string(),
        None => default_sheet_name(workbook)?,
    };
    let sheet = workbook
        .sheet(&name)
        .ok_or_else(|| ToolError::MissingSheet(name.clone()))?;

    debug!(sheet = %name, %role, "extracting worksheet");
    Ok(extract_trial_balance(sheet, options))
}

/// Picks the worksheet extracted when the caller names none.
pub fn default_sheet_name<W>(workbook: &W) -> Result<String>
where
    W: WorkbookReader + ?Sized,
{
    let names = workbook.sheet_names();
    names
        .iter()
        .find(|name| name.to_lowercase().contains("trial"))
        .or_else(|| names.first())
        .map(|name| name.to_string())
        .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no worksheets".into()))
}
