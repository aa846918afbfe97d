use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx};
use tracing::{debug, warn};

use crate::error::{Result, ToolError};
use crate::io::xlsx_styles::{self, CellIndents};
use crate::sheet::{Cell, CellValue, GridSheet, LoadedWorkbook, SheetReader};

/// Reads an `.xlsx` file into a caller-owned [`LoadedWorkbook`].
pub fn load_workbook(path: &Path) -> Result<LoadedWorkbook> {
    let bytes = fs::read(path)?;
    load_workbook_from_bytes(&bytes)
}

/// Reads `.xlsx` bytes into a [`LoadedWorkbook`].
///
/// Cell values and formulas come from calamine; explicit indent levels are
/// read separately from the package's style parts.
pub fn load_workbook_from_bytes(bytes: &[u8]) -> Result<LoadedWorkbook> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let indents = xlsx_styles::read_cell_indents(bytes);

    let mut sheets = Vec::new();
    for name in workbook.sheet_names().to_vec() {
        let values = read_required_sheet(&mut workbook, &name)?;
        let formulas = read_formulas(&mut workbook, &name);

        let mut sheet = GridSheet::new(name.clone());
        ingest_values(&mut sheet, &values);
        if let Some(formulas) = &formulas {
            ingest_formulas(&mut sheet, formulas);
        }
        if let Some(sheet_indents) = indents.get(&name) {
            ingest_indents(&mut sheet, sheet_indents);
        }

        debug!(
            sheet = %name,
            rows = sheet.row_count(),
            columns = sheet.column_count(),
            "loaded worksheet"
        );
        sheets.push(sheet);
    }

    Ok(LoadedWorkbook::new(sheets))
}

fn read_required_sheet<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn read_formulas<R: Read + Seek>(workbook: &mut Xlsx<R>, name: &str) -> Option<Range<String>> {
    match workbook.worksheet_formula(name) {
        Some(Ok(range)) => Some(range),
        Some(Err(error)) => {
            warn!(sheet = %name, %error, "formulas unavailable, using cached values only");
            None
        }
        None => None,
    }
}

/// Converts a calamine range position (0-based, absolute) to a 1-based one.
fn position(start: (u32, u32), row_offset: usize, col_offset: usize) -> (u32, u32) {
    (
        start.0 + row_offset as u32 + 1,
        start.1 + col_offset as u32 + 1,
    )
}

fn ingest_values(sheet: &mut GridSheet, range: &Range<DataType>) {
    let start = range.start().unwrap_or((0, 0));
    for (row_offset, row) in range.rows().enumerate() {
        for (col_offset, value) in row.iter().enumerate() {
            let value = data_to_cell_value(value);
            if value == CellValue::Empty {
                continue;
            }
            let (row, col) = position(start, row_offset, col_offset);
            sheet.set_cell(row, col, Cell::new(value));
        }
    }
}

fn ingest_formulas(sheet: &mut GridSheet, range: &Range<String>) {
    let start = range.start().unwrap_or((0, 0));
    for (row_offset, row) in range.rows().enumerate() {
        for (col_offset, source) in row.iter().enumerate() {
            if source.trim().is_empty() {
                continue;
            }
            let (row, col) = position(start, row_offset, col_offset);
            let cached = sheet
                .cell(row, col)
                .map(|cell| cell.value.clone())
                .filter(|value| *value != CellValue::Empty)
                .map(Box::new);
            sheet.set_cell(
                row,
                col,
                Cell::new(CellValue::Formula {
                    source: source.clone(),
                    cached,
                }),
            );
        }
    }
}

/// Applies indent levels to cells inside the used area. Styled cells outside
/// it carry no data and are ignored.
fn ingest_indents(sheet: &mut GridSheet, indents: &CellIndents) {
    let (last_row, last_col) = (sheet.row_count(), sheet.column_count());
    let mut applied = 0usize;

    for (&(row, col), &indent) in indents {
        if row > last_row || col > last_col {
            continue;
        }
        match sheet.cell_mut(row, col) {
            Some(cell) => cell.indent = Some(indent),
            None => sheet.set_cell(row, col, Cell::default().with_indent(indent)),
        }
        applied += 1;
    }

    debug!(sheet = sheet.name(), applied, "applied explicit cell indents");
}

fn data_to_cell_value(value: &DataType) -> CellValue {
    match value {
        DataType::Empty => CellValue::Empty,
        DataType::String(text) => CellValue::Text(text.clone()),
        DataType::Float(number) => CellValue::Number(*number),
        DataType::Int(number) => CellValue::Number(*number as f64),
        DataType::Bool(flag) => CellValue::Bool(*flag),
        DataType::Error(error) => CellValue::Error(error.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
