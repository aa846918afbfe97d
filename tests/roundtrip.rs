use std::fs;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tempfile::tempdir;
use trial_balance_tools::extract::extract_trial_balance;
use trial_balance_tools::io::excel_write::{self, DEFAULT_SHEET_LABEL};
use trial_balance_tools::io::{document_json, excel_read, xlsx_styles};
use trial_balance_tools::model::{AmountSide, LedgerRow, Role, Transactions, TrialBalanceDocument};
use trial_balance_tools::sheet::{Cell, GridSheet, LoadedWorkbook, WorkbookReader};
use trial_balance_tools::{ExtractOptions, Workspace, sync};

fn source_sheet() -> GridSheet {
    source_sheet_named("Sheet1")
}

fn source_sheet_named(name: &str) -> GridSheet {
    let mut sheet = GridSheet::from_text_rows(
        name,
        vec![
            vec!["Northwind Supplies LLP"],
            vec!["Trial Balance", "01-Apr-2024 to 31-Mar-2025"],
            vec![""],
            vec!["", "", "", "", "", ""],
            vec!["", "", "Debit", "Credit", ""],
            vec!["Capital Account", "1,00,000.00 Cr", "", "25,000", "1,25,000.00 Cr"],
            vec!["Fixed Assets", "", "", "", ""],
            vec!["  Furniture", "40,000 Dr", "12,500.50", "", "52,500.50 Dr"],
            vec!["    Office Chairs", "15,000 Dr", "2,000", "", "17,000 Dr"],
            vec!["  Computers", "60,000 Dr", "", "7,500", "52,500 Dr"],
            vec!["Sundry Creditors ", "-3,250", "", "", "-3,250"],
            vec!["  ", "", "14,500.50", "7,500", ""],
            vec!["", "", "", "", ""],
        ],
    );
    for (col, label) in ["Particulars", "Opening Balance", "Transactions", "", "Closing Balance"]
        .iter()
        .enumerate()
    {
        if !label.is_empty() {
            sheet.set_cell(4, col as u32 + 1, Cell::text(*label));
        }
    }
    sheet.set_cell(7, 1, Cell::text("Fixed Assets").with_indent(0));
    sheet
}

fn content(rows: &[LedgerRow]) -> Vec<(String, u32, AmountSide, Transactions, AmountSide)> {
    rows.iter()
        .map(|row| {
            (
                row.ledger_name.clone(),
                row.level,
                row.opening,
                row.transactions,
                row.closing,
            )
        })
        .collect()
}

fn extract_source() -> TrialBalanceDocument {
    extract_trial_balance(&source_sheet(), &ExtractOptions::default())
}

#[test]
fn exported_sheet_reextracts_to_same_rows() {
    let original = extract_source();
    assert_eq!(original.rows_flat.len(), 7);

    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("trial_balance.xlsx");
    let written = excel_write::write_workbook(&xlsx_path, Some(&original), DEFAULT_SHEET_LABEL)
        .expect("Excel written");
    assert!(written);

    let workbook = excel_read::load_workbook(&xlsx_path).expect("Excel read");
    assert_eq!(workbook.sheet_names(), vec![DEFAULT_SHEET_LABEL]);
    let sheet = workbook.sheet(DEFAULT_SHEET_LABEL).expect("exported sheet");
    let restored = extract_trial_balance(sheet, &ExtractOptions::default());

    assert_eq!(content(&restored.rows_flat), content(&original.rows_flat));
    assert_eq!(restored.meta.header_lines, original.meta.header_lines);
    assert_eq!(restored.rows.len(), original.rows.len());
}

#[test]
fn exported_layout_has_compound_header() {
    let document = extract_source();
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("layout.xlsx");
    excel_write::write_workbook(&xlsx_path, Some(&document), DEFAULT_SHEET_LABEL)
        .expect("Excel written");

    let mut workbook: Xlsx<_> = open_workbook(&xlsx_path).expect("workbook opened");
    let range = workbook
        .worksheet_range(DEFAULT_SHEET_LABEL)
        .expect("sheet present")
        .expect("sheet readable");

    // Two header lines, one blank row, then the column header.
    let text = |row: u32, col: u32| match range.get_value((row, col)) {
        Some(DataType::String(value)) => value.clone(),
        _ => String::new(),
    };
    assert_eq!(text(0, 0), "Northwind Supplies LLP");
    assert_eq!(text(1, 0), "Trial Balance 01-Apr-2024 to 31-Mar-2025");
    assert_eq!(text(2, 0), "");
    assert_eq!(text(3, 0), "Particulars");
    assert_eq!(text(3, 1), "Opening Balance");
    assert_eq!(text(3, 2), "Transactions");
    assert_eq!(text(3, 4), "Closing Balance");
    assert_eq!(text(4, 2), "Debit");
    assert_eq!(text(4, 3), "Credit");
    assert_eq!(text(5, 0), "Capital Account");
    assert_eq!(text(5, 1), "100000 Cr");
    assert_eq!(range.get_value((5, 3)), Some(&DataType::Float(25000.0)));
}

#[test]
fn exported_names_carry_indent_style() {
    let document = extract_source();
    let bytes = excel_write::workbook_to_buffer(Some(&document), DEFAULT_SHEET_LABEL)
        .expect("Excel serialized")
        .expect("document present");

    let indents = xlsx_styles::read_cell_indents(&bytes);
    let sheet_indents = indents.get(DEFAULT_SHEET_LABEL).expect("indents recorded");

    // Data starts on row 6; Furniture, Office Chairs and Computers are nested.
    assert_eq!(sheet_indents.get(&(8, 1)), Some(&1));
    assert_eq!(sheet_indents.get(&(9, 1)), Some(&2));
    assert_eq!(sheet_indents.get(&(10, 1)), Some(&1));
    assert_eq!(sheet_indents.get(&(6, 1)), None);
}

#[test]
fn export_without_document_is_a_no_op() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("nothing.xlsx");

    let written =
        excel_write::write_workbook(&xlsx_path, None, DEFAULT_SHEET_LABEL).expect("no-op export");

    assert!(!written);
    assert!(!xlsx_path.exists());
    assert!(
        excel_write::workbook_to_buffer(None, DEFAULT_SHEET_LABEL)
            .expect("no-op export")
            .is_none()
    );
}

#[test]
fn json_document_roundtrip_preserves_document() {
    let document = extract_source();
    let temp_dir = tempdir().expect("temporary directory");
    let json_path = temp_dir.path().join("trial_balance.json");

    document_json::write_document(&json_path, &document).expect("JSON written");
    let restored = document_json::read_document(&json_path).expect("JSON read");

    assert_eq!(restored, document);
}

#[test]
fn cli_pipeline_extracts_and_exports_files() {
    let temp_dir = tempdir().expect("temporary directory");
    let source_path = temp_dir.path().join("source.xlsx");
    excel_write::write_workbook(&source_path, Some(&extract_source()), "TB FY25")
        .expect("source written");

    let json_path = temp_dir.path().join("tb.json");
    sync::excel_to_document(
        &source_path,
        &json_path,
        None,
        Role::DocSpecialist,
        &ExtractOptions::default(),
    )
    .expect("extraction to JSON");

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("JSON read"))
            .expect("JSON parsed");
    assert_eq!(written["type"], "TRIAL_BALANCE");
    assert_eq!(written["sheetName"], "TB FY25");

    let export_path = temp_dir.path().join("export.xlsx");
    sync::document_to_excel(&json_path, &export_path, DEFAULT_SHEET_LABEL).expect("export");
    assert_eq!(
        sync::list_sheets(&export_path).expect("sheets listed"),
        vec![DEFAULT_SHEET_LABEL.to_string()]
    );

    let normalized_path = temp_dir.path().join("normalized.xlsx");
    let denied = sync::normalize_excel(
        &source_path,
        &normalized_path,
        None,
        Role::Ca,
        &ExtractOptions::default(),
        DEFAULT_SHEET_LABEL,
    );
    assert!(denied.is_err());
    assert!(!normalized_path.exists());
}

#[test]
fn unreadable_file_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let bogus = temp_dir.path().join("bogus.xlsx");
    fs::write(&bogus, b"not a spreadsheet").expect("bogus file written");

    assert!(excel_read::load_workbook(&bogus).is_err());
}

#[test]
fn workspace_replaces_document_on_sheet_selection() {
    let mut other = source_sheet_named("Other");
    other.set_cell(6, 1, Cell::text("Partners Capital"));
    let workbook = LoadedWorkbook::new(vec![source_sheet(), other]);

    let mut workspace = Workspace::new(workbook, Role::TeamLead);
    assert!(!workspace.has_document());

    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("workspace.xlsx");
    assert!(!workspace.export_to(&xlsx_path, DEFAULT_SHEET_LABEL).expect("no-op"));

    let first = workspace.select_sheet(None).expect("default sheet").clone();
    assert_eq!(first.sheet_name, "Sheet1");
    assert!(workspace.has_document());

    let other = workspace.select_sheet(Some("Other")).expect("other sheet");
    assert_eq!(other.sheet_name, "Other");
    assert_eq!(other.rows_flat[0].ledger_name, "Partners Capital");
    assert_eq!(workspace.selected_sheet(), Some("Other"));

    let reparsed = workspace.reparse().expect("reparse");
    assert_eq!(reparsed.sheet_name, "Other");

    assert!(workspace.select_sheet(Some("Missing")).is_err());
    assert!(!workspace.has_document());

    workspace.select_sheet(Some("Sheet1")).expect("back to first sheet");
    assert!(workspace.export_to(&xlsx_path, DEFAULT_SHEET_LABEL).expect("export"));
    assert!(xlsx_path.exists());
}

#[test]
fn workspace_rejects_roles_without_extract_permission() {
    let workbook = LoadedWorkbook::new(vec![source_sheet()]);
    let mut workspace = Workspace::new(workbook, Role::Manager);

    assert!(workspace.select_sheet(None).is_err());
    assert!(!workspace.has_document());
}
