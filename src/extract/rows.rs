use crate::extract::amount::{parse_amount_side, parse_plain_amount};
use crate::model::{ColumnLayout, LedgerRow, Transactions};
use crate::sheet::SheetReader;

/// Leading whitespace characters that make up one indent level.
const SPACES_PER_LEVEL: usize = 2;

/// Reads every ledger row from `data_start` to the end of the sheet.
///
/// Rows with no name and no financial values are skipped. A row with a blank
/// name but some value is kept with an empty `ledger_name`; unlabelled
/// subtotal lines look like this.
pub fn extract_rows<S>(sheet: &S, layout: &ColumnLayout, data_start: u32) -> Vec<LedgerRow>
where
    S: SheetReader + ?Sized,
{
    let mut rows = Vec::new();

    for row_no in data_start.max(1)..=sheet.row_count() {
        let raw_name = sheet.cell_text(row_no, layout.particulars_col);
        let opening = sheet.cell_text(row_no, layout.opening_col);
        let debit = sheet.cell_text(row_no, layout.debit_col);
        let credit = sheet.cell_text(row_no, layout.credit_col);
        let closing = sheet.cell_text(row_no, layout.closing_col);

        let ledger_name = raw_name.trim_start().to_string();
        let no_values = [&opening, &debit, &credit, &closing]
            .iter()
            .all(|text| text.trim().is_empty());
        if ledger_name.is_empty() && no_values {
            continue;
        }

        let level = sheet
            .cell_indent(row_no, layout.particulars_col)
            .unwrap_or_else(|| whitespace_level(&raw_name));

        rows.push(LedgerRow {
            ledger_name,
            level,
            opening: parse_amount_side(&opening),
            transactions: Transactions {
                debit: parse_plain_amount(&debit),
                credit: parse_plain_amount(&credit),
            },
            closing: parse_amount_side(&closing),
            row_no,
        });
    }

    rows
}

/// Indent level implied by leading whitespace, non-breaking spaces included.
pub fn whitespace_level(raw_name: &str) -> u32 {
    let leading = raw_name.chars().take_while(|ch| ch.is_whitespace()).count();
    (leading / SPACES_PER_LEVEL) as u32
}
