use tracing::debug;

use crate::config::ExtractOptions;
use crate::sheet::SheetReader;

/// Fragments marking title or header text rather than a ledger name.
const NON_DATA_FRAGMENTS: [&str; 5] = [
    "trial balance",
    "particular",
    "opening",
    "closing",
    "transaction",
];

/// Returns the first row below the header that holds ledger data.
///
/// Starting at the header row, rows whose Particulars cell is blank or looks
/// like leftover header text are skipped. Gives up after
/// `options.data_start_lookahead` rows and answers `header_row + 1`.
pub fn find_data_start<S>(
    sheet: &S,
    header_row: u32,
    particulars_col: u32,
    options: &ExtractOptions,
) -> u32
where
    S: SheetReader + ?Sized,
{
    let last_row = header_row
        .saturating_add(options.data_start_lookahead)
        .min(sheet.row_count());

    let found = (header_row..=last_row).find(|&row| {
        let text = sheet.cell_text(row, particulars_col).trim().to_lowercase();
        !is_non_data(&text)
    });

    match found {
        Some(row) => {
            debug!(sheet = sheet.name(), header_row, data_start = row, "found first ledger row");
            row
        }
        None => {
            debug!(sheet = sheet.name(), header_row, "no ledger row found, starting below header");
            header_row + 1
        }
    }
}

fn is_non_data(text: &str) -> bool {
    text.is_empty()
        || text == "debit"
        || text == "credit"
        || NON_DATA_FRAGMENTS
            .iter()
            .any(|fragment| text.contains(fragment))
}
