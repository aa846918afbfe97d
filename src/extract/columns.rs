use tracing::debug;

use crate::config::ExtractOptions;
use crate::model::ColumnLayout;
use crate::sheet::SheetReader;

const PARTICULARS_KEYWORD: &str = "particular";
const HEADER_KEYWORDS: [&str; 5] = ["opening", "closing", "debit", "credit", "transaction"];
/// Compound headers spread labels over the header row and the rows below it.
const HEADER_SPAN: u32 = 2;

/// Where the header row is and which columns hold the five trial balance
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDetection {
    pub header_row: u32,
    pub layout: ColumnLayout,
    /// `false` when no header row was found and the fixed fallback is in use.
    pub detected: bool,
}

impl ColumnDetection {
    /// Row 1 header with the five columns in positions 1 to 5.
    pub fn fallback() -> Self {
        Self {
            header_row: 1,
            layout: ColumnLayout::default(),
            detected: false,
        }
    }
}

/// Finds the header row and the column of each trial balance field by
/// keyword.
///
/// The header row is the first row mentioning "particular" that, together
/// with its next two rows, also mentions a balance or transaction keyword.
/// Labels are then searched for in that three-row band. A column that cannot
/// be found is placed one to the right of the previous field in the order
/// Particulars, Opening, Debit, Credit, Closing. Sheets without a
/// recognizable header get [`ColumnDetection::fallback`].
pub fn locate_columns<S>(sheet: &S, options: &ExtractOptions) -> ColumnDetection
where
    S: SheetReader + ?Sized,
{
    let grid = HeaderGrid::read(sheet, options);

    let Some(header_row) = grid.find_header_row() else {
        debug!(sheet = sheet.name(), "no header row found, using fallback columns");
        return ColumnDetection::fallback();
    };

    let particulars = grid.find_column(header_row, |text| text.contains(PARTICULARS_KEYWORD));
    let opening = grid.find_column(header_row, |text| text.contains("opening"));
    let mut debit = grid.find_column(header_row, |text| text == "debit");
    let mut credit = grid.find_column(header_row, |text| text == "credit");
    if debit.is_none() || credit.is_none() {
        debit = debit.or_else(|| grid.find_column(header_row, |text| text.contains("debit")));
        credit = credit.or_else(|| grid.find_column(header_row, |text| text.contains("credit")));
    }
    let closing = grid.find_column(header_row, |text| text.contains("closing"));

    let particulars_col = particulars.unwrap_or(1);
    let opening_col = opening.unwrap_or(particulars_col + 1);
    let debit_col = debit.unwrap_or(opening_col + 1);
    let credit_col = credit.unwrap_or(debit_col + 1);
    let closing_col = closing.unwrap_or(credit_col + 1);

    let layout = ColumnLayout {
        particulars_col,
        opening_col,
        debit_col,
        credit_col,
        closing_col,
    };
    debug!(sheet = sheet.name(), header_row, ?layout, "located trial balance columns");

    ColumnDetection {
        header_row,
        layout,
        detected: true,
    }
}

/// Lower-cased, trimmed cell texts of the scan window plus the rows a
/// compound header may spill into.
struct HeaderGrid {
    scan_rows: u32,
    rows: Vec<Vec<String>>,
}

impl HeaderGrid {
    fn read<S: SheetReader + ?Sized>(sheet: &S, options: &ExtractOptions) -> Self {
        let scan_rows = options.header_scan_rows.min(sheet.row_count());
        let read_rows = (scan_rows + HEADER_SPAN).min(sheet.row_count());
        let last_col = options.header_scan_cols.min(sheet.column_count());

        let rows = (1..=read_rows)
            .map(|row| {
                (1..=last_col)
                    .map(|col| sheet.cell_text(row, col).trim().to_lowercase())
                    .collect()
            })
            .collect();

        Self { scan_rows, rows }
    }

    fn row(&self, row: u32) -> &[String] {
        row.checked_sub(1)
            .and_then(|idx| self.rows.get(idx as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn find_header_row(&self) -> Option<u32> {
        (1..=self.scan_rows).find(|&row| {
            let has_particulars = self
                .row(row)
                .iter()
                .any(|text| text.contains(PARTICULARS_KEYWORD));
            has_particulars
                && (row..=row + HEADER_SPAN).any(|candidate| {
                    self.row(candidate).iter().any(|text| {
                        HEADER_KEYWORDS
                            .iter()
                            .any(|keyword| text.contains(keyword))
                    })
                })
        })
    }

    /// First column, scanning the header band row by row, whose text
    /// satisfies `predicate`.
    fn find_column(&self, header_row: u32, predicate: impl Fn(&str) -> bool) -> Option<u32> {
        (header_row..=header_row + HEADER_SPAN).find_map(|row| {
            self.row(row)
                .iter()
                .position(|text| predicate(text))
                .map(|idx| idx as u32 + 1)
        })
    }
}
